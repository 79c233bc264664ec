//! Configuration file loader with multi-source merging

use super::file_config::FileConfig;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use std::path::{Path, PathBuf};

const PROJECT_FILES: [&str; 2] = ["promptlab.toml", ".promptlab.toml"];
const ENV_PREFIX: &str = "PROMPTLAB_";

/// Configuration loader that handles file discovery and merging
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration from all sources with proper priority
    ///
    /// Priority (highest to lowest):
    /// 1. Explicit config path (if provided)
    /// 2. Project root: `./promptlab.toml` or `./.promptlab.toml`
    /// 3. XDG config: `$XDG_CONFIG_HOME/promptlab/config.toml`
    /// 4. `PROMPTLAB_` environment variables
    /// 5. Default values
    pub fn load(config_path: Option<&PathBuf>) -> Result<FileConfig, Box<figment::Error>> {
        Self::figment(config_path).extract().map_err(Box::new)
    }

    fn figment(config_path: Option<&PathBuf>) -> Figment {
        let mut figment = Figment::new()
            .merge(Serialized::defaults(FileConfig::default()))
            .merge(Env::prefixed(ENV_PREFIX).split("__"));

        // Add global config (XDG or fallback)
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(&global_path));
            }
        }

        if let Some(path) = Self::project_config_path() {
            figment = figment.merge(Toml::file(path));
        }

        // Add explicit config path (highest priority for files)
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        figment
    }

    /// Load only default configuration (for --no-config)
    pub fn load_defaults() -> FileConfig {
        FileConfig::default()
    }

    /// Get the global config file path
    ///
    /// Returns XDG_CONFIG_HOME/promptlab/config.toml if set,
    /// otherwise falls back to ~/.config/promptlab/config.toml
    pub fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|d| d.join("promptlab").join("config.toml"))
    }

    /// Get the project-level config file path (if it exists)
    pub fn project_config_path() -> Option<PathBuf> {
        PROJECT_FILES
            .into_iter()
            .map(PathBuf::from)
            .find(|path| path.exists())
    }

    /// Print the config file locations being used (for debugging)
    pub fn print_config_sources(explicit: Option<&Path>) {
        println!("Configuration sources (in priority order):");

        if let Some(path) = explicit {
            let mark = if path.exists() { "FOUND" } else { "MISSING" };
            println!("  [{:<5}] Explicit: {}", mark, path.display());
        }

        // Project config
        if let Some(path) = Self::project_config_path() {
            println!("  [FOUND] Project: {}", path.display());
        } else {
            println!("  [     ] Project: ./promptlab.toml or ./.promptlab.toml");
        }

        // Global config
        if let Some(path) = Self::global_config_path() {
            if path.exists() {
                println!("  [FOUND] Global:  {}", path.display());
            } else {
                println!("  [     ] Global:  {}", path.display());
            }
        }

        let env_keys: Vec<String> = std::env::vars()
            .map(|(key, _)| key)
            .filter(|key| key.starts_with(ENV_PREFIX))
            .collect();
        if env_keys.is_empty() {
            println!("  [     ] Env:     {}*", ENV_PREFIX);
        } else {
            println!("  [FOUND] Env:     {}", env_keys.join(", "));
        }

        println!("  [     ] Default: built-in defaults");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::FileOutputFormat;
    use figment::Jail;
    use promptlab_domain::Model;

    fn isolate_global(jail: &mut Jail) {
        let xdg = jail.directory().join("xdg");
        jail.set_env("XDG_CONFIG_HOME", xdg.display());
    }

    #[test]
    fn test_load_defaults() {
        let config = ConfigLoader::load_defaults();
        assert_eq!(config.compare.technique_a, "default");
        assert_eq!(config.behavior.timeout_seconds, 120);
    }

    #[test]
    fn test_global_config_path_returns_some() {
        // Should return a path (even if file doesn't exist)
        let path = ConfigLoader::global_config_path();
        assert!(path.is_some());
        let path = path.unwrap();
        assert!(path.to_string_lossy().contains("promptlab"));
    }

    #[test]
    fn test_project_file_overrides_defaults() {
        Jail::expect_with(|jail| {
            isolate_global(jail);
            jail.create_file(
                "promptlab.toml",
                r#"
[compare]
technique_b = "few-shot"

[output]
format = "plain"
"#,
            )?;

            let config = ConfigLoader::load(None).map_err(|e| *e)?;
            assert_eq!(config.compare.technique_a, "default");
            assert_eq!(config.compare.technique_b, "few-shot");
            assert_eq!(config.output.format, Some(FileOutputFormat::Plain));
            Ok(())
        });
    }

    #[test]
    fn test_hidden_project_file_is_found() {
        Jail::expect_with(|jail| {
            isolate_global(jail);
            jail.create_file(".promptlab.toml", "[behavior]\nmax_query_chars = 500\n")?;

            let config = ConfigLoader::load(None).map_err(|e| *e)?;
            assert_eq!(config.behavior.max_query_chars, 500);
            Ok(())
        });
    }

    #[test]
    fn test_explicit_file_beats_project_file() {
        Jail::expect_with(|jail| {
            isolate_global(jail);
            jail.create_file("promptlab.toml", "[behavior]\ntimeout_seconds = 30\n")?;
            jail.create_file("custom.toml", "[behavior]\ntimeout_seconds = 5\n")?;

            let explicit = PathBuf::from("custom.toml");
            let config = ConfigLoader::load(Some(&explicit)).map_err(|e| *e)?;
            assert_eq!(config.behavior.timeout_seconds, 5);
            Ok(())
        });
    }

    #[test]
    fn test_env_is_below_files() {
        Jail::expect_with(|jail| {
            isolate_global(jail);
            jail.set_env("PROMPTLAB_COMPARE__MODEL", "claude-3-haiku");
            jail.set_env("PROMPTLAB_BEHAVIOR__TIMEOUT_SECONDS", "60");
            jail.create_file("promptlab.toml", "[behavior]\ntimeout_seconds = 15\n")?;

            let config = ConfigLoader::load(None).map_err(|e| *e)?;
            assert_eq!(config.compare.model, Model::Claude3Haiku);
            assert_eq!(config.behavior.timeout_seconds, 15);
            Ok(())
        });
    }

    #[test]
    fn test_templates_and_techniques_from_file() {
        Jail::expect_with(|jail| {
            isolate_global(jail);
            jail.create_file(
                "promptlab.toml",
                r#"
[[templates]]
id = "tpl-eli5"
body = "Explain like I'm five: {query}"

[[techniques]]
id = "eli5"
display_name = "Explain like I'm five"
template_id = "tpl-eli5"
"#,
            )?;

            let config = ConfigLoader::load(None).map_err(|e| *e)?;
            assert_eq!(config.templates[0].id, "tpl-eli5");
            assert_eq!(config.techniques[0].template_id, "tpl-eli5");
            Ok(())
        });
    }

    #[test]
    fn test_malformed_file_is_an_error() {
        Jail::expect_with(|jail| {
            isolate_global(jail);
            jail.create_file("promptlab.toml", "[behavior\ntimeout_seconds = ")?;
            assert!(ConfigLoader::load(None).is_err());
            Ok(())
        });
    }
}
