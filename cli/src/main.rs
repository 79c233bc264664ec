//! CLI entrypoint for promptlab
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use promptlab_application::{
    AskInput, AskTechniqueUseCase, CompareTechniquesUseCase, ComparisonLogger, ComparisonProgress,
    GenerationBackend, NoComparisonLogger, NoProgress,
};
use promptlab_domain::{Catalog, ComparisonRequest, FailureKind, Model, RenderEngine, Side};
use promptlab_infrastructure::{
    ConfigLoader, EchoBackend, FileConfig, FileOutputFormat, JsonlComparisonLogger, build_catalog,
};
use promptlab_presentation::{
    Cli, Command, OutputConfig, OutputFormat, OutputFormatter, ProgressReporter, SimpleProgress,
    formatter_for,
};
use std::io::IsTerminal;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

/// Exit status used when Ctrl-C cut a request short
const EXIT_CANCELLED: i32 = 130;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging based on verbosity level
    let filter = match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return Ok(());
    }

    // === Configuration ===
    let config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    config.validate().context("Invalid configuration")?;

    let Some(command) = cli.command.clone() else {
        bail!("No command given. Run `promptlab --help` for usage.");
    };

    info!("Starting promptlab");

    if cli.dry_run && !command.needs_backend() {
        warn!("--dry-run has no effect on this command");
    }

    let catalog = build_catalog(&config).context("Failed to build the technique catalog")?;
    let output_config = output_config(&cli, &config, &command);
    output_config.apply_color();
    let formatter = formatter_for(&output_config);

    match command {
        Command::Techniques => {
            print!("{}", formatter.format_techniques(catalog.list()));
        }
        Command::Render { technique, query } => {
            let prompt = RenderEngine::new(config.behavior.max_query_chars)
                .render(&catalog, &technique, &query)?;
            println!("{}", formatter.format_rendered(&prompt));
        }
        Command::Compare {
            ref query,
            ref technique_a,
            ref technique_b,
            ref model,
            vs_rag,
            ..
        } => {
            let backends = create_backends(&cli, &config, &command).await?;
            let technique_a = technique_a
                .clone()
                .unwrap_or_else(|| config.compare.technique_a.clone());
            // Against the knowledge base the same technique reads as a like-for-like pair
            let technique_b = match technique_b {
                Some(technique) => technique.clone(),
                None if vs_rag => technique_a.clone(),
                None => config.compare.technique_b.clone(),
            };
            let request = ComparisonRequest::new(
                query.clone(),
                technique_a,
                technique_b,
                resolve_model(model.as_deref(), &config),
            );
            run_compare(&cli, &config, backends, catalog, request, formatter.as_ref()).await?;
        }
        Command::Ask {
            ref query,
            ref technique,
            ref model,
            ..
        } => {
            let backend = create_backends(&cli, &config, &command).await?.a;
            let input = AskInput::new(
                query.clone(),
                technique
                    .clone()
                    .unwrap_or_else(|| config.compare.technique_a.clone()),
                resolve_model(model.as_deref(), &config),
            );
            run_ask(&config, backend, catalog, input, formatter.as_ref()).await?;
        }
    }

    Ok(())
}

async fn run_compare(
    cli: &Cli,
    config: &FileConfig,
    backends: SideBackends,
    catalog: Arc<Catalog>,
    request: ComparisonRequest,
    formatter: &dyn OutputFormatter,
) -> Result<()> {
    let logger: Arc<dyn ComparisonLogger> = match &cli.log_file {
        Some(path) => {
            let logger = JsonlComparisonLogger::open(path)
                .with_context(|| format!("Cannot open log file {}", path.display()))?;
            info!(path = %logger.path().display(), "Logging comparison events");
            Arc::new(logger)
        }
        None => Arc::new(NoComparisonLogger),
    };

    let use_case = CompareTechniquesUseCase::new(backends.a, catalog)
        .with_side_backend(Side::B, backends.b)
        .with_config(config.behavior.to_behavior_config())
        .with_logger(logger)
        .with_cancellation(cancel_on_ctrl_c());

    // Spinners only make sense on a terminal
    let progress: Box<dyn ComparisonProgress> = if cli.quiet {
        Box::new(NoProgress)
    } else if std::io::stderr().is_terminal() {
        Box::new(ProgressReporter::new())
    } else {
        Box::new(SimpleProgress)
    };

    let result = use_case
        .execute_with_progress(request, progress.as_ref())
        .await?;
    drop(progress);

    println!("{}", formatter.format_comparison(&result));

    if result.is_cancelled() {
        warn!("Comparison cancelled");
        std::process::exit(EXIT_CANCELLED);
    }
    Ok(())
}

async fn run_ask(
    config: &FileConfig,
    backend: Arc<dyn GenerationBackend>,
    catalog: Arc<Catalog>,
    input: AskInput,
    formatter: &dyn OutputFormatter,
) -> Result<()> {
    let use_case = AskTechniqueUseCase::new(backend, catalog)
        .with_config(config.behavior.to_behavior_config())
        .with_cancellation(cancel_on_ctrl_c());

    let result = use_case.execute(input).await?;
    println!("{}", formatter.format_answer(&result));

    if result.failure_kind() == Some(FailureKind::Cancelled) {
        std::process::exit(EXIT_CANCELLED);
    }
    Ok(())
}

/// Token that fires on the first Ctrl-C
fn cancel_on_ctrl_c() -> CancellationToken {
    let token = CancellationToken::new();
    let trigger = token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            eprintln!("\nCancelling...");
            trigger.cancel();
        }
    });
    token
}

fn resolve_model(flag: Option<&str>, config: &FileConfig) -> Model {
    flag.map(Model::from_name)
        .unwrap_or_else(|| config.compare.model.clone())
}

fn output_config(cli: &Cli, config: &FileConfig, command: &Command) -> OutputConfig {
    let format = cli.output.unwrap_or(match config.output.format {
        Some(FileOutputFormat::Json) => OutputFormat::Json,
        Some(FileOutputFormat::Plain) => OutputFormat::Plain,
        Some(FileOutputFormat::SideBySide) | None => OutputFormat::SideBySide,
    });
    let no_analysis = matches!(
        command,
        Command::Compare {
            no_analysis: true,
            ..
        }
    );

    OutputConfig::default()
        .with_format(format)
        .with_color(config.output.color)
        .with_width(config.output.width)
        .with_analysis(config.output.analysis && !no_analysis)
}

/// Generation backends for each side of `compare` (`ask` uses side A).
///
/// Sides on the same route share one backend instance.
struct SideBackends {
    a: Arc<dyn GenerationBackend>,
    b: Arc<dyn GenerationBackend>,
}

async fn create_backends(cli: &Cli, config: &FileConfig, command: &Command) -> Result<SideBackends> {
    let kb_a = command.uses_knowledge_base(Side::A);
    // `ask` has no side B; mirror A so only one route is built
    let kb_b = match command {
        Command::Ask { .. } => kb_a,
        _ => command.uses_knowledge_base(Side::B),
    };

    let direct = if !kb_a || !kb_b {
        Some(create_backend(cli, config, false).await?)
    } else {
        None
    };
    let knowledge_base = if kb_a || kb_b {
        Some(create_backend(cli, config, true).await?)
    } else {
        None
    };

    let pick = |kb: bool| {
        let backend = if kb { &knowledge_base } else { &direct };
        backend
            .clone()
            .ok_or_else(|| anyhow!("No backend configured for this side"))
    };
    Ok(SideBackends {
        a: pick(kb_a)?,
        b: pick(kb_b)?,
    })
}

/// Select one generation backend, direct or through the knowledge base
async fn create_backend(
    cli: &Cli,
    config: &FileConfig,
    rag: bool,
) -> Result<Arc<dyn GenerationBackend>> {
    if cli.dry_run {
        info!(rag, "Using echo backend");
        let echo = EchoBackend::new();
        return Ok(Arc::new(if rag { echo.with_retrieval() } else { echo }));
    }

    bedrock_backend(config, rag).await
}

#[cfg(feature = "bedrock")]
async fn bedrock_backend(config: &FileConfig, rag: bool) -> Result<Arc<dyn GenerationBackend>> {
    use promptlab_infrastructure::{BedrockBackend, GenerationMode};

    let bedrock = &config.providers.bedrock;
    let mode = if rag {
        match bedrock.resolved_knowledge_base_id() {
            Some(knowledge_base_id) => GenerationMode::KnowledgeBase { knowledge_base_id },
            None => bail!(
                "Knowledge base ID required for --rag/--vs-rag. \
                 Set providers.bedrock.knowledge_base_id or the KB_ID environment variable."
            ),
        }
    } else {
        GenerationMode::Direct
    };

    Ok(Arc::new(BedrockBackend::new(bedrock, mode).await))
}

#[cfg(not(feature = "bedrock"))]
async fn bedrock_backend(_config: &FileConfig, _rag: bool) -> Result<Arc<dyn GenerationBackend>> {
    bail!("This build has no Bedrock support. Rebuild with the `bedrock` feature or use --dry-run.")
}
