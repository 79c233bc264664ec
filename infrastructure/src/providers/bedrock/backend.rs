//! Bedrock generation backend
//!
//! Implements `GenerationBackend` in one of two modes:
//! - direct: Bedrock Runtime Converse with a single user message
//! - knowledge base: Bedrock Agent Runtime RetrieveAndGenerate, returning citations

use super::{model_map, types};
use crate::config::FileBedrockConfig;
use async_trait::async_trait;
use aws_sdk_bedrockagentruntime::Client as AgentClient;
use aws_sdk_bedrockagentruntime::types as agent;
use aws_sdk_bedrockruntime::Client as RuntimeClient;
use aws_sdk_bedrockruntime::types as runtime;
use promptlab_application::{BackendError, GenerationBackend};
use promptlab_domain::{Generation, Model};
use tracing::{debug, info};

/// How prompts reach the model
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerationMode {
    /// Converse API, no retrieval
    Direct,
    /// RetrieveAndGenerate against a knowledge base
    KnowledgeBase { knowledge_base_id: String },
}

impl GenerationMode {
    pub fn label(&self) -> &'static str {
        match self {
            GenerationMode::Direct => "bedrock",
            GenerationMode::KnowledgeBase { .. } => "bedrock-kb",
        }
    }

    /// Knowledge-base mode runs its own retrieval on the incoming text
    pub fn is_knowledge_base(&self) -> bool {
        matches!(self, GenerationMode::KnowledgeBase { .. })
    }
}

pub struct BedrockBackend {
    runtime: RuntimeClient,
    agent: AgentClient,
    region: String,
    max_tokens: i32,
    cross_region: bool,
    mode: GenerationMode,
}

impl BedrockBackend {
    /// Create a backend from the `[providers.bedrock]` settings.
    ///
    /// Resolves AWS credentials once; both clients share the same SDK config.
    pub async fn new(config: &FileBedrockConfig, mode: GenerationMode) -> Self {
        let region = config.resolved_region();
        let mut aws_config_loader = aws_config::defaults(aws_config::BehaviorVersion::latest())
            .region(aws_config::Region::new(region.clone()));

        if let Some(ref profile) = config.profile {
            aws_config_loader = aws_config_loader.profile_name(profile);
        }

        let sdk_config = aws_config_loader.load().await;
        info!(region = %region, mode = mode.label(), "Bedrock backend initialized");

        Self {
            runtime: RuntimeClient::new(&sdk_config),
            agent: AgentClient::new(&sdk_config),
            region,
            max_tokens: i32::try_from(config.max_tokens).unwrap_or(i32::MAX),
            cross_region: config.cross_region,
            mode,
        }
    }

    async fn converse(&self, prompt: &str, model: &Model) -> Result<Generation, BackendError> {
        let model_id = model_map::to_bedrock_model_id(model, self.cross_region, &self.region);

        let message = runtime::Message::builder()
            .role(runtime::ConversationRole::User)
            .content(runtime::ContentBlock::Text(prompt.to_string()))
            .build()
            .map_err(|e| BackendError::RequestFailed(format!("Failed to build message: {}", e)))?;

        debug!(model = %model_id, "Calling Bedrock Converse API");

        let response = self
            .runtime
            .converse()
            .model_id(&model_id)
            .messages(message)
            .inference_config(
                runtime::InferenceConfiguration::builder()
                    .max_tokens(self.max_tokens)
                    .build(),
            )
            .send()
            .await
            .map_err(|e| types::convert_converse_error(&e))?;

        let text = response
            .output()
            .and_then(types::converse_output_text)
            .ok_or_else(|| {
                BackendError::RequestFailed("No output in Bedrock response".to_string())
            })?;

        Ok(Generation::from_text(text))
    }

    /// `query` is used both as the retrieval search text and as the question
    /// the knowledge base answers, so it should be the user's raw query.
    async fn retrieve_and_generate(
        &self,
        query: &str,
        model: &Model,
        knowledge_base_id: &str,
    ) -> Result<Generation, BackendError> {
        let model_arn = model_map::foundation_model_arn(model, &self.region);
        let build_error = |e: aws_sdk_bedrockagentruntime::error::BuildError| {
            BackendError::RequestFailed(format!("Failed to build request: {}", e))
        };

        let input = agent::RetrieveAndGenerateInput::builder()
            .text(query)
            .build()
            .map_err(build_error)?;

        let knowledge_base = agent::KnowledgeBaseRetrieveAndGenerateConfiguration::builder()
            .knowledge_base_id(knowledge_base_id)
            .model_arn(&model_arn)
            .build()
            .map_err(build_error)?;

        let configuration = agent::RetrieveAndGenerateConfiguration::builder()
            .r#type(agent::RetrieveAndGenerateType::KnowledgeBase)
            .knowledge_base_configuration(knowledge_base)
            .build()
            .map_err(build_error)?;

        debug!(
            knowledge_base = knowledge_base_id,
            model = %model_arn,
            "Calling Bedrock RetrieveAndGenerate API"
        );

        let response = self
            .agent
            .retrieve_and_generate()
            .input(input)
            .retrieve_and_generate_configuration(configuration)
            .send()
            .await
            .map_err(|e| types::convert_retrieve_error(&e))?;

        let text = response
            .output()
            .map(|output| output.text().to_string())
            .ok_or_else(|| {
                BackendError::RequestFailed("No output in knowledge base response".to_string())
            })?;
        let citations = types::convert_citations(response.citations());

        debug!(citations = citations.len(), "Knowledge base answered");
        Ok(Generation::from_text(text).with_citations(citations))
    }
}

#[async_trait]
impl GenerationBackend for BedrockBackend {
    async fn generate(&self, prompt: &str, model: &Model) -> Result<Generation, BackendError> {
        match &self.mode {
            GenerationMode::Direct => self.converse(prompt, model).await,
            GenerationMode::KnowledgeBase { knowledge_base_id } => {
                self.retrieve_and_generate(prompt, model, knowledge_base_id)
                    .await
            }
        }
    }

    fn name(&self) -> &str {
        self.mode.label()
    }

    fn uses_retrieval(&self) -> bool {
        self.mode.is_knowledge_base()
    }
}
