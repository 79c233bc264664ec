//! AWS Bedrock backend
//!
//! Reaches Claude and Nova models via AWS IAM authentication, either through
//! the Converse API or through a knowledge base (RetrieveAndGenerate).

mod backend;
mod model_map;
mod types;

pub use backend::{BedrockBackend, GenerationMode};
pub use model_map::{foundation_model_arn, to_bedrock_model_id};
