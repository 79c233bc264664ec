//! Generation backend adapters

pub mod echo;

#[cfg(feature = "bedrock")]
pub mod bedrock;

pub use echo::EchoBackend;
