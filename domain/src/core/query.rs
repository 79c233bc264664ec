//! Query value object

use crate::core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Default upper bound on query length, in characters.
pub const DEFAULT_MAX_QUERY_CHARS: usize = 4000;

/// A validated user query (Value Object)
///
/// The content is kept verbatim: no trimming, escaping or truncation.
/// Validation only rejects input that cannot be used at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Query {
    content: String,
}

impl Query {
    /// Validate and wrap a query.
    ///
    /// Fails with [`DomainError::InvalidQuery`] if the content is empty,
    /// whitespace only, or longer than `max_chars` characters.
    pub fn parse(content: impl Into<String>, max_chars: usize) -> Result<Self, DomainError> {
        let content = content.into();
        if content.trim().is_empty() {
            return Err(DomainError::InvalidQuery("query cannot be empty".to_string()));
        }

        let chars = content.chars().count();
        if chars > max_chars {
            return Err(DomainError::InvalidQuery(format!(
                "query is {} characters, maximum is {}",
                chars, max_chars
            )));
        }

        Ok(Self { content })
    }

    /// Get the query content
    pub fn content(&self) -> &str {
        &self.content
    }

    /// Consume and return the inner content
    pub fn into_content(self) -> String {
        self.content
    }
}

impl std::fmt::Display for Query {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.content)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_keeps_content_verbatim() {
        let q = Query::parse("  What is S3?  ", 100).unwrap();
        assert_eq!(q.content(), "  What is S3?  ");
    }

    #[test]
    fn test_empty_and_blank_queries_rejected() {
        assert!(matches!(
            Query::parse("", 100),
            Err(DomainError::InvalidQuery(_))
        ));
        assert!(matches!(
            Query::parse(" \n\t", 100),
            Err(DomainError::InvalidQuery(_))
        ));
    }

    #[test]
    fn test_length_limit_counts_characters() {
        // 5 characters, 15 bytes
        assert!(Query::parse("日本語テス", 5).is_ok());
        let err = Query::parse("日本語テスト", 5).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Invalid query: query is 6 characters, maximum is 5"
        );
    }
}
