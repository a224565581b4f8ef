//! Domain error types

use crate::alias::validation::AliasIssue;
use thiserror::Error;

/// Domain-level errors
#[derive(Error, Debug)]
pub enum DomainError {
    #[error("{} alias(es) failed validation", .0.len())]
    InvalidAliases(Vec<AliasIssue>),
}

impl DomainError {
    /// Issues carried by this error
    pub fn issues(&self) -> &[AliasIssue] {
        match self {
            DomainError::InvalidAliases(issues) => issues,
        }
    }
}
