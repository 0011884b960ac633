//! Error types for external collaborators.

use thiserror::Error;

use crate::cluster::ClusterArn;

/// Errors raised by the cluster API, metrics sink or notifier.
#[derive(Debug, Error)]
pub enum ClientError {
    /// HTTP request failed (connect, timeout, body decode).
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The service answered with a non-success status.
    #[error("{service} returned status {status}: {body}")]
    Status {
        service: &'static str,
        status: u16,
        body: String,
    },

    /// The request could not be built.
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("{0}")]
    Other(String),
}

/// A cluster could not be described. The batch skips it.
#[derive(Debug, Error)]
#[error("An error occurred when trying to describe the cluster {arn}: {source}")]
pub struct DescribeError {
    pub arn: ClusterArn,
    #[source]
    pub source: ClientError,
}

/// Result type for collaborator calls.
pub type ClientResult<T> = Result<T, ClientError>;
