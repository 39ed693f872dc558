//! Custom error types for certinfo
//!
//! This module defines domain-specific error types using `thiserror` for
//! the failure modes that can occur while decoding and describing
//! certificates.

use thiserror::Error;

/// Top-level error type for the certinfo application
#[derive(Error, Debug)]
pub enum InspectError {
    #[error("PEM decode error: {0}")]
    Pem(#[from] PemError),

    #[error("Certificate error: {0}")]
    Certificate(#[from] CertificateError),

    #[error("Output error: {0}")]
    Output(#[from] OutputError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// PEM block decoding errors
///
/// Recorded per block ordinal during a batch decode; never fatal on
/// their own.
#[derive(Error, Debug)]
pub enum PemError {
    #[error("expected '-----BEGIN CERTIFICATE-----' marker")]
    MissingBeginMarker,

    #[error("missing '-----END CERTIFICATE-----' marker")]
    MissingEndMarker,

    #[error("invalid base64 in block body: {0}")]
    InvalidBase64(#[from] base64::DecodeError),
}

/// Certificate structure parsing errors
#[derive(Error, Debug)]
pub enum CertificateError {
    #[error("failed to parse certificate structure: {message}")]
    ParseError { message: String },
}

/// Output rendering errors
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("failed to serialize certificate info: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Convenience result type using [`InspectError`]
pub type Result<T> = std::result::Result<T, InspectError>;
