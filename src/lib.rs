//! certinfo Library
//!
//! Decodes text blobs containing concatenated PEM certificate blocks
//! and renders each certificate's fields as a canonical nested string
//! mapping:
//! - Batch block decoding with per-ordinal error tracking
//! - Certificate structure parsing via `x509-parser`
//! - Field extraction with defined fallbacks for unknown values
//!
//! # Usage
//!
//! ```rust,ignore
//! use certinfo::{Certificate, RecoveryPolicy};
//!
//! let bundle = Certificate::from_pem(&blob, RecoveryPolicy::Halt)?;
//! for cert in &bundle.certificates {
//!     let info = cert.details()?.to_info();
//!     // Render or serialize the info tree...
//! }
//! ```

pub mod certificate;
pub mod cli;
pub mod models;
pub mod output;
pub mod pem;
pub mod utils;

// Re-export commonly used types
pub use certificate::{Certificate, CertificateDetails, PemBundle};
pub use models::{Info, InfoValue};
pub use pem::{DecodedBatch, ErrorRef, RecoveryPolicy};
pub use utils::{CertificateError, InspectError, PemError, Result};
