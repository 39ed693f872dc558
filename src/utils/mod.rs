//! Utility modules for certinfo
//!
//! This module contains the error types shared across the crate.

pub mod error;

pub use error::{CertificateError, InspectError, OutputError, PemError, Result};
