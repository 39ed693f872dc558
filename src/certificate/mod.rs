//! Certificate handling module
//!
//! This module provides functionality for:
//! - Splitting a concatenated DER payload into individual certificates
//! - Extracting certificate fields into an owned details record
//! - Rendering those fields as a canonical nested string mapping

pub mod info;
pub mod tables;

pub use info::{CertificateDetails, NameDetails, PublicKeyDetails, SanDetails};

use crate::pem::{self, ErrorRef, RecoveryPolicy};
use crate::utils::CertificateError;
use x509_parser::prelude::*;

/// One certificate, owning its DER encoding.
///
/// The structure itself is parsed on demand by the `x509-parser`
/// collaborator; this type only guarantees that its bytes form exactly
/// one well-formed certificate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Certificate {
    der: Vec<u8>,
}

/// Certificates recovered from a PEM blob, along with the per-block
/// decode errors encountered along the way
#[derive(Debug)]
pub struct PemBundle {
    pub certificates: Vec<Certificate>,
    pub decode_errors: ErrorRef,
}

impl Certificate {
    /// Split a concatenated DER byte stream into individual certificates.
    ///
    /// Fails with a [`CertificateError::ParseError`] if any point of the
    /// stream is not a valid certificate structure. An empty payload
    /// yields an empty vector.
    pub fn parse_payload(payload: &[u8]) -> Result<Vec<Certificate>, CertificateError> {
        let mut certificates = Vec::new();
        let mut rest = payload;

        while !rest.is_empty() {
            let (next, _) = X509Certificate::from_der(rest).map_err(|e| {
                CertificateError::ParseError {
                    message: format!("{:?}", e),
                }
            })?;
            let consumed = rest.len() - next.len();
            certificates.push(Certificate {
                der: rest[..consumed].to_vec(),
            });
            rest = next;
        }

        Ok(certificates)
    }

    /// Decode a PEM blob and parse every recovered certificate.
    ///
    /// Block decode failures are collected in the bundle's error map;
    /// a structure parse failure on the combined payload is fatal and
    /// surfaced as the outer error.
    pub fn from_pem(blob: &str, policy: RecoveryPolicy) -> Result<PemBundle, CertificateError> {
        let batch = pem::decode_with(blob, policy);
        if !batch.is_clean() {
            tracing::warn!("{} block(s) failed to decode", batch.errors.len());
        }
        let certificates = Self::parse_payload(&batch.payload)?;
        Ok(PemBundle {
            certificates,
            decode_errors: batch.errors,
        })
    }

    /// The DER encoding of this certificate
    pub fn der(&self) -> &[u8] {
        &self.der
    }

    /// Extract every field of interest into an owned details record
    pub fn details(&self) -> Result<CertificateDetails, CertificateError> {
        let (_, cert) =
            X509Certificate::from_der(&self.der).map_err(|e| CertificateError::ParseError {
                message: format!("{:?}", e),
            })?;
        Ok(CertificateDetails::from_x509(&cert, &self.der))
    }
}
