//! PEM armor decoding and encoding
//!
//! Walks a text blob containing concatenated `CERTIFICATE` blocks,
//! decodes each block body to DER bytes, and records per-block failures
//! without aborting the batch. The reverse direction re-armors DER
//! bytes into the canonical block form.

use crate::utils::PemError;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::collections::BTreeMap;

const BEGIN_MARKER: &str = "-----BEGIN CERTIFICATE-----";
const END_MARKER: &str = "-----END CERTIFICATE-----";

/// Maps the 0-based ordinal of a failed block to its decode error.
///
/// Contains exactly the ordinals of blocks that failed; successfully
/// decoded blocks never appear.
pub type ErrorRef = BTreeMap<usize, PemError>;

/// What the decoder does after a block fails to decode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RecoveryPolicy {
    /// Record the error and stop the walk; remaining text is not
    /// examined for further blocks.
    #[default]
    Halt,
    /// Record the error, skip forward to the next BEGIN marker, and
    /// keep decoding. The failed block still consumes one ordinal.
    Resync,
}

/// Result of decoding a blob of concatenated PEM blocks
#[derive(Debug, Default)]
pub struct DecodedBatch {
    /// Concatenated DER bytes of every successfully decoded block
    pub payload: Vec<u8>,
    /// Decode errors keyed by block ordinal
    pub errors: ErrorRef,
}

impl DecodedBatch {
    /// True when every block in the input decoded cleanly
    pub fn is_clean(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Decode every PEM block in `blob` under the default [`RecoveryPolicy::Halt`]
pub fn decode(blob: &str) -> DecodedBatch {
    decode_with(blob, RecoveryPolicy::Halt)
}

/// Decode every PEM block in `blob` under the given recovery policy.
///
/// The walk is iterative: a cursor over the remaining text, an
/// accumulator for decoded bytes, and a 0-based ordinal counting the
/// blocks attempted so far. Leading and trailing whitespace around
/// blocks is tolerated. An empty or whitespace-only blob yields an
/// empty payload and an empty error map.
pub fn decode_with(blob: &str, policy: RecoveryPolicy) -> DecodedBatch {
    let mut batch = DecodedBatch::default();
    let mut rest = blob;
    let mut ordinal = 0usize;

    loop {
        let cursor = rest.trim_start();
        if cursor.is_empty() {
            break;
        }

        match decode_block(cursor) {
            Ok((der, after)) => {
                tracing::debug!("decoded block {} ({} bytes)", ordinal, der.len());
                batch.payload.extend_from_slice(&der);
                ordinal += 1;
                rest = after;
            }
            Err(err) => {
                tracing::debug!("block {} failed to decode: {}", ordinal, err);
                batch.errors.insert(ordinal, err);
                match policy {
                    RecoveryPolicy::Halt => break,
                    RecoveryPolicy::Resync => {
                        ordinal += 1;
                        // Resume at the next BEGIN marker past the failed
                        // block, so a bad block is never retried.
                        let skip = if cursor.starts_with(BEGIN_MARKER) {
                            BEGIN_MARKER.len()
                        } else {
                            0
                        };
                        match cursor[skip..].find(BEGIN_MARKER) {
                            Some(pos) => rest = &cursor[skip + pos..],
                            None => break,
                        }
                    }
                }
            }
        }
    }

    batch
}

/// Decode the single block at the start of `text`, returning its DER
/// bytes and the text that follows the consumed block.
fn decode_block(text: &str) -> Result<(Vec<u8>, &str), PemError> {
    let body = text
        .strip_prefix(BEGIN_MARKER)
        .ok_or(PemError::MissingBeginMarker)?;
    let end = body.find(END_MARKER).ok_or(PemError::MissingEndMarker)?;

    let base64_body: String = body[..end]
        .chars()
        .filter(|c| !c.is_ascii_whitespace())
        .collect();
    let der = STANDARD.decode(base64_body.as_bytes())?;

    Ok((der, &body[end + END_MARKER.len()..]))
}

/// Re-encode DER bytes into the canonical PEM block form.
///
/// The base64 body is wrapped at 64 columns; the result carries no
/// surrounding whitespace, so encoding the bytes recovered from a
/// decoded block reproduces that block exactly.
pub fn encode(der: &[u8]) -> String {
    let b64 = STANDARD.encode(der);
    let mut pem = String::with_capacity(b64.len() + b64.len() / 64 + 64);

    pem.push_str(BEGIN_MARKER);
    pem.push('\n');
    for chunk in b64.as_bytes().chunks(64) {
        pem.push_str(std::str::from_utf8(chunk).unwrap_or(""));
        pem.push('\n');
    }
    pem.push_str(END_MARKER);

    pem
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_encode_wraps_body_at_64_columns() {
        let pem = encode(&[0xab; 100]);
        let mut lines = pem.lines();
        assert_eq!(lines.next(), Some(BEGIN_MARKER));
        let body: Vec<&str> = pem
            .lines()
            .filter(|l| !l.starts_with("-----"))
            .collect();
        assert!(body.iter().all(|l| l.len() <= 64));
        assert_eq!(pem.lines().last(), Some(END_MARKER));
    }

    #[test]
    fn test_decode_block_reports_missing_begin() {
        let err = decode_block("garbage").unwrap_err();
        assert!(matches!(err, PemError::MissingBeginMarker));
    }

    #[test]
    fn test_decode_block_reports_missing_end() {
        let err = decode_block("-----BEGIN CERTIFICATE-----\nAAAA\n").unwrap_err();
        assert!(matches!(err, PemError::MissingEndMarker));
    }

    #[test]
    fn test_decode_block_reports_bad_base64() {
        let block = "-----BEGIN CERTIFICATE-----\n!!!!\n-----END CERTIFICATE-----";
        let err = decode_block(block).unwrap_err();
        assert!(matches!(err, PemError::InvalidBase64(_)));
    }

    #[test]
    fn test_decode_block_returns_following_text() {
        let block = encode(&[1, 2, 3]);
        let input = format!("{}\ntrailing", block);
        let (der, after) = decode_block(&input).unwrap();
        assert_eq!(der, vec![1, 2, 3]);
        assert_eq!(after.trim_start(), "trailing");
    }
}
