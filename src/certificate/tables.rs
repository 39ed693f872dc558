//! Fixed lookup tables for certificate field rendering
//!
//! Process-wide immutable constants, safe to share across concurrent
//! callers.

/// Separator used when joining multi-valued attributes
pub const DELIM: &str = ", ";

/// Rendered when a signature algorithm OID is not in the name table
pub const UNKNOWN_SIGNATURE_ALGORITHM: &str = "Unknown Signature Algorithm";

/// Rendered when the public key algorithm is not RSA, DSA, or ECDSA
pub const UNKNOWN_PUBLIC_KEY_ALGORITHM: &str = "unknown public key algorithm";

/// Rendered when the key usage bitmask carries no recognized flag
pub const UNKNOWN_KEY_USAGE: &str = "unknown";

/// Signature algorithm OIDs and their display names
const SIGNATURE_ALGORITHM_NAMES: &[(&str, &str)] = &[
    ("1.2.840.113549.1.1.2", "MD2 With RSA"),
    ("1.2.840.113549.1.1.4", "MD5 With RSA"),
    ("1.2.840.113549.1.1.5", "SHA1 With RSA"),
    ("1.2.840.113549.1.1.11", "SHA256 With RSA"),
    ("1.2.840.113549.1.1.12", "SHA384 With RSA"),
    ("1.2.840.113549.1.1.13", "SHA512 With RSA"),
    ("1.2.840.10040.4.3", "DSA With SHA1"),
    ("2.16.840.1.101.3.4.3.2", "DSA With SHA256"),
    ("1.2.840.10045.4.1", "ECDSA With SHA1"),
    ("1.2.840.10045.4.3.2", "ECDSA With SHA256"),
    ("1.2.840.10045.4.3.3", "ECDSA With SHA384"),
    ("1.2.840.10045.4.3.4", "ECDSA With SHA512"),
];

/// Named elliptic curve OIDs and their declared bit sizes
const NAMED_CURVE_BITS: &[(&str, u32)] = &[
    ("1.2.840.10045.3.1.7", 256), // prime256v1 / P-256
    ("1.3.132.0.33", 224),        // secp224r1 / P-224
    ("1.3.132.0.34", 384),        // secp384r1 / P-384
    ("1.3.132.0.35", 521),        // secp521r1 / P-521
    ("1.3.132.0.10", 256),        // secp256k1
];

/// Look up the display name for a signature algorithm OID
pub fn signature_algorithm_name(oid: &str) -> &'static str {
    SIGNATURE_ALGORITHM_NAMES
        .iter()
        .find(|(known, _)| *known == oid)
        .map(|(_, name)| *name)
        .unwrap_or(UNKNOWN_SIGNATURE_ALGORITHM)
}

/// Look up the declared bit size of a named curve OID, 0 when unknown
pub fn named_curve_bits(oid: &str) -> u32 {
    NAMED_CURVE_BITS
        .iter()
        .find(|(known, _)| *known == oid)
        .map(|(_, bits)| *bits)
        .unwrap_or(0)
}
