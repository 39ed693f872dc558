//! Golden-output tests for the certificate info builder, using
//! generated certificates so every assertion runs against real DER.

use certinfo::certificate::NameDetails;
use certinfo::pem;
use certinfo::{Certificate, InfoValue, RecoveryPolicy};
use rcgen::{
    CertificateParams, DistinguishedName, DnType, KeyPair, KeyUsagePurpose, SanType, SerialNumber,
};
use std::net::IpAddr;
use std::time::{Duration, UNIX_EPOCH};
use x509_parser::prelude::*;

const NOT_BEFORE_SECS: u64 = 1_672_531_200; // 2023-01-01 00:00:00 UTC
const NOT_AFTER_SECS: u64 = 1_988_150_400; // 2033-01-01 00:00:00 UTC

fn sample_pem() -> String {
    let mut params = CertificateParams::new(vec![
        "mail.example.com".to_string(),
        "www.example.com".to_string(),
    ])
    .expect("certificate params");

    let mut dn = DistinguishedName::new();
    dn.push(DnType::CountryName, "US");
    dn.push(DnType::StateOrProvinceName, "California");
    dn.push(DnType::LocalityName, "Mountain View");
    dn.push(DnType::OrganizationName, "Example Inc");
    dn.push(DnType::CommonName, "mail.example.com");
    params.distinguished_name = dn;

    params.serial_number = Some(SerialNumber::from(1_404_354_960_355_712_309u64));
    params.not_before = (UNIX_EPOCH + Duration::from_secs(NOT_BEFORE_SECS)).into();
    params.not_after = (UNIX_EPOCH + Duration::from_secs(NOT_AFTER_SECS)).into();

    params
        .subject_alt_names
        .push(SanType::Rfc822Name("admin@example.com".try_into().unwrap()));
    params
        .subject_alt_names
        .push(SanType::IpAddress(IpAddr::from([192, 0, 2, 10])));

    params.key_usages = vec![
        KeyUsagePurpose::DigitalSignature,
        KeyUsagePurpose::KeyCertSign,
    ];

    let key_pair = KeyPair::generate().expect("key pair");
    params
        .self_signed(&key_pair)
        .expect("self-signed certificate")
        .pem()
}

fn sample_certificate() -> Certificate {
    let bundle = Certificate::from_pem(&sample_pem(), RecoveryPolicy::Halt).unwrap();
    assert!(bundle.decode_errors.is_empty());
    assert_eq!(bundle.certificates.len(), 1);
    bundle.certificates.into_iter().next().unwrap()
}

fn expected_name() -> NameDetails {
    NameDetails {
        country: "US".to_string(),
        state: "California".to_string(),
        locality: "Mountain View".to_string(),
        organization: "Example Inc".to_string(),
        organization_unit: String::new(),
        common_name: "mail.example.com".to_string(),
        street_address: String::new(),
    }
}

#[test]
fn test_version_and_serial() {
    let details = sample_certificate().details().unwrap();
    assert_eq!(details.version, 3);
    assert_eq!(details.serial_number, "1404354960355712309");
}

#[test]
fn test_issuer_and_subject_golden() {
    let details = sample_certificate().details().unwrap();
    // Self-signed, so both names carry the same components.
    assert_eq!(details.subject, expected_name());
    assert_eq!(details.issuer, expected_name());
}

#[test]
fn test_validity_golden() {
    let details = sample_certificate().details().unwrap();
    assert_eq!(details.not_before, "2023-01-01 00:00:00 +0000 UTC");
    assert_eq!(details.not_after, "2033-01-01 00:00:00 +0000 UTC");
}

#[test]
fn test_signature_algorithm_name() {
    let details = sample_certificate().details().unwrap();
    assert_eq!(details.signature_algorithm, "ECDSA With SHA256");
}

#[test]
fn test_signature_is_trimmed_spaced_lowercase_hex() {
    let cert = sample_certificate();
    let details = cert.details().unwrap();

    assert!(!details.signature.is_empty());
    assert_eq!(details.signature, details.signature.trim());
    assert!(details
        .signature
        .split(' ')
        .all(|octet| octet.len() == 2
            && octet.chars().all(|c| c.is_ascii_hexdigit() && !c.is_ascii_uppercase())));

    // Re-hex-decoding reproduces the signature bytes exactly.
    let decoded: Vec<u8> = details
        .signature
        .split(' ')
        .map(|octet| u8::from_str_radix(octet, 16).unwrap())
        .collect();
    let (_, parsed) = X509Certificate::from_der(cert.der()).unwrap();
    assert_eq!(decoded, parsed.signature_value.data.as_ref());
}

#[test]
fn test_public_key_fields() {
    let details = sample_certificate().details().unwrap();
    assert_eq!(details.public_key.algorithm, "ECDSA");
    assert_eq!(details.public_key.size_in_bits, 256);
    assert_eq!(details.public_key.key_usage, "digital signature, cert sign");
    assert_eq!(details.public_key.modulus, "");
}

#[test]
fn test_key_usage_absent_renders_unknown() {
    let mut params = CertificateParams::new(vec!["plain.example.com".to_string()]).unwrap();
    let mut dn = DistinguishedName::new();
    dn.push(DnType::CommonName, "plain.example.com");
    params.distinguished_name = dn;

    let key_pair = KeyPair::generate().unwrap();
    let pem = params.self_signed(&key_pair).unwrap().pem();

    let bundle = Certificate::from_pem(&pem, RecoveryPolicy::Halt).unwrap();
    let details = bundle.certificates[0].details().unwrap();
    assert_eq!(details.public_key.key_usage, "unknown");
}

#[test]
fn test_subject_alternative_names() {
    let details = sample_certificate().details().unwrap();
    assert_eq!(details.san.dns_names, "mail.example.com, www.example.com");
    assert_eq!(details.san.email_addresses, "admin@example.com");
    assert_eq!(details.san.ip_addresses, "192.0.2.10");
}

#[test]
fn test_raw_pem_roundtrip() {
    let cert = sample_certificate();
    let details = cert.details().unwrap();

    assert_eq!(details.raw, details.raw.trim());

    let batch = pem::decode(&details.raw);
    assert!(batch.errors.is_empty());
    let reparsed = Certificate::parse_payload(&batch.payload).unwrap();
    assert_eq!(reparsed.len(), 1);
    assert_eq!(reparsed[0].der(), cert.der());
}

#[test]
fn test_info_tree_shape() {
    let info = sample_certificate().details().unwrap().to_info();

    let labels: Vec<&str> = info.keys().map(String::as_str).collect();
    assert_eq!(
        labels,
        vec![
            "issuer",
            "public_key",
            "raw",
            "san",
            "serial number",
            "signature",
            "signature_algorithm",
            "subject",
            "validity",
            "version",
        ]
    );

    assert_eq!(info["version"], InfoValue::Number(3));

    let subject = info["subject"].as_group().unwrap();
    assert_eq!(
        subject["common_name"],
        InfoValue::Text("mail.example.com".to_string())
    );
    assert_eq!(subject["organization_unit"], InfoValue::Text(String::new()));

    let validity = info["validity"].as_group().unwrap();
    assert_eq!(
        validity["valid_from"],
        InfoValue::Text("2023-01-01 00:00:00 +0000 UTC".to_string())
    );

    let public_key = info["public_key"].as_group().unwrap();
    assert_eq!(public_key["size_in_bits"], InfoValue::Number(256));
}

#[test]
fn test_multi_certificate_bundle() {
    let blob = format!("{}\n{}\n{}\n{}\n", sample_pem(), sample_pem(), sample_pem(), sample_pem());
    let bundle = Certificate::from_pem(&blob, RecoveryPolicy::Halt).unwrap();
    assert_eq!(bundle.certificates.len(), 4);
    assert!(bundle.decode_errors.is_empty());
}

#[test]
fn test_bundle_with_bad_block_under_both_policies() {
    let blob = format!("not a certificate\n{}", sample_pem());

    let halted = Certificate::from_pem(&blob, RecoveryPolicy::Halt).unwrap();
    assert!(halted.certificates.is_empty());
    assert!(halted.decode_errors.contains_key(&0));

    let resynced = Certificate::from_pem(&blob, RecoveryPolicy::Resync).unwrap();
    assert_eq!(resynced.certificates.len(), 1);
    assert!(resynced.decode_errors.contains_key(&0));
}

#[test]
fn test_structure_error_is_distinct_from_decode_error() {
    // A well-formed PEM block whose payload is not a certificate
    // structure: decoding succeeds, structure parsing fails.
    let blob = pem::encode(&[0xde, 0xad, 0xbe, 0xef]);
    let err = Certificate::from_pem(&blob, RecoveryPolicy::Halt).unwrap_err();
    assert!(matches!(
        err,
        certinfo::CertificateError::ParseError { .. }
    ));
}
