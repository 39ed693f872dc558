//! Certificate field extraction and canonical rendering
//!
//! Turns a parsed X.509 certificate into an owned record of rendered
//! fields, and that record into the nested [`Info`] mapping.

use crate::certificate::tables::{
    named_curve_bits, signature_algorithm_name, DELIM, UNKNOWN_KEY_USAGE,
    UNKNOWN_PUBLIC_KEY_ALGORITHM,
};
use crate::models::{Info, InfoValue};
use crate::pem;
use chrono::{TimeZone, Utc};
use serde::Serialize;
use std::net::{Ipv4Addr, Ipv6Addr};
use x509_parser::prelude::*;
use x509_parser::public_key::PublicKey;

/// Rendered components of a distinguished name.
///
/// Multi-valued attributes are joined with `", "`; absent attributes
/// render as empty strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct NameDetails {
    pub country: String,
    pub state: String,
    pub locality: String,
    pub organization: String,
    pub organization_unit: String,
    pub common_name: String,
    pub street_address: String,
}

/// Rendered public key fields
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct PublicKeyDetails {
    pub algorithm: String,
    pub size_in_bits: u32,
    pub key_usage: String,
    pub modulus: String,
}

/// Rendered Subject Alternative Name lists, empty when the extension
/// is absent
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SanDetails {
    pub dns_names: String,
    pub email_addresses: String,
    pub ip_addresses: String,
}

/// Every field of interest from one certificate, rendered to its
/// canonical string form.
///
/// Construction is total: unrecognized enum values, absent fields, and
/// unsupported key types degrade to documented defaults instead of
/// failing.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CertificateDetails {
    pub version: u32,
    pub serial_number: String,
    pub signature: String,
    pub signature_algorithm: String,
    pub issuer: NameDetails,
    pub subject: NameDetails,
    pub not_before: String,
    pub not_after: String,
    pub public_key: PublicKeyDetails,
    pub san: SanDetails,
    pub raw: String,
}

impl CertificateDetails {
    /// Extract details from a parsed certificate and its DER encoding
    pub fn from_x509(cert: &X509Certificate, der: &[u8]) -> Self {
        CertificateDetails {
            version: cert.version().0 + 1,
            serial_number: cert.serial.to_string(),
            signature: spaced_hex(cert.signature_value.data.as_ref()),
            signature_algorithm: signature_algorithm_name(
                &cert.signature_algorithm.algorithm.to_id_string(),
            )
            .to_string(),
            issuer: extract_name(cert.issuer()),
            subject: extract_name(cert.subject()),
            not_before: render_timestamp(cert.validity().not_before),
            not_after: render_timestamp(cert.validity().not_after),
            public_key: extract_public_key(cert),
            san: extract_san(cert),
            raw: pem::encode(der),
        }
    }

    /// Render the details as the canonical nested mapping
    pub fn to_info(&self) -> Info {
        let mut info = Info::new();
        info.insert("version".to_string(), self.version.into());
        info.insert("serial number".to_string(), self.serial_number.as_str().into());
        info.insert("signature".to_string(), self.signature.as_str().into());
        info.insert(
            "signature_algorithm".to_string(),
            self.signature_algorithm.as_str().into(),
        );
        info.insert("issuer".to_string(), name_group(&self.issuer));
        info.insert("subject".to_string(), name_group(&self.subject));

        let mut validity = Info::new();
        validity.insert("valid_from".to_string(), self.not_before.as_str().into());
        validity.insert("valid_till".to_string(), self.not_after.as_str().into());
        info.insert("validity".to_string(), validity.into());

        let mut public_key = Info::new();
        public_key.insert(
            "algorithm".to_string(),
            self.public_key.algorithm.as_str().into(),
        );
        public_key.insert("size_in_bits".to_string(), self.public_key.size_in_bits.into());
        public_key.insert(
            "key_usage".to_string(),
            self.public_key.key_usage.as_str().into(),
        );
        public_key.insert("modulus".to_string(), self.public_key.modulus.as_str().into());
        info.insert("public_key".to_string(), public_key.into());

        let mut san = Info::new();
        san.insert("alt_dns_names".to_string(), self.san.dns_names.as_str().into());
        san.insert(
            "alt_email_addresses".to_string(),
            self.san.email_addresses.as_str().into(),
        );
        san.insert(
            "alt_ip_addresses".to_string(),
            self.san.ip_addresses.as_str().into(),
        );
        info.insert("san".to_string(), san.into());

        info.insert("raw".to_string(), self.raw.as_str().into());
        info
    }
}

fn name_group(name: &NameDetails) -> InfoValue {
    let mut group = Info::new();
    group.insert("country".to_string(), name.country.as_str().into());
    group.insert("state".to_string(), name.state.as_str().into());
    group.insert("locality".to_string(), name.locality.as_str().into());
    group.insert("organization".to_string(), name.organization.as_str().into());
    group.insert(
        "organization_unit".to_string(),
        name.organization_unit.as_str().into(),
    );
    group.insert("common_name".to_string(), name.common_name.as_str().into());
    group.insert(
        "street_address".to_string(),
        name.street_address.as_str().into(),
    );
    group.into()
}

/// Join multi-valued attribute values with the canonical separator
pub(crate) fn join_values(values: &[&str]) -> String {
    values.join(DELIM)
}

/// Render bytes as lower-case hex octets separated by single spaces
pub(crate) fn spaced_hex(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Render an ASN.1 time as date, time, and UTC offset/zone
fn render_timestamp(time: ASN1Time) -> String {
    match Utc.timestamp_opt(time.timestamp(), 0).single() {
        Some(dt) => dt.format("%Y-%m-%d %H:%M:%S %z %Z").to_string(),
        None => String::new(),
    }
}

fn extract_name(name: &X509Name) -> NameDetails {
    let mut country = Vec::new();
    let mut state = Vec::new();
    let mut locality = Vec::new();
    let mut organization = Vec::new();
    let mut organization_unit = Vec::new();
    let mut common_name = "";
    let mut street_address = Vec::new();

    for rdn in name.iter() {
        for attr in rdn.iter() {
            let oid = attr.attr_type().to_id_string();
            let value = attr
                .attr_value()
                .as_str()
                .ok()
                .or_else(|| std::str::from_utf8(attr.attr_value().data.as_ref()).ok());
            if let Some(value) = value {
                match oid.as_str() {
                    "2.5.4.6" => country.push(value),
                    "2.5.4.8" => state.push(value),
                    "2.5.4.7" => locality.push(value),
                    "2.5.4.10" => organization.push(value),
                    "2.5.4.11" => organization_unit.push(value),
                    "2.5.4.3" => common_name = value,
                    "2.5.4.9" => street_address.push(value),
                    _ => {}
                }
            }
        }
    }

    NameDetails {
        country: join_values(&country),
        state: join_values(&state),
        locality: join_values(&locality),
        organization: join_values(&organization),
        organization_unit: join_values(&organization_unit),
        common_name: common_name.to_string(),
        street_address: join_values(&street_address),
    }
}

fn extract_public_key(cert: &X509Certificate) -> PublicKeyDetails {
    let spki = cert.public_key();

    let (algorithm, size_in_bits, modulus) = match spki.parsed() {
        Ok(PublicKey::RSA(rsa)) => (
            "RSA",
            bit_length(rsa.modulus),
            spaced_hex(strip_leading_zero(rsa.modulus)),
        ),
        Ok(PublicKey::DSA(y)) => ("DSA", bit_length(y), String::new()),
        Ok(PublicKey::EC(_)) => ("ECDSA", curve_bits(spki), String::new()),
        _ => (UNKNOWN_PUBLIC_KEY_ALGORITHM, 0, String::new()),
    };

    PublicKeyDetails {
        algorithm: algorithm.to_string(),
        size_in_bits,
        key_usage: extract_key_usage(cert),
        modulus,
    }
}

/// Declared bit size of the named curve in the SPKI algorithm
/// parameters, 0 when the parameters are absent or not a known curve
fn curve_bits(spki: &SubjectPublicKeyInfo<'_>) -> u32 {
    match spki.algorithm.parameters.as_ref() {
        Some(params) => match params.as_oid() {
            Ok(oid) => named_curve_bits(&oid.to_id_string()),
            Err(_) => 0,
        },
        None => 0,
    }
}

fn bit_length(bytes: &[u8]) -> u32 {
    let significant = strip_leading_zero(bytes);
    match significant.first() {
        Some(first) => (significant.len() * 8 - first.leading_zeros() as usize) as u32,
        None => 0,
    }
}

fn strip_leading_zero(mut bytes: &[u8]) -> &[u8] {
    while let Some((&0u8, rest)) = bytes.split_first() {
        bytes = rest;
    }
    bytes
}

fn extract_key_usage(cert: &X509Certificate) -> String {
    let mut usages: Vec<&str> = Vec::new();

    if let Ok(Some(ku)) = cert.key_usage() {
        let flags = ku.value;
        if flags.digital_signature() {
            usages.push("digital signature");
        }
        if flags.non_repudiation() {
            usages.push("content commitment");
        }
        if flags.key_encipherment() {
            usages.push("encipherment");
        }
        if flags.data_encipherment() {
            usages.push("data encipherment");
        }
        if flags.key_agreement() {
            usages.push("agreement");
        }
        if flags.key_cert_sign() {
            usages.push("cert sign");
        }
        if flags.crl_sign() {
            usages.push("CRL sign");
        }
        if flags.encipher_only() {
            usages.push("encipher only");
        }
        if flags.decipher_only() {
            usages.push("decipher only");
        }
    }

    if usages.is_empty() {
        UNKNOWN_KEY_USAGE.to_string()
    } else {
        usages.join(DELIM)
    }
}

fn extract_san(cert: &X509Certificate) -> SanDetails {
    let mut dns_names = Vec::new();
    let mut email_addresses = Vec::new();
    let mut ip_addresses = Vec::new();

    if let Ok(Some(san_ext)) = cert.subject_alternative_name() {
        for name in &san_ext.value.general_names {
            match name {
                GeneralName::DNSName(dns) => dns_names.push(dns.to_string()),
                GeneralName::RFC822Name(email) => email_addresses.push(email.to_string()),
                GeneralName::IPAddress(ip) => {
                    if let Some(text) = render_ip(ip) {
                        ip_addresses.push(text);
                    }
                }
                _ => {}
            }
        }
    }

    SanDetails {
        dns_names: dns_names.join(DELIM),
        email_addresses: email_addresses.join(DELIM),
        ip_addresses: ip_addresses.join(DELIM),
    }
}

/// Standard dotted/colon text form of a raw SAN IP address
fn render_ip(bytes: &[u8]) -> Option<String> {
    match bytes.len() {
        4 => {
            let octets: [u8; 4] = bytes.try_into().ok()?;
            Some(Ipv4Addr::from(octets).to_string())
        }
        16 => {
            let octets: [u8; 16] = bytes.try_into().ok()?;
            Some(Ipv6Addr::from(octets).to_string())
        }
        _ => None,
    }
}
