use std::fmt;
use std::str::FromStr;

use crate::adapters::dss::mapper;
use crate::domain::error::UnsupportedValue;

/// Signature container wrapping the document and its signature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(into = "&'static str", try_from = "String")]
pub enum Container {
    None,
    AsicS,
    AsicE,
}

impl Container {
    pub const ALL: [Container; 3] = [Container::None, Container::AsicS, Container::AsicE];

    pub fn label(self) -> &'static str {
        match self {
            Container::None => "NONE",
            Container::AsicS => "ASiC-S",
            Container::AsicE => "ASiC-E",
        }
    }

    pub fn is_asic(self) -> bool {
        matches!(self, Container::AsicS | Container::AsicE)
    }
}

option_enum_plumbing!(Container, mapper::parse_container);

/// AdES signature format family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(into = "&'static str", try_from = "String")]
pub enum SignatureFormat {
    XAdES,
    CAdES,
    PAdES,
    JAdES,
}

impl SignatureFormat {
    pub const ALL: [SignatureFormat; 4] = [
        SignatureFormat::XAdES,
        SignatureFormat::CAdES,
        SignatureFormat::PAdES,
        SignatureFormat::JAdES,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SignatureFormat::XAdES => "XAdES",
            SignatureFormat::CAdES => "CAdES",
            SignatureFormat::PAdES => "PAdES",
            SignatureFormat::JAdES => "JAdES",
        }
    }
}

option_enum_plumbing!(SignatureFormat, mapper::parse_signature_format);

/// How the signature relates to the signed content.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
#[serde(into = "&'static str", try_from = "String")]
pub enum Packaging {
    Enveloped,
    Enveloping,
    Detached,
    InternallyDetached,
}

impl Packaging {
    /// Declaration order doubles as the preference order when a packaging
    /// value has to be replaced.
    pub const ALL: [Packaging; 4] = [
        Packaging::Enveloped,
        Packaging::Enveloping,
        Packaging::Detached,
        Packaging::InternallyDetached,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Packaging::Enveloped => "ENVELOPED",
            Packaging::Enveloping => "ENVELOPING",
            Packaging::Detached => "DETACHED",
            Packaging::InternallyDetached => "INTERNALLY_DETACHED",
        }
    }
}

option_enum_plumbing!(Packaging, mapper::parse_packaging);

/// Baseline profile level, ordered by the amount of long-term evidence.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(into = "&'static str", try_from = "String")]
pub enum SignatureLevel {
    BaselineB,
    BaselineT,
    BaselineLt,
    BaselineLta,
}

impl SignatureLevel {
    pub const ALL: [SignatureLevel; 4] = [
        SignatureLevel::BaselineB,
        SignatureLevel::BaselineT,
        SignatureLevel::BaselineLt,
        SignatureLevel::BaselineLta,
    ];

    pub fn label(self) -> &'static str {
        match self {
            SignatureLevel::BaselineB => "B-B",
            SignatureLevel::BaselineT => "B-T",
            SignatureLevel::BaselineLt => "B-LT",
            SignatureLevel::BaselineLta => "B-LTA",
        }
    }
}

option_enum_plumbing!(SignatureLevel, mapper::parse_level);

/// Digest algorithm used for the content digest and the signature.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, serde::Deserialize,
)]
#[serde(into = "&'static str", try_from = "String")]
pub enum DigestAlgorithm {
    Sha1,
    Sha256,
    Sha384,
    Sha512,
}

impl DigestAlgorithm {
    pub const ALL: [DigestAlgorithm; 4] = [
        DigestAlgorithm::Sha1,
        DigestAlgorithm::Sha256,
        DigestAlgorithm::Sha384,
        DigestAlgorithm::Sha512,
    ];

    pub fn label(self) -> &'static str {
        match self {
            DigestAlgorithm::Sha1 => "SHA-1",
            DigestAlgorithm::Sha256 => "SHA-256",
            DigestAlgorithm::Sha384 => "SHA-384",
            DigestAlgorithm::Sha512 => "SHA-512",
        }
    }

    /// Digest length in bytes.
    pub fn output_len(self) -> usize {
        match self {
            DigestAlgorithm::Sha1 => 20,
            DigestAlgorithm::Sha256 => 32,
            DigestAlgorithm::Sha384 => 48,
            DigestAlgorithm::Sha512 => 64,
        }
    }
}

option_enum_plumbing!(DigestAlgorithm, mapper::parse_digest_algorithm);

/// One of the four projections of a verification result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReportView {
    Simple,
    Detailed,
    Diagnostic,
    Etsi,
}

impl ReportView {
    pub const ALL: [ReportView; 4] = [
        ReportView::Simple,
        ReportView::Detailed,
        ReportView::Diagnostic,
        ReportView::Etsi,
    ];

    /// Path segment used by the report download endpoints.
    pub fn path_segment(self) -> &'static str {
        match self {
            ReportView::Simple => "simple",
            ReportView::Detailed => "detailed",
            ReportView::Diagnostic => "diagnostic",
            ReportView::Etsi => "etsi",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            ReportView::Simple => "Simple Report",
            ReportView::Detailed => "Detailed Report",
            ReportView::Diagnostic => "Diagnostic Tree",
            ReportView::Etsi => "ETSI Validation Report",
        }
    }
}

impl fmt::Display for ReportView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.path_segment())
    }
}

impl FromStr for ReportView {
    type Err = UnsupportedValue;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "simple" => Ok(ReportView::Simple),
            "detailed" => Ok(ReportView::Detailed),
            "diagnostic" | "diagnostic-tree" | "tree" => Ok(ReportView::Diagnostic),
            "etsi" => Ok(ReportView::Etsi),
            _ => Err(UnsupportedValue::new("reportView", s)),
        }
    }
}
