// crates/engine/src/domain/constraints.rs

//! AdES compatibility rules between container, format and packaging.
//!
//! Fields are ranked container > signature format > packaging. A field's
//! disabled options are the ones that break a rule given the fields ranked
//! above it; fields ranked below are corrected to fit, never the reverse.
//!
//! - ASiC containers take detached signatures in XAdES or CAdES only.
//! - PAdES is enveloped only.
//! - CAdES and JAdES are enveloping or detached.
//!
//! `resolve` is a single pass with no feedback into itself, so
//! `resolve(&resolve(c).configuration) == resolve(c)` for every `c`.

use serde::Serialize;
use tracing::debug;

use super::types::{Container, Packaging, SignatureConfiguration, SignatureFormat};

/// Options currently forbidden for each constrained field. Level, digest
/// algorithm and the boolean flags are never constrained.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DisabledOptions {
    pub container: Vec<Container>,
    pub signature_format: Vec<SignatureFormat>,
    pub packaging: Vec<Packaging>,
}

impl DisabledOptions {
    pub fn is_container_disabled(&self, c: Container) -> bool {
        self.container.contains(&c)
    }

    pub fn is_format_disabled(&self, f: SignatureFormat) -> bool {
        self.signature_format.contains(&f)
    }

    pub fn is_packaging_disabled(&self, p: Packaging) -> bool {
        self.packaging.contains(&p)
    }
}

/// A configuration that satisfies every rule, plus the snapshot used to gray
/// out incompatible choices.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Resolution {
    pub configuration: SignatureConfiguration,
    pub disabled: DisabledOptions,
}

/// Formats a container can hold.
pub fn allowed_formats(container: Container) -> &'static [SignatureFormat] {
    if container.is_asic() {
        &[SignatureFormat::XAdES, SignatureFormat::CAdES]
    } else {
        &SignatureFormat::ALL
    }
}

/// Packagings compatible with a container and format. The container wins:
/// an ASiC container is detached whatever the format says.
pub fn allowed_packagings(container: Container, format: SignatureFormat) -> &'static [Packaging] {
    if container.is_asic() {
        return &[Packaging::Detached];
    }
    match format {
        SignatureFormat::PAdES => &[Packaging::Enveloped],
        SignatureFormat::CAdES | SignatureFormat::JAdES => {
            &[Packaging::Enveloping, Packaging::Detached]
        }
        SignatureFormat::XAdES => &Packaging::ALL,
    }
}

fn complement<T: Copy + PartialEq>(all: &[T], allowed: &[T]) -> Vec<T> {
    all.iter().copied().filter(|v| !allowed.contains(v)).collect()
}

/// Corrects `config` so every rule holds and computes the disabled options
/// for the corrected value. Each field is written at most once.
pub fn resolve(config: &SignatureConfiguration) -> Resolution {
    let mut corrected = *config;

    let formats = allowed_formats(corrected.container);
    if !formats.contains(&corrected.signature_format) {
        let replacement = formats[0];
        debug!(
            field = "signatureFormat",
            from = corrected.signature_format.label(),
            to = replacement.label(),
            container = corrected.container.label(),
            "correcting incompatible signature format"
        );
        corrected.signature_format = replacement;
    }

    let packagings = allowed_packagings(corrected.container, corrected.signature_format);
    if !packagings.contains(&corrected.packaging) {
        let replacement = packagings[0];
        debug!(
            field = "packaging",
            from = corrected.packaging.label(),
            to = replacement.label(),
            format = corrected.signature_format.label(),
            "correcting incompatible packaging"
        );
        corrected.packaging = replacement;
    }

    let disabled = DisabledOptions {
        container: Vec::new(),
        signature_format: complement(&SignatureFormat::ALL, formats),
        packaging: complement(&Packaging::ALL, packagings),
    };

    Resolution {
        configuration: corrected,
        disabled,
    }
}

/// Whether `config` already satisfies every rule.
pub fn is_consistent(config: &SignatureConfiguration) -> bool {
    resolve(config).configuration == *config
}
