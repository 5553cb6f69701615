use url::Url;

use crate::domain::error::{EngineError, EngineResult};
use crate::domain::types::EngineDefaults;

use super::constants::{SIGN_DOCUMENT_PATH, VERIFY_PATH};

pub fn validate_service_url(url_str: &str) -> EngineResult<Url> {
  let url = Url::parse(url_str.trim())
    .map_err(|_| EngineError::Config("invalid URL".into()))?;
  match url.scheme() {
    "https" | "http" => {}
    _ => return Err(EngineError::Config("unsupported URL scheme".into())),
  }
  if url.host().is_none() {
    return Err(EngineError::Config("URL missing host".into()));
  }
  if url.query().is_some() || url.fragment().is_some() {
    return Err(EngineError::Config("service URL must not carry a query or fragment".into()));
  }
  Ok(url)
}

/// Absolute endpoints of the signing/validation service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceEndpoints {
  base: Url,
}

impl ServiceEndpoints {
  pub fn new(base_url: &str) -> EngineResult<Self> {
    let mut base = validate_service_url(base_url)?;
    // Url::join drops the last segment unless the path ends with a separator.
    if !base.path().ends_with('/') {
      let path = format!("{}/", base.path());
      base.set_path(&path);
    }
    Ok(Self { base })
  }

  pub fn secure_default() -> EngineResult<Self> {
    Self::new(EngineDefaults::SERVICE_BASE_URL)
  }

  /// Base URL from `KR_DSS_BASE_URL`, or the default when unset.
  pub fn from_env() -> EngineResult<Self> {
    match std::env::var(EngineDefaults::SERVICE_BASE_URL_ENV) {
      Ok(v) if !v.trim().is_empty() => Self::new(&v),
      _ => Self::secure_default(),
    }
  }

  pub fn base(&self) -> &Url {
    &self.base
  }

  pub fn sign_document(&self) -> EngineResult<Url> {
    self.join(SIGN_DOCUMENT_PATH)
  }

  pub fn verify(&self) -> EngineResult<Url> {
    self.join(VERIFY_PATH)
  }

  /// Resolves a report link (see `links::derive_report_url`) against the
  /// service origin.
  pub fn resolve_report_link(&self, link: &str) -> EngineResult<Url> {
    self.join(link)
  }

  fn join(&self, path: &str) -> EngineResult<Url> {
    self.base
      .join(path)
      .map_err(|e| EngineError::Config(format!("cannot join {path:?} onto service URL: {e}")))
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn default_endpoints() {
    let e = ServiceEndpoints::secure_default().unwrap();
    assert_eq!(e.sign_document().unwrap().as_str(), "http://localhost:8080/kr-dss/sign-document");
    assert_eq!(e.verify().unwrap().as_str(), "http://localhost:8080/kr-dss/api/verify");
  }

  #[test]
  fn report_links_resolve_from_origin() {
    let e = ServiceEndpoints::new("https://dss.example.com/gateway").unwrap();
    let url = e
      .resolve_report_link("/kr-dss/api/verify/reports/etsi/a%20b.pdf")
      .unwrap();
    assert_eq!(url.as_str(), "https://dss.example.com/kr-dss/api/verify/reports/etsi/a%20b.pdf");
    assert_eq!(
      e.sign_document().unwrap().as_str(),
      "https://dss.example.com/gateway/kr-dss/sign-document"
    );
  }

  #[test]
  fn rejects_bad_urls() {
    assert!(ServiceEndpoints::new("ftp://dss.example.com").is_err());
    assert!(ServiceEndpoints::new("not a url").is_err());
    assert!(ServiceEndpoints::new("https://dss.example.com/?x=1").is_err());
  }
}
