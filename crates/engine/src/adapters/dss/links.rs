use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};

use crate::domain::types::ReportView;

use super::constants::{FALLBACK_REPORTS_ROOT, MOUNT_PREFIX};

/// Characters left unescaped by a component encoder: ASCII alphanumerics
/// and `- _ . ! ~ * ' ( )`.
const COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
  .remove(b'-')
  .remove(b'_')
  .remove(b'.')
  .remove(b'!')
  .remove(b'~')
  .remove(b'*')
  .remove(b'\'')
  .remove(b'(')
  .remove(b')');

pub fn encode_component(raw: &str) -> String {
  utf8_percent_encode(raw, COMPONENT).to_string()
}

fn present(value: Option<&str>) -> Option<&str> {
  value.filter(|v| !v.trim().is_empty())
}

/// Gives `base` exactly one trailing separator and roots it under the mount
/// prefix. Applying it to its own output is a no-op.
pub fn normalize_reports_base(base: &str) -> String {
  let mut normalized = base.trim().trim_end_matches('/').to_string();
  normalized.push('/');
  if is_mounted(&normalized) {
    return normalized;
  }
  if normalized.starts_with('/') {
    format!("{MOUNT_PREFIX}{normalized}")
  } else {
    format!("{MOUNT_PREFIX}/{normalized}")
  }
}

/// Prefix match on whole path segments, so `/kr-dss-old/` is not mounted.
fn is_mounted(path: &str) -> bool {
  path
    .strip_prefix(MOUNT_PREFIX)
    .is_some_and(|rest| rest.starts_with('/'))
}

/// `{normalized base}{view}/{encoded file name}`, or `None` without a file
/// name. Pure: no I/O, no caching.
///
/// A base counts as mounted only when `/kr-dss` is a whole leading segment;
/// `/kr-dssfoo/` is prefixed again.
pub fn derive_report_url(
  base_download_url: Option<&str>,
  file_name: Option<&str>,
  view: ReportView,
) -> Option<String> {
  let file_name = present(file_name)?;
  let base = match present(base_download_url) {
    Some(base) => normalize_reports_base(base),
    None => FALLBACK_REPORTS_ROOT.to_string(),
  };
  Some(format!(
    "{base}{}/{}",
    view.path_segment(),
    encode_component(file_name)
  ))
}
