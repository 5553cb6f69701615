/// Media type of a signed artifact, inferred from its file name.
pub fn media_type_for_file_name(file_name: &str) -> &'static str {
  let lower = file_name.to_ascii_lowercase();
  if lower.ends_with(".pdf") {
    "application/pdf"
  } else if lower.ends_with(".json") {
    "application/json"
  } else if lower.ends_with(".p7s") || lower.ends_with(".p7m") {
    "application/pkcs7-signature"
  } else if lower.ends_with(".xml") {
    "application/xml"
  } else {
    "application/octet-stream"
  }
}

/// The server's file name when it sent one; otherwise the original
/// document's stem with a `.bin` extension.
pub fn download_name(server_file_name: Option<&str>, original_file_name: Option<&str>) -> String {
  if let Some(name) = server_file_name.filter(|n| !n.is_empty()) {
    return name.to_string();
  }
  let stem = match original_file_name.filter(|n| !n.is_empty()) {
    Some(name) => match name.rfind('.') {
      Some(dot) => &name[..dot],
      None => name,
    },
    None => "document",
  };
  format!("{stem}.bin")
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn media_types() {
    assert_eq!(media_type_for_file_name("signed.PDF"), "application/pdf");
    assert_eq!(media_type_for_file_name("sig.p7m"), "application/pkcs7-signature");
    assert_eq!(media_type_for_file_name("doc.xml"), "application/xml");
    assert_eq!(media_type_for_file_name("container.asice"), "application/octet-stream");
  }

  #[test]
  fn download_names() {
    assert_eq!(download_name(Some("signed.pdf"), Some("orig.pdf")), "signed.pdf");
    assert_eq!(download_name(Some(""), Some("report.final.docx")), "report.final.bin");
    assert_eq!(download_name(None, Some("README")), "README.bin");
    assert_eq!(download_name(None, None), "document.bin");
  }
}
