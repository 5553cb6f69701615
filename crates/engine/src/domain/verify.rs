// crates/engine/src/domain/verify.rs
use serde::{Deserialize, Deserializer, Serialize};

use super::types::ReportView;

/// Overall indication of the simple report.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Indication {
    #[serde(alias = "PASSED")]
    TotalPassed,
    #[serde(alias = "FAILED")]
    TotalFailed,
    Indeterminate,
}

impl Indication {
    pub fn as_str(self) -> &'static str {
        match self {
            Indication::TotalPassed => "TOTAL_PASSED",
            Indication::TotalFailed => "TOTAL_FAILED",
            Indication::Indeterminate => "INDETERMINATE",
        }
    }

    /// Heading text, e.g. `TOTAL PASSED`.
    pub fn display_label(self) -> String {
        self.as_str().replacen('_', " ", 1)
    }

    pub fn tone(self) -> StatusTone {
        match self {
            Indication::TotalPassed => StatusTone::Passed,
            Indication::TotalFailed => StatusTone::Failed,
            Indication::Indeterminate => StatusTone::Warning,
        }
    }
}

/// Status of a single constraint or tree node.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Status {
    #[serde(alias = "TOTAL_PASSED")]
    Passed,
    #[serde(alias = "TOTAL_FAILED")]
    Failed,
    Warning,
    Indeterminate,
}

impl Status {
    pub fn tone(self) -> StatusTone {
        match self {
            Status::Passed => StatusTone::Passed,
            Status::Failed => StatusTone::Failed,
            Status::Warning => StatusTone::Warning,
            Status::Indeterminate => StatusTone::Neutral,
        }
    }
}

/// Visual classification shared by every view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum StatusTone {
    Passed,
    Failed,
    Warning,
    Neutral,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimpleReport {
    pub indication: Indication,
    pub message: String,
    #[serde(default)]
    pub sub_indication: Option<String>,
    #[serde(default)]
    pub validation_time: Option<String>,
    #[serde(default)]
    pub signature_count: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DetailedReportItem {
    pub name: String,
    pub status: Status,
    pub message: String,
}

/// Node of the diagnostic tree. The root stands for all signatures; children
/// descend through signatures and their constraints, in server order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiagnosticNode {
    pub name: String,
    pub status: Status,
    pub message: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub children: Vec<DiagnosticNode>,
}

fn null_as_empty<'de, D>(d: D) -> Result<Vec<DiagnosticNode>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Vec<DiagnosticNode>>::deserialize(d)?.unwrap_or_default())
}

impl DiagnosticNode {
    pub fn leaf(name: impl Into<String>, status: Status, message: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status,
            message: message.into(),
            children: Vec::new(),
        }
    }

    pub fn with_children(mut self, children: Vec<DiagnosticNode>) -> Self {
        self.children = children;
        self
    }

    pub fn is_leaf(&self) -> bool {
        self.children.is_empty()
    }

    /// Pre-order walk yielding each node with its depth (root is 0).
    pub fn walk(&self) -> DiagnosticWalk<'_> {
        DiagnosticWalk { stack: vec![(0, self)] }
    }

    pub fn node_count(&self) -> usize {
        self.walk().count()
    }

    /// Number of levels, a lone root being 1.
    pub fn height(&self) -> usize {
        self.walk().map(|(depth, _)| depth + 1).max().unwrap_or(1)
    }

    /// First node, in pre-order, whose name matches.
    pub fn find(&self, name: &str) -> Option<&DiagnosticNode> {
        self.walk().map(|(_, n)| n).find(|n| n.name == name)
    }
}

pub struct DiagnosticWalk<'a> {
    stack: Vec<(usize, &'a DiagnosticNode)>,
}

impl<'a> Iterator for DiagnosticWalk<'a> {
    type Item = (usize, &'a DiagnosticNode);

    fn next(&mut self) -> Option<Self::Item> {
        let (depth, node) = self.stack.pop()?;
        self.stack
            .extend(node.children.iter().rev().map(|child| (depth + 1, child)));
        Some((depth, node))
    }
}

/// Summary metadata of the ETSI validation report.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EtsiValidationReport {
    pub available: bool,
    pub message: Option<String>,
    pub main_indication: Option<String>,
    pub validation_time: Option<String>,
    pub poe_time: Option<String>,
    pub policy: Option<String>,
    pub algorithm: Option<String>,
    pub signer_info: Option<String>,
    pub cert: Option<String>,
    pub cert_not_after: Option<String>,
    pub time_stamp_evidence: Option<String>,
}

impl EtsiValidationReport {
    /// Indication shown on the badge; absent means indeterminate.
    pub fn indication_label(&self) -> &str {
        self.main_indication.as_deref().unwrap_or("INDETERMINATE")
    }

    /// URN-style indications count as passed when they mention "passed".
    pub fn is_passed(&self) -> bool {
        self.indication_label().to_ascii_lowercase().contains("passed")
    }

    /// Plain-text summary for the clipboard.
    pub fn summary_text(&self) -> String {
        let mut lines = vec![
            "[ETSI Validation Report Summary]".to_string(),
            format!("available: {}", self.available),
        ];
        let fields = [
            ("mainIndication", &self.main_indication),
            ("validationTime", &self.validation_time),
            ("poeTime", &self.poe_time),
            ("policy", &self.policy),
            ("algorithm", &self.algorithm),
            ("signerInfo", &self.signer_info),
            ("cert", &self.cert),
            ("certNotAfter", &self.cert_not_after),
            ("timeStampEvidence", &self.time_stamp_evidence),
            ("message", &self.message),
        ];
        for (label, value) in fields {
            if let Some(v) = value.as_deref().filter(|v| !v.is_empty()) {
                lines.push(format!("{label}: {v}"));
            }
        }
        lines.join("\n")
    }
}

/// Outcome of one verification call. Never updated in place; the next call
/// replaces it wholesale.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VerificationResult {
    pub is_valid: bool,
    #[serde(default)]
    pub simple_report: Option<SimpleReport>,
    #[serde(default)]
    pub detailed_report: Option<Vec<DetailedReportItem>>,
    #[serde(default)]
    pub diagnostic_tree: Option<DiagnosticNode>,
    #[serde(default)]
    pub etsi_validation_report: Option<EtsiValidationReport>,
    #[serde(default)]
    pub file_name: Option<String>,
    #[serde(default)]
    pub download_url: Option<String>,
}

/// Borrowed projection of a single view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewContent<'a> {
    Simple(&'a SimpleReport),
    Detailed(&'a [DetailedReportItem]),
    Diagnostic(&'a DiagnosticNode),
    Etsi(&'a EtsiValidationReport),
    Unavailable(ReportView),
}

impl VerificationResult {
    pub fn view(&self, view: ReportView) -> ViewContent<'_> {
        let content = match view {
            ReportView::Simple => self.simple_report.as_ref().map(ViewContent::Simple),
            ReportView::Detailed => self
                .detailed_report
                .as_deref()
                .map(ViewContent::Detailed),
            ReportView::Diagnostic => self.diagnostic_tree.as_ref().map(ViewContent::Diagnostic),
            ReportView::Etsi => self
                .etsi_validation_report
                .as_ref()
                .filter(|r| r.available)
                .map(ViewContent::Etsi),
        };
        content.unwrap_or(ViewContent::Unavailable(view))
    }

    pub fn is_available(&self, view: ReportView) -> bool {
        !matches!(self.view(view), ViewContent::Unavailable(_))
    }

    pub fn available_views(&self) -> Vec<ReportView> {
        ReportView::ALL
            .into_iter()
            .filter(|v| self.is_available(*v))
            .collect()
    }

    pub fn to_json_pretty(&self) -> super::error::EngineResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Derives the download link for `view` from this result's artifact.
    pub fn report_url(&self, view: ReportView) -> Option<String> {
        crate::adapters::dss::links::derive_report_url(
            self.download_url.as_deref(),
            self.file_name.as_deref(),
            view,
        )
    }
}

/// Message shown in place of a view the server did not provide.
pub fn unavailable_message(view: ReportView) -> String {
    format!("{} is not provided by the server.", view.title())
}
