//! axe-core result model.
//!
//! Only the parts of `axe.run()` output that a11ycrawl reads are modelled;
//! unknown fields are ignored on decode.

use serde::{Deserialize, Serialize};

/// Severity axe-core assigns to a violation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Impact {
    Minor,
    Moderate,
    Serious,
    Critical,
    #[serde(other)]
    Unknown,
}

impl Impact {
    pub fn as_str(&self) -> &'static str {
        match self {
            Impact::Minor => "minor",
            Impact::Moderate => "moderate",
            Impact::Serious => "serious",
            Impact::Critical => "critical",
            Impact::Unknown => "unknown",
        }
    }
}

/// A DOM node a rule failed on.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AffectedNode {
    #[serde(default)]
    pub html: String,
    /// CSS selector path; nested arrays appear for shadow DOM and iframes.
    #[serde(default)]
    pub target: Vec<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure_summary: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Violation {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub impact: Option<Impact>,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub help: String,
    #[serde(default)]
    pub help_url: String,
    #[serde(default)]
    pub nodes: Vec<AffectedNode>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestEngine {
    pub name: String,
    pub version: String,
}

/// Output of one `axe.run()` on one page.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuditResult {
    #[serde(default)]
    pub violations: Vec<Violation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub test_engine: Option<TestEngine>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<String>,
}
