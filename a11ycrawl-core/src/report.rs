// Report generation from crawl results

use crate::crawl::extract_url_path;
use crate::score::{Suggestion, score, summarize};
use a11ycrawl_scanner::PageResult;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;

const RULE: &str = "━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━\n";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReportFormat {
    Text,
    Json,
    Markdown,
}

impl ReportFormat {
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "text" => Some(ReportFormat::Text),
            "json" => Some(ReportFormat::Json),
            "markdown" | "md" => Some(ReportFormat::Markdown),
            _ => None,
        }
    }
}

/// Scored result for one audited page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageReport {
    pub url: String,
    pub score: u8,
    /// Number of violations, including ones that do not affect the score.
    pub violations: usize,
    pub suggestions: Vec<Suggestion>,
}

impl PageReport {
    pub fn from_page(page: &PageResult) -> Self {
        let violations = &page.audit.violations;
        let summary = summarize(violations);
        Self {
            url: page.url.clone(),
            score: score(violations),
            violations: summary.count,
            suggestions: summary.suggestions,
        }
    }
}

/// Response body of the accessibility check.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AccessibilityReport {
    pub aggregated_results: Vec<PageReport>,
}

impl AccessibilityReport {
    pub fn from_pages(pages: &[PageResult]) -> Self {
        Self {
            aggregated_results: pages.iter().map(PageReport::from_page).collect(),
        }
    }

    pub fn total_violations(&self) -> usize {
        self.aggregated_results.iter().map(|p| p.violations).sum()
    }

    pub fn average_score(&self) -> Option<f64> {
        if self.aggregated_results.is_empty() {
            return None;
        }
        let total: u32 = self
            .aggregated_results
            .iter()
            .map(|p| u32::from(p.score))
            .sum();
        Some(f64::from(total) / self.aggregated_results.len() as f64)
    }

    /// The page with the lowest score; the first one wins ties.
    pub fn lowest_scoring(&self) -> Option<&PageReport> {
        self.aggregated_results
            .iter()
            .reduce(|lowest, page| if page.score < lowest.score { page } else { lowest })
    }
}

/// Report plus what the crawl itself observed, for the CLI renderers.
#[derive(Debug, Clone)]
pub struct CrawlSummary {
    pub seed_url: String,
    pub started_at: DateTime<Utc>,
    pub finished_at: DateTime<Utc>,
    pub pages_visited: usize,
    pub failed_urls: Vec<String>,
    pub report: AccessibilityReport,
}

impl CrawlSummary {
    pub fn duration_seconds(&self) -> i64 {
        (self.finished_at - self.started_at).num_seconds()
    }
}

pub fn generate_text_report(summary: &CrawlSummary) -> String {
    let report = &summary.report;
    let mut out = String::new();

    out.push_str(RULE);
    out.push_str("                       A11YCRAWL ACCESSIBILITY REPORT\n");
    out.push_str(RULE);
    out.push('\n');

    out.push_str(&format!("Target:         {}\n", summary.seed_url));
    out.push_str(&format!(
        "Scan Date:      {}\n",
        summary.started_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    out.push_str(&format!("Duration:       {} seconds\n", summary.duration_seconds()));
    out.push_str(&format!("Pages Visited:  {}\n", summary.pages_visited));
    out.push_str(&format!("Pages Audited:  {}\n", report.aggregated_results.len()));
    out.push_str(&format!("Pages Failed:   {}\n", summary.failed_urls.len()));
    out.push('\n');

    out.push_str(RULE);
    out.push_str("SUMMARY\n");
    out.push_str(RULE);
    out.push('\n');

    match report.average_score() {
        Some(avg) => out.push_str(&format!("Average Score:    {:.1} / 100\n", avg)),
        None => out.push_str("Average Score:    n/a (no pages audited)\n"),
    }
    out.push_str(&format!("Total Violations: {}\n", report.total_violations()));
    if let Some(lowest) = report.lowest_scoring() {
        out.push_str(&format!(
            "Lowest Score:     {} ({})\n",
            lowest.score,
            extract_url_path(&lowest.url)
        ));
    }
    out.push('\n');

    if !report.aggregated_results.is_empty() {
        out.push_str(RULE);
        out.push_str("PAGES\n");
        out.push_str(RULE);
        out.push('\n');

        for (idx, page) in report.aggregated_results.iter().enumerate() {
            out.push_str(&format!("[{}] {}\n", idx + 1, page.url));
            out.push_str(&format!("Score:        {} / 100\n", page.score));
            out.push_str(&format!("Violations:   {}\n", page.violations));

            for suggestion in &page.suggestions {
                out.push('\n');
                out.push_str(&wrap_text(&format!("- {}", suggestion.help), 80, "  "));
                out.push_str(&wrap_text(&suggestion.description, 80, "    "));
                out.push_str(&format!("    {}\n", suggestion.help_url));
            }

            out.push_str("\n────────────────────────────────────────────────────────────────────────────────\n\n");
        }
    }

    if !summary.failed_urls.is_empty() {
        out.push_str(RULE);
        out.push_str("NOT AUDITED\n");
        out.push_str(RULE);
        out.push('\n');
        for url in &summary.failed_urls {
            out.push_str(&format!("  ✗ {}\n", url));
        }
        out.push('\n');
    }

    out.push_str(RULE);
    out.push_str("                                End of Report\n");
    out.push_str(RULE);

    out
}

pub fn generate_markdown_report(summary: &CrawlSummary) -> String {
    let report = &summary.report;
    let mut out = String::new();

    out.push_str(&format!("# Accessibility report for {}\n\n", summary.seed_url));
    out.push_str(&format!(
        "_Generated {} · {} page(s) audited · {} failed_\n\n",
        summary.finished_at.to_rfc3339(),
        report.aggregated_results.len(),
        summary.failed_urls.len()
    ));

    if let Some(avg) = report.average_score() {
        out.push_str(&format!("**Average score:** {:.1} / 100  \n", avg));
    }
    out.push_str(&format!(
        "**Total violations:** {}\n\n",
        report.total_violations()
    ));

    if !report.aggregated_results.is_empty() {
        out.push_str("| Page | Score | Violations |\n");
        out.push_str("|------|------:|-----------:|\n");
        for page in &report.aggregated_results {
            out.push_str(&format!(
                "| {} | {} | {} |\n",
                escape_markdown_cell(&page.url),
                page.score,
                page.violations
            ));
        }
        out.push('\n');
    }

    for page in report
        .aggregated_results
        .iter()
        .filter(|p| !p.suggestions.is_empty())
    {
        out.push_str(&format!("## {}\n\n", page.url));
        for suggestion in &page.suggestions {
            out.push_str(&format!(
                "- [{}]({}): {}\n",
                suggestion.help, suggestion.help_url, suggestion.description
            ));
        }
        out.push('\n');
    }

    if !summary.failed_urls.is_empty() {
        out.push_str("## Not audited\n\n");
        for url in &summary.failed_urls {
            out.push_str(&format!("- {}\n", url));
        }
        out.push('\n');
    }

    out
}

/// Pretty-printed `{"aggregatedResults": [...]}`.
pub fn generate_json_report(report: &AccessibilityReport) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(report)
}

pub fn render_report(summary: &CrawlSummary, format: ReportFormat) -> Result<String, serde_json::Error> {
    match format {
        ReportFormat::Text => Ok(generate_text_report(summary)),
        ReportFormat::Json => generate_json_report(&summary.report),
        ReportFormat::Markdown => Ok(generate_markdown_report(summary)),
    }
}

pub fn save_report(content: &str, path: &Path) -> std::io::Result<()> {
    let mut file = File::create(path)?;
    file.write_all(content.as_bytes())?;
    Ok(())
}

fn escape_markdown_cell(text: &str) -> String {
    text.replace('|', "\\|")
}

fn wrap_text(text: &str, width: usize, indent: &str) -> String {
    let mut result = String::new();
    let mut current_line = String::new();

    for word in text.split_whitespace() {
        if current_line.len() + word.len() + 1 > width - indent.len() && !current_line.is_empty() {
            result.push_str(indent);
            result.push_str(&current_line);
            result.push('\n');
            current_line.clear();
        }

        if !current_line.is_empty() {
            current_line.push(' ');
        }
        current_line.push_str(word);
    }

    if !current_line.is_empty() {
        result.push_str(indent);
        result.push_str(&current_line);
        result.push('\n');
    }

    result
}
