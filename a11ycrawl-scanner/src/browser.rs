//! Headless Chromium renderer.
//!
//! Each launch starts its own browser process with a single tab. Pages are
//! audited by injecting axe-core and evaluating `axe.run()` in the page.

use crate::audit::AuditResult;
use crate::error::{Result, ScanError};
use crate::renderer::{Renderer, RendererLauncher};
use chromiumoxide::Page;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::js_protocol::runtime::EvaluateParams;
use futures::StreamExt;
use scraper::{Html, Selector};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

/// Pinned axe-core build used when no local script is configured.
pub const AXE_CDN_URL: &str = "https://cdnjs.cloudflare.com/ajax/libs/axe-core/4.10.2/axe.min.js";

const AXE_RUN: &str = "axe.run(document, { resultTypes: ['violations'] })";

/// Where to obtain the axe-core source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AxeSource {
    File(PathBuf),
    Url(String),
}

impl Default for AxeSource {
    fn default() -> Self {
        AxeSource::Url(AXE_CDN_URL.to_string())
    }
}

/// The axe-core source, loaded once and shared by every browser.
#[derive(Debug, Clone)]
pub struct AxeScript(Arc<str>);

impl AxeScript {
    pub async fn load(source: &AxeSource) -> Result<Self> {
        let script = match source {
            AxeSource::File(path) => {
                debug!("Loading axe-core from {}", path.display());
                tokio::fs::read_to_string(path).await?
            }
            AxeSource::Url(url) => {
                info!("Downloading axe-core from {}", url);
                reqwest::get(url).await?.error_for_status()?.text().await?
            }
        };
        Self::from_source(script)
    }

    pub fn from_source(script: impl Into<String>) -> Result<Self> {
        let script = script.into();
        if script.trim().is_empty() {
            return Err(ScanError::AxeScript("script is empty".to_string()));
        }
        Ok(Self(Arc::from(script)))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Launches one Chromium instance per crawl.
#[derive(Debug, Clone)]
pub struct ChromiumLauncher {
    axe: AxeScript,
    headless: bool,
    sandbox: bool,
}

impl ChromiumLauncher {
    pub fn new(axe: AxeScript) -> Self {
        Self {
            axe,
            headless: true,
            sandbox: false,
        }
    }

    pub fn with_headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }

    pub fn with_sandbox(mut self, sandbox: bool) -> Self {
        self.sandbox = sandbox;
        self
    }

    fn browser_config(&self) -> Result<BrowserConfig> {
        let mut builder = BrowserConfig::builder();
        if !self.headless {
            builder = builder.with_head();
        }
        if !self.sandbox {
            builder = builder.no_sandbox().arg("--disable-setuid-sandbox");
        }
        builder.build().map_err(ScanError::Browser)
    }

    pub async fn launch_chromium(&self) -> Result<ChromiumRenderer> {
        let config = self.browser_config()?;
        let (browser, mut handler) = Browser::launch(config).await?;

        let handler_task = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if let Err(e) = event {
                    debug!("Browser handler event error: {}", e);
                }
            }
        });

        let page = match browser.new_page("about:blank").await {
            Ok(page) => page,
            Err(e) => {
                handler_task.abort();
                return Err(e.into());
            }
        };

        debug!("Chromium launched");
        Ok(ChromiumRenderer {
            browser,
            page,
            handler_task,
            axe: self.axe.clone(),
        })
    }
}

#[async_trait::async_trait]
impl RendererLauncher for ChromiumLauncher {
    async fn launch(&self) -> Result<Box<dyn Renderer>> {
        Ok(Box::new(self.launch_chromium().await?))
    }
}

pub struct ChromiumRenderer {
    browser: Browser,
    page: Page,
    handler_task: JoinHandle<()>,
    axe: AxeScript,
}

impl ChromiumRenderer {
    async fn evaluate(&self, params: EvaluateParams) -> Result<chromiumoxide::js::EvaluationResult> {
        self.page
            .evaluate_expression(params)
            .await
            .map_err(|e| ScanError::Evaluation(e.to_string()))
    }
}

#[async_trait::async_trait]
impl Renderer for ChromiumRenderer {
    async fn render_and_audit(&mut self, url: &str) -> Result<AuditResult> {
        self.page
            .goto(url)
            .await
            .map_err(|e| ScanError::Navigation {
                url: url.to_string(),
                reason: e.to_string(),
            })?;

        let inject = EvaluateParams::builder()
            .expression(self.axe.as_str())
            .build()
            .map_err(ScanError::Evaluation)?;
        self.evaluate(inject).await?;

        let run = EvaluateParams::builder()
            .expression(AXE_RUN)
            .await_promise(true)
            .return_by_value(true)
            .build()
            .map_err(ScanError::Evaluation)?;
        let audit: AuditResult = self.evaluate(run).await?.into_value()?;

        debug!("{} violation(s) on {}", audit.violations.len(), url);
        Ok(audit)
    }

    async fn extract_links(&mut self) -> Result<Vec<String>> {
        let html = self.page.content().await?;
        extract_hrefs(&html)
    }

    async fn close(&mut self) -> Result<()> {
        let closed = self.browser.close().await;
        if let Err(e) = self.browser.wait().await {
            warn!("Chromium did not exit cleanly: {}", e);
        }
        self.handler_task.abort();
        closed?;
        debug!("Chromium closed");
        Ok(())
    }
}

/// Raw `href` attribute of every anchor in `html`, in document order.
pub fn extract_hrefs(html: &str) -> Result<Vec<String>> {
    let document = Html::parse_document(html);
    let selector =
        Selector::parse("a[href]").map_err(|e| ScanError::Evaluation(e.to_string()))?;

    Ok(document
        .select(&selector)
        .filter_map(|element| element.value().attr("href"))
        .map(|href| href.to_string())
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_hrefs_in_document_order() {
        let html = r#"<html><body>
            <a href="/one">One</a>
            <a name="anchor-only">No href</a>
            <nav><a href="https://other.org/two">Two</a></nav>
            <a href="three#frag">Three</a>
        </body></html>"#;

        let hrefs = extract_hrefs(html).unwrap();
        assert_eq!(hrefs, vec!["/one", "https://other.org/two", "three#frag"]);
    }

    #[test]
    fn test_extract_hrefs_keeps_empty_href() {
        let hrefs = extract_hrefs(r#"<a href="">self</a>"#).unwrap();
        assert_eq!(hrefs, vec![""]);
    }

    #[test]
    fn test_axe_script_rejects_empty() {
        assert!(matches!(
            AxeScript::from_source("   "),
            Err(ScanError::AxeScript(_))
        ));
    }

    #[tokio::test]
    async fn test_axe_script_from_file() {
        let path = std::env::temp_dir().join(format!("a11ycrawl-axe-{}.js", std::process::id()));
        tokio::fs::write(&path, "window.axe = {};").await.unwrap();

        let script = AxeScript::load(&AxeSource::File(path.clone())).await.unwrap();
        assert_eq!(script.as_str(), "window.axe = {};");

        tokio::fs::remove_file(&path).await.unwrap();
    }

    #[tokio::test]
    async fn test_axe_script_missing_file() {
        let source = AxeSource::File(PathBuf::from("/nonexistent/axe.min.js"));
        assert!(matches!(AxeScript::load(&source).await, Err(ScanError::Io(_))));
    }

    #[test]
    fn test_default_source_is_pinned_cdn() {
        assert_eq!(AxeSource::default(), AxeSource::Url(AXE_CDN_URL.to_string()));
    }
}
