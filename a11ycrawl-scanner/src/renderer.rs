use crate::audit::AuditResult;
use crate::error::Result;

/// A browsing context the crawler drives one page at a time.
///
/// `extract_links` reads the page most recently loaded by
/// `render_and_audit`; it is only called after a successful render.
#[async_trait::async_trait]
pub trait Renderer: Send {
    /// Load `url` and run the accessibility audit on it.
    async fn render_and_audit(&mut self, url: &str) -> Result<AuditResult>;

    /// Raw `href` values of every anchor in the rendered DOM.
    async fn extract_links(&mut self) -> Result<Vec<String>>;

    /// Release the browsing context.
    async fn close(&mut self) -> Result<()>;
}

/// Creates an independent rendering context for each crawl.
#[async_trait::async_trait]
pub trait RendererLauncher: Send + Sync {
    async fn launch(&self) -> Result<Box<dyn Renderer>>;
}

#[async_trait::async_trait]
impl<R: Renderer + ?Sized> Renderer for Box<R> {
    async fn render_and_audit(&mut self, url: &str) -> Result<AuditResult> {
        (**self).render_and_audit(url).await
    }

    async fn extract_links(&mut self) -> Result<Vec<String>> {
        (**self).extract_links().await
    }

    async fn close(&mut self) -> Result<()> {
        (**self).close().await
    }
}
