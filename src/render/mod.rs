pub mod html;

use std::time::Duration;

use async_trait::async_trait;
use chromiumoxide::browser::{Browser, BrowserConfig};
use chromiumoxide::cdp::browser_protocol::page::PrintToPdfParams;
use futures_util::StreamExt;

/// Renders an HTML document to a PDF byte buffer.
#[async_trait]
pub trait PdfRenderer: Send + Sync {
    async fn render_pdf(&self, html: &str) -> Result<Vec<u8>, String>;
}

/// Prints through a headless Chromium launched per render. The browser and
/// its event task are torn down on every path, success or failure.
pub struct ChromePdfRenderer {
    executable: Option<String>,
    timeout: Duration,
}

impl ChromePdfRenderer {
    pub fn new(executable: Option<String>, timeout: Duration) -> Self {
        Self {
            executable,
            timeout,
        }
    }

    fn browser_config(&self) -> Result<BrowserConfig, String> {
        let mut builder = BrowserConfig::builder()
            .no_sandbox()
            .arg("--disable-setuid-sandbox")
            .request_timeout(self.timeout);
        if let Some(path) = &self.executable {
            builder = builder.chrome_executable(path);
        }
        builder.build()
    }

    async fn print(&self, browser: &Browser, html: &str) -> Result<Vec<u8>, String> {
        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| format!("Failed to open page: {e}"))?;

        page.set_content(html)
            .await
            .map_err(|e| format!("Failed to load document: {e}"))?;
        page.wait_for_navigation()
            .await
            .map_err(|e| format!("Document did not settle: {e}"))?;

        // A4 in inches, backgrounds included.
        let params = PrintToPdfParams {
            print_background: Some(true),
            paper_width: Some(8.27),
            paper_height: Some(11.69),
            ..Default::default()
        };

        page.pdf(params)
            .await
            .map_err(|e| format!("Failed to print PDF: {e}"))
    }
}

#[async_trait]
impl PdfRenderer for ChromePdfRenderer {
    async fn render_pdf(&self, html: &str) -> Result<Vec<u8>, String> {
        let config = self.browser_config()?;

        let (mut browser, mut handler) =
            tokio::time::timeout(self.timeout, Browser::launch(config))
                .await
                .map_err(|_| "Browser launch timed out".to_string())?
                .map_err(|e| format!("Failed to launch browser: {e}"))?;

        let events = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let result = tokio::time::timeout(self.timeout, self.print(&browser, html))
            .await
            .unwrap_or_else(|_| Err("PDF render timed out".to_string()));

        // Teardown is bounded too: a wedged DevTools connection must not
        // hold the request hostage waiting for child exit.
        match tokio::time::timeout(self.timeout, browser.close()).await {
            Ok(Ok(_)) => {}
            Ok(Err(e)) => tracing::warn!("Failed to close browser: {e}"),
            Err(_) => tracing::warn!("Browser close timed out"),
        }
        if tokio::time::timeout(self.timeout, browser.wait())
            .await
            .is_err()
        {
            tracing::warn!("Browser did not exit in time, killing it");
            if let Some(Err(e)) = browser.kill().await {
                tracing::warn!("Failed to kill browser: {e}");
            }
        }
        events.abort();

        result
    }
}
