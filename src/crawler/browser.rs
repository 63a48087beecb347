//! Headless Chromium renderer
//!
//! Available with the `browser` feature. A single browser tab is reused for
//! every page, so scripts run and the captured markup reflects the DOM after
//! the settle policy has elapsed.

use crate::crawler::renderer::{Navigation, PageRenderer};
use crate::{MirrorError, RenderError};
use async_trait::async_trait;
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures::StreamExt;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use url::Url;

/// Renderer backed by a headless Chromium instance
pub struct BrowserRenderer {
    browser: Mutex<Browser>,
    page: Page,
    handler: Mutex<Option<JoinHandle<()>>>,
}

impl BrowserRenderer {
    /// Launches Chromium and opens the tab used for the whole run
    ///
    /// # Arguments
    ///
    /// * `request_timeout` - Upper bound on a single DevTools request
    /// * `user_agent` - Value sent as the `User-Agent` header
    pub async fn launch(request_timeout: Duration, user_agent: &str) -> Result<Self, MirrorError> {
        let config = BrowserConfig::builder()
            .no_sandbox()
            .request_timeout(request_timeout)
            .arg("--disable-gpu")
            .arg("--disable-dev-shm-usage")
            .build()
            .map_err(MirrorError::Browser)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| MirrorError::Browser(e.to_string()))?;

        // The handler drives the DevTools connection and must be polled
        let handle = tokio::spawn(async move {
            while let Some(event) = handler.next().await {
                if event.is_err() {
                    break;
                }
            }
        });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| MirrorError::Browser(e.to_string()))?;

        page.set_user_agent(user_agent)
            .await
            .map_err(|e| MirrorError::Browser(e.to_string()))?;

        tracing::info!("Launched headless browser");

        Ok(Self {
            browser: Mutex::new(browser),
            page,
            handler: Mutex::new(Some(handle)),
        })
    }
}

#[async_trait]
impl PageRenderer for BrowserRenderer {
    async fn navigate(&self, url: &Url) -> Result<Navigation, RenderError> {
        self.page
            .goto(url.as_str())
            .await
            .map_err(|e| RenderError::Navigation(e.to_string()))?;

        let request = self
            .page
            .wait_for_navigation_response()
            .await
            .map_err(|e| RenderError::Navigation(e.to_string()))?;

        let status = match request.as_ref().and_then(|r| r.response.as_ref()) {
            Some(response) => u16::try_from(response.status).unwrap_or(0),
            None => {
                tracing::debug!("No main-frame response recorded for {}", url);
                200
            }
        };

        let final_url = self
            .page
            .url()
            .await
            .ok()
            .flatten()
            .and_then(|u| Url::parse(&u).ok())
            .unwrap_or_else(|| url.clone());

        Ok(Navigation { status, final_url })
    }

    async fn content(&self) -> Result<String, RenderError> {
        self.page
            .content()
            .await
            .map_err(|e| RenderError::Content(e.to_string()))
    }

    async fn close(&self) -> Result<(), RenderError> {
        {
            let mut browser = self.browser.lock().await;
            browser
                .close()
                .await
                .map_err(|e| RenderError::Navigation(e.to_string()))?;
            let _ = browser.wait().await;
        }

        if let Some(handle) = self.handler.lock().await.take() {
            let _ = handle.await;
        }

        tracing::info!("Closed headless browser");
        Ok(())
    }
}
