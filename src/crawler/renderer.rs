//! Page renderer adapter
//!
//! The orchestrator drives pages through a single renderer, one page at a
//! time, the way a browser drives a single tab: navigate, let the page
//! settle, then read the final markup.

use crate::config::UserAgentConfig;
use crate::RenderError;
use async_trait::async_trait;
use reqwest::Client;
use std::sync::Mutex;
use url::Url;

/// Outcome of navigating to a page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Navigation {
    /// HTTP status of the main document
    pub status: u16,

    /// URL the renderer ended up on after redirects
    pub final_url: Url,
}

impl Navigation {
    /// Returns true for a 2xx status
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Something that can load a page and hand back its final markup
///
/// Calls are strictly sequential: `content` always refers to the most
/// recent successful `navigate`.
#[async_trait]
pub trait PageRenderer: Send + Sync {
    /// Loads `url` and reports the main document's HTTP outcome
    async fn navigate(&self, url: &Url) -> Result<Navigation, RenderError>;

    /// Returns the markup of the page loaded by the last `navigate`
    async fn content(&self) -> Result<String, RenderError>;

    /// Releases the renderer's resources at the end of a run
    async fn close(&self) -> Result<(), RenderError> {
        Ok(())
    }
}

/// Renderer that fetches pages with a plain HTTP GET
///
/// No scripts are executed; the markup is the document as served.
pub struct HttpRenderer {
    client: Client,
    current: Mutex<Option<String>>,
}

impl HttpRenderer {
    /// Creates a renderer using an existing client
    pub fn new(client: Client) -> Self {
        Self {
            client,
            current: Mutex::new(None),
        }
    }

    /// Creates a renderer with a client identifying as `user_agent`
    pub fn from_config(user_agent: &UserAgentConfig) -> Result<Self, reqwest::Error> {
        Ok(Self::new(super::build_http_client(user_agent)?))
    }

    fn replace_current(&self, markup: Option<String>) -> Result<Option<String>, RenderError> {
        let mut current = self
            .current
            .lock()
            .map_err(|_| RenderError::Content("renderer state poisoned".to_string()))?;
        Ok(std::mem::replace(&mut *current, markup))
    }
}

#[async_trait]
impl PageRenderer for HttpRenderer {
    async fn navigate(&self, url: &Url) -> Result<Navigation, RenderError> {
        self.replace_current(None)?;

        let response = self
            .client
            .get(url.clone())
            .send()
            .await
            .map_err(|e| RenderError::Navigation(e.to_string()))?;

        let status = response.status().as_u16();
        let final_url = response.url().clone();

        let body = response
            .text()
            .await
            .map_err(|e| RenderError::Navigation(e.to_string()))?;

        self.replace_current(Some(body))?;

        Ok(Navigation { status, final_url })
    }

    async fn content(&self) -> Result<String, RenderError> {
        self.replace_current(None)?
            .ok_or_else(|| RenderError::Content("no page loaded".to_string()))
    }
}
