use crate::session::{BrowserSession, Locator, PageElement};
use crate::{ChromeLauncher, Error, ProfileDir, Result};
use async_trait::async_trait;
use chromiumoxide::browser::Browser;
use chromiumoxide::cdp::browser_protocol::browser::{
    Bounds, GetWindowForTargetParams, SetWindowBoundsParams, WindowState,
};
use chromiumoxide::element::Element;
use chromiumoxide::Page;
use futures::StreamExt;
use std::process::Child;
use std::time::Duration;
use tokio::task::JoinHandle;

const CONNECT_ATTEMPTS: u32 = 5;

const IS_VISIBLE_JS: &str = "function() { \
    const style = window.getComputedStyle(this); \
    const rect = this.getBoundingClientRect(); \
    return style.visibility !== 'hidden' && style.display !== 'none' \
        && rect.width > 0 && rect.height > 0; \
}";

const SUBMIT_JS: &str = "function() { \
    if (!this.form) { return false; } \
    if (this.form.requestSubmit) { this.form.requestSubmit(); } else { this.form.submit(); } \
    return true; \
}";

/// Browser session backed by a Chrome process driven over CDP
///
/// The Chrome process is owned by the session. Call [`ChromeSession::shutdown`]
/// to close it gracefully; dropping the session kills the process instead.
pub struct ChromeSession {
    browser: Browser,
    page: Page,
    handler_task: JoinHandle<()>,
    process: Option<Child>,
    _profile: ProfileDir,
}

impl ChromeSession {
    /// Launch Chrome and attach to its first tab
    pub async fn start(launcher: &ChromeLauncher, profile: ProfileDir) -> Result<Self> {
        let mut process = launcher.launch()?;
        tracing::info!("Chrome started (pid {})", process.id());

        match connect(launcher.debugging_port()).await {
            Ok((browser, page, handler_task)) => Ok(Self {
                browser,
                page,
                handler_task,
                process: Some(process),
                _profile: profile,
            }),
            Err(e) => {
                terminate_process(&mut process);
                Err(e)
            }
        }
    }

    /// Close the browser and make sure the Chrome process is gone
    pub async fn shutdown(mut self) -> Result<()> {
        tracing::info!("Closing Chrome");
        let closed = self.browser.close().await;
        self.release();
        closed.map(|_| ()).map_err(Error::from)
    }

    fn release(&mut self) {
        self.handler_task.abort();
        if let Some(mut process) = self.process.take() {
            terminate_process(&mut process);
        }
    }
}

impl Drop for ChromeSession {
    fn drop(&mut self) {
        self.release();
    }
}

async fn connect(debugging_port: u16) -> Result<(Browser, Page, JoinHandle<()>)> {
    // Chrome needs a moment before the debugging endpoint accepts connections
    let ws_url = format!("http://localhost:{}", debugging_port);
    let (browser, mut handler) = {
        let mut attempts_left = CONNECT_ATTEMPTS;
        loop {
            tracing::debug!("Attempting CDP connection to {}...", ws_url);
            match Browser::connect(&ws_url).await {
                Ok(result) => {
                    tracing::info!("CDP connection established");
                    break result;
                }
                Err(e) => {
                    attempts_left -= 1;
                    if attempts_left == 0 {
                        return Err(Error::Cdp(format!(
                            "Failed to connect to Chrome after {} attempts: {}",
                            CONNECT_ATTEMPTS, e
                        )));
                    }
                    tracing::debug!(
                        "CDP connection attempt failed, {} attempts left",
                        attempts_left
                    );
                    tokio::time::sleep(Duration::from_millis(500)).await;
                }
            }
        }
    };

    // The handler must be polled for any browser command to complete
    let handler_task = tokio::spawn(async move {
        while let Some(event) = handler.next().await {
            if let Err(e) = event {
                tracing::debug!("CDP handler event error (continuing): {}", e);
            }
        }
    });

    let page = match browser.pages().await?.into_iter().next() {
        Some(page) => page,
        None => browser.new_page("about:blank").await?,
    };

    Ok((browser, page, handler_task))
}

fn terminate_process(process: &mut Child) {
    match process.try_wait() {
        Ok(Some(status)) => tracing::debug!("Chrome exited ({})", status),
        _ => {
            if let Err(e) = process.kill() {
                tracing::warn!("Failed to kill Chrome (pid {}): {}", process.id(), e);
            }
            let _ = process.wait();
        }
    }
}

/// Element handle on a Chrome page
pub struct ChromeElement {
    inner: Element,
}

#[async_trait]
impl PageElement for ChromeElement {
    async fn text(&self) -> Result<String> {
        Ok(self.inner.inner_text().await?.unwrap_or_default())
    }

    async fn click(&self) -> Result<()> {
        self.inner.click().await?;
        Ok(())
    }

    async fn type_text(&self, text: &str) -> Result<()> {
        self.inner.focus().await?;
        self.inner.type_str(text).await?;
        Ok(())
    }

    async fn submit(&self) -> Result<()> {
        let submitted = self
            .inner
            .call_js_fn(SUBMIT_JS, false)
            .await?
            .result
            .value
            .and_then(|v| v.as_bool())
            .unwrap_or(false);

        if !submitted {
            // Not inside a form: behave like a user pressing Enter in the field
            self.inner.press_key("Enter").await?;
        }
        Ok(())
    }
}

#[async_trait]
impl BrowserSession for ChromeSession {
    type Element = ChromeElement;

    async fn navigate(&self, url: &str) -> Result<()> {
        tracing::debug!("Navigating to {}", url);
        self.page.goto(url).await?;
        Ok(())
    }

    async fn maximize(&self) -> Result<()> {
        let window = self
            .page
            .execute(GetWindowForTargetParams::default())
            .await?;
        let bounds = Bounds::builder()
            .window_state(WindowState::Maximized)
            .build();
        self.page
            .execute(SetWindowBoundsParams::new(
                window.result.window_id.clone(),
                bounds,
            ))
            .await?;
        Ok(())
    }

    async fn find_element(&self, locator: &Locator) -> Result<Option<ChromeElement>> {
        Ok(self.find_elements(locator).await?.into_iter().next())
    }

    async fn find_elements(&self, locator: &Locator) -> Result<Vec<ChromeElement>> {
        let elements = match locator {
            Locator::Css(selector) => self.page.find_elements(selector.as_str()).await?,
            Locator::XPath(path) => self.page.find_xpaths(path.as_str()).await?,
        };

        Ok(elements
            .into_iter()
            .map(|inner| ChromeElement { inner })
            .collect())
    }

    async fn is_visible(&self, locator: &Locator) -> Result<bool> {
        let Some(element) = self.find_element(locator).await? else {
            return Ok(false);
        };

        let visible = element
            .inner
            .call_js_fn(IS_VISIBLE_JS, false)
            .await?
            .result
            .value
            .and_then(|v| v.as_bool())
            .unwrap_or(false);
        Ok(visible)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_scripts_are_function_declarations() {
        for script in [IS_VISIBLE_JS, SUBMIT_JS] {
            assert!(script.starts_with("function() {"));
            assert!(script.trim_end().ends_with('}'));
        }
    }

    #[cfg(unix)]
    #[test]
    fn test_terminate_kills_running_process() {
        let mut child = std::process::Command::new("sleep").arg("60").spawn().unwrap();
        assert!(child.try_wait().unwrap().is_none());

        terminate_process(&mut child);

        assert!(child.try_wait().unwrap().is_some());
    }

    #[cfg(unix)]
    #[test]
    fn test_terminate_tolerates_exited_process() {
        let mut child = std::process::Command::new("true").spawn().unwrap();
        child.wait().unwrap();

        terminate_process(&mut child);

        let status = child.try_wait().unwrap().unwrap();
        assert!(status.success());
    }

    // Driving a real ChromeSession needs a Chrome binary; the extraction flow
    // is covered against FixtureSession in tests/extractor.rs
}
