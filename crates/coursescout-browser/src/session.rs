use crate::{Error, Result};
use async_trait::async_trait;
use std::fmt;
use std::time::Duration;

/// How an element is located on a page
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Locator {
    Css(String),
    XPath(String),
}

impl Locator {
    /// Parse a locator string; absolute XPath expressions start with `/`
    pub fn parse(raw: &str) -> Self {
        if raw.starts_with('/') {
            Locator::XPath(raw.to_string())
        } else {
            Locator::Css(raw.to_string())
        }
    }
}

impl fmt::Display for Locator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Locator::Css(selector) => f.write_str(selector),
            Locator::XPath(path) => f.write_str(path),
        }
    }
}

/// An element handle on the current page
#[async_trait]
pub trait PageElement: Send + Sync {
    /// Rendered text of the element (`innerText`)
    async fn text(&self) -> Result<String>;

    async fn click(&self) -> Result<()>;

    async fn type_text(&self, text: &str) -> Result<()>;

    /// Submit the form the element belongs to
    async fn submit(&self) -> Result<()>;
}

/// A single browser tab that can be driven step by step
#[async_trait]
pub trait BrowserSession: Send + Sync {
    type Element: PageElement;

    async fn navigate(&self, url: &str) -> Result<()>;

    async fn maximize(&self) -> Result<()>;

    /// First element matching `locator`, if any
    async fn find_element(&self, locator: &Locator) -> Result<Option<Self::Element>>;

    /// All elements matching `locator`, in document order
    async fn find_elements(&self, locator: &Locator) -> Result<Vec<Self::Element>>;

    /// Whether the first element matching `locator` is currently rendered
    async fn is_visible(&self, locator: &Locator) -> Result<bool>;

    /// Poll until `locator` is visible or `timeout` elapses
    ///
    /// Polls every 100ms, doubling up to 1s, and never sleeps past the
    /// deadline. A single check is cut off at the deadline too. Lookup errors
    /// while polling count as "not visible yet".
    async fn wait_until_visible(&self, locator: &Locator, timeout: Duration) -> Result<()> {
        let deadline = tokio::time::Instant::now() + timeout;
        let mut poll_interval = Duration::from_millis(100);
        let max_interval = Duration::from_secs(1);

        loop {
            let remaining = deadline.saturating_duration_since(tokio::time::Instant::now());
            match tokio::time::timeout(remaining, self.is_visible(locator)).await {
                Ok(Ok(true)) => return Ok(()),
                Ok(Ok(false)) => {}
                Ok(Err(e)) => tracing::debug!("Visibility check for {} failed: {}", locator, e),
                Err(_) => tracing::debug!("Visibility check for {} hit the deadline", locator),
            }

            let now = tokio::time::Instant::now();
            if now >= deadline {
                tracing::debug!(
                    "{} not visible after {}ms",
                    locator,
                    timeout.as_millis()
                );
                return Err(Error::ElementNotFound(locator.to_string()));
            }

            tokio::time::sleep(poll_interval.min(deadline - now)).await;
            poll_interval = (poll_interval * 2).min(max_interval);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_locator_displays_raw_expression() {
        assert_eq!(Locator::parse("#search").to_string(), "#search");
        assert_eq!(Locator::parse("/html[1]").to_string(), "/html[1]");
    }

    #[test]
    fn test_locator_parse_detects_xpath() {
        assert_eq!(
            Locator::parse("/html[1]/body[1]"),
            Locator::XPath("/html[1]/body[1]".to_string())
        );
        assert_eq!(
            Locator::parse(".formacao-instrutor-nome"),
            Locator::Css(".formacao-instrutor-nome".to_string())
        );
    }
}
