use crate::session::{BrowserSession, Locator, PageElement};
use crate::Result;
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;
use std::sync::{Arc, Mutex, PoisonError};

/// Recorded snapshot of the elements a scrape touches, keyed by locator
///
/// ```json
/// { "elements": { ".formacao-instrutor-nome": { "texts": ["Jane Doe"] } } }
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PageFixture {
    #[serde(default)]
    pub elements: HashMap<String, ElementSnapshot>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ElementSnapshot {
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub texts: Vec<String>,
}

fn default_visible() -> bool {
    true
}

/// Interaction performed against a [`FixtureSession`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FixtureAction {
    Navigate(String),
    Maximize,
    Type { locator: String, text: String },
    Submit(String),
    Click(String),
}

type ActionLog = Arc<Mutex<Vec<FixtureAction>>>;

fn record(log: &ActionLog, action: FixtureAction) {
    log.lock().unwrap_or_else(PoisonError::into_inner).push(action);
}

/// Offline browser session that serves a [`PageFixture`]
///
/// Navigation and clicks never change what is served; the fixture holds the
/// search page and the detail page elements side by side.
#[derive(Debug, Default)]
pub struct FixtureSession {
    elements: HashMap<String, ElementSnapshot>,
    actions: ActionLog,
}

impl FixtureSession {
    pub fn new(fixture: PageFixture) -> Self {
        Self {
            elements: fixture.elements,
            actions: ActionLog::default(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self> {
        let fixture: PageFixture = serde_json::from_str(json)?;
        Ok(Self::new(fixture))
    }

    pub fn from_file(path: &Path) -> Result<Self> {
        tracing::debug!("Loading page fixture from {}", path.display());
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Add visible elements matching `locator`, one per text
    pub fn with_element(mut self, locator: &str, texts: &[&str]) -> Self {
        self.elements.insert(
            locator.to_string(),
            ElementSnapshot {
                visible: true,
                texts: texts.iter().map(|t| t.to_string()).collect(),
            },
        );
        self
    }

    /// Add an element that exists but is never rendered
    pub fn with_hidden_element(mut self, locator: &str) -> Self {
        self.elements.insert(
            locator.to_string(),
            ElementSnapshot {
                visible: false,
                texts: Vec::new(),
            },
        );
        self
    }

    /// Everything done to the session so far, in order
    pub fn actions(&self) -> Vec<FixtureAction> {
        self.actions
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

pub struct FixtureElement {
    locator: String,
    text: String,
    actions: ActionLog,
}

#[async_trait]
impl PageElement for FixtureElement {
    async fn text(&self) -> Result<String> {
        Ok(self.text.clone())
    }

    async fn click(&self) -> Result<()> {
        record(&self.actions, FixtureAction::Click(self.locator.clone()));
        Ok(())
    }

    async fn type_text(&self, text: &str) -> Result<()> {
        record(
            &self.actions,
            FixtureAction::Type {
                locator: self.locator.clone(),
                text: text.to_string(),
            },
        );
        Ok(())
    }

    async fn submit(&self) -> Result<()> {
        record(&self.actions, FixtureAction::Submit(self.locator.clone()));
        Ok(())
    }
}

#[async_trait]
impl BrowserSession for FixtureSession {
    type Element = FixtureElement;

    async fn navigate(&self, url: &str) -> Result<()> {
        record(&self.actions, FixtureAction::Navigate(url.to_string()));
        Ok(())
    }

    async fn maximize(&self) -> Result<()> {
        record(&self.actions, FixtureAction::Maximize);
        Ok(())
    }

    async fn find_element(&self, locator: &Locator) -> Result<Option<FixtureElement>> {
        Ok(self.find_elements(locator).await?.into_iter().next())
    }

    async fn find_elements(&self, locator: &Locator) -> Result<Vec<FixtureElement>> {
        let key = locator.to_string();
        let Some(snapshot) = self.elements.get(&key) else {
            return Ok(Vec::new());
        };

        let texts = if snapshot.texts.is_empty() {
            vec![String::new()]
        } else {
            snapshot.texts.clone()
        };

        Ok(texts
            .into_iter()
            .map(|text| FixtureElement {
                locator: key.clone(),
                text,
                actions: Arc::clone(&self.actions),
            })
            .collect())
    }

    async fn is_visible(&self, locator: &Locator) -> Result<bool> {
        Ok(self
            .elements
            .get(&locator.to_string())
            .is_some_and(|snapshot| snapshot.visible))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_fixture_defaults() {
        let session = FixtureSession::from_json(
            r#"{ "elements": { ".a": {}, ".b": { "visible": false, "texts": ["x"] } } }"#,
        )
        .unwrap();

        assert!(session.elements[".a"].visible);
        assert!(session.elements[".a"].texts.is_empty());
        assert!(!session.elements[".b"].visible);
    }

    #[test]
    fn test_invalid_fixture_is_rejected() {
        let result = FixtureSession::from_json(r#"{ "elements": [] }"#);
        assert!(matches!(result, Err(crate::Error::Fixture(_))));
    }

    #[tokio::test]
    async fn test_find_elements_yields_one_per_text() {
        let session = FixtureSession::default().with_element(".result", &["first", "second"]);

        let elements = session
            .find_elements(&Locator::parse(".result"))
            .await
            .unwrap();
        assert_eq!(elements.len(), 2);
        assert_eq!(elements[1].text().await.unwrap(), "second");

        let missing = session
            .find_element(&Locator::parse(".missing"))
            .await
            .unwrap();
        assert!(missing.is_none());
    }

    #[tokio::test]
    async fn test_actions_are_recorded_in_order() {
        let session = FixtureSession::default().with_element("#search", &[]);
        let input = session
            .find_element(&Locator::parse("#search"))
            .await
            .unwrap()
            .unwrap();

        session.navigate("https://example.com/").await.unwrap();
        input.type_text("rust").await.unwrap();
        input.submit().await.unwrap();

        assert_eq!(
            session.actions(),
            vec![
                FixtureAction::Navigate("https://example.com/".to_string()),
                FixtureAction::Type {
                    locator: "#search".to_string(),
                    text: "rust".to_string(),
                },
                FixtureAction::Submit("#search".to_string()),
            ]
        );
    }

    #[tokio::test]
    async fn test_hidden_element_is_not_visible() {
        let session = FixtureSession::default().with_hidden_element(".spinner");
        let locator = Locator::parse(".spinner");

        assert!(!session.is_visible(&locator).await.unwrap());
        assert_eq!(session.find_elements(&locator).await.unwrap().len(), 1);
    }
}
