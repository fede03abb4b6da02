use crate::session::{BrowserSession, Locator, PageElement};
use crate::{Error, Result};
use async_trait::async_trait;
use coursescout_core::record::{normalize_duration, normalize_text};
use coursescout_core::CourseRecord;
use std::time::Duration;

/// Catalog landing page with the search box
pub const LANDING_URL: &str = "https://www.alura.com.br/";

/// How long each element gets to become visible
pub const VISIBILITY_TIMEOUT: Duration = Duration::from_secs(10);

/// Locators of the catalog page layout
pub mod selectors {
    pub const SEARCH_INPUT: &str = "#header-barraBusca-form-campoBusca";
    pub const RESULT_LINK: &str = ".busca-resultado-nome";
    pub const DURATION: &str =
        "/html[1]/body[1]/main[1]/section[1]/article[2]/div[1]/div[1]/div[2]/div[1]";
    pub const DESCRIPTION: &str = ".formacao-descricao-texto";
    pub const INSTRUCTOR: &str = ".formacao-instrutor-nome";
}

/// Produces one course record from a search query
#[async_trait]
pub trait Extractor<S: BrowserSession> {
    async fn search(&self, session: &S, query: &str) -> Result<CourseRecord>;
}

/// Scripted search against the course catalog
///
/// Every call walks the same path: landing page, search box, first result,
/// detail page. Multiple matches resolve to the first one. Nothing is cached
/// between calls and any failure ends the search.
#[derive(Debug, Clone, Default)]
pub struct CatalogExtractor;

impl CatalogExtractor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl<S: BrowserSession> Extractor<S> for CatalogExtractor {
    async fn search(&self, session: &S, query: &str) -> Result<CourseRecord> {
        tracing::info!("Searching catalog for \"{}\"", query);

        session.navigate(LANDING_URL).await?;
        if let Err(e) = session.maximize().await {
            tracing::warn!("Could not maximize browser window: {}", e);
        }

        let search_input = Locator::parse(selectors::SEARCH_INPUT);
        session
            .wait_until_visible(&search_input, VISIBILITY_TIMEOUT)
            .await?;
        let input = first_element(session, &search_input).await?;
        input.type_text(query).await?;
        input.submit().await?;

        let result_link = Locator::parse(selectors::RESULT_LINK);
        match session
            .wait_until_visible(&result_link, VISIBILITY_TIMEOUT)
            .await
        {
            Err(Error::ElementNotFound(_)) => return Err(Error::NoResults(query.to_string())),
            other => other?,
        }
        let first_result = session
            .find_element(&result_link)
            .await?
            .ok_or_else(|| Error::NoResults(query.to_string()))?;
        tracing::debug!("Opening first search result");
        first_result.click().await?;

        let duration = Locator::parse(selectors::DURATION);
        session
            .wait_until_visible(&duration, VISIBILITY_TIMEOUT)
            .await?;

        let instructor = first_text(session, &Locator::parse(selectors::INSTRUCTOR)).await?;
        let duration_hours = first_text(session, &duration).await?;
        let description = first_text(session, &Locator::parse(selectors::DESCRIPTION)).await?;

        let record = CourseRecord::new(
            query,
            normalize_text(&instructor),
            normalize_duration(&duration_hours),
            normalize_text(&description),
        );
        tracing::info!(
            "Scraped course taught by {} ({} hours)",
            record.instructor(),
            record.duration_hours()
        );

        Ok(record)
    }
}

async fn first_element<S: BrowserSession>(session: &S, locator: &Locator) -> Result<S::Element> {
    session
        .find_element(locator)
        .await?
        .ok_or_else(|| Error::ElementNotFound(locator.to_string()))
}

async fn first_text<S: BrowserSession>(session: &S, locator: &Locator) -> Result<String> {
    first_element(session, locator).await?.text().await
}
