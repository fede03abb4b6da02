mod cdp_session;
mod chrome_finder;
mod error;
pub mod extractor;
mod fixture;
mod launcher;
mod profile;
mod session;

pub use cdp_session::{ChromeElement, ChromeSession};
pub use chrome_finder::ChromeFinder;
pub use error::{Error, Result};
pub use extractor::{CatalogExtractor, Extractor};
pub use fixture::{ElementSnapshot, FixtureAction, FixtureElement, FixtureSession, PageFixture};
pub use launcher::{ChromeLauncher, DEFAULT_DEBUGGING_PORT};
pub use profile::ProfileDir;
pub use session::{BrowserSession, Locator, PageElement};
