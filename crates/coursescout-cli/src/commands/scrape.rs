use crate::{report, OutputFormat};
use anyhow::Result;
use coursescout_browser::{
    BrowserSession, CatalogExtractor, ChromeFinder, ChromeLauncher, ChromeSession, Extractor,
    FixtureSession, ProfileDir,
};
use coursescout_core::{CourseRecord, CourseStore, MemoryStore};
use std::path::PathBuf;
use std::time::Duration;

/// Course searched for when no `--query` is given
pub const DEFAULT_QUERY: &str = "Formação Modelagem e Melhorias de Processos de Negócios";

pub struct ScrapeOptions {
    pub query: String,
    pub chrome_path: Option<PathBuf>,
    pub profile: Option<String>,
    pub headless: bool,
    pub port: u16,
    pub fixture: Option<PathBuf>,
    pub format: OutputFormat,
}

pub fn execute(options: ScrapeOptions) -> Result<()> {
    tracing::debug!("Report format: {}", options.format.as_str());

    // One logical actor: everything runs on the current thread
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    let mut store = MemoryStore::new();
    let outcome = runtime.block_on(scrape(&options, &mut store));
    runtime.shutdown_timeout(Duration::from_millis(100));

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    match outcome {
        Ok(course) => report::write_success(&mut out, &course, options.format),
        Err(e) if is_verification_failure(&e) => {
            tracing::debug!("{}", e);
            report::write_failure(&mut out)
        }
        Err(e) => Err(e),
    }
}

async fn scrape(options: &ScrapeOptions, store: &mut MemoryStore) -> Result<CourseRecord> {
    let extractor = CatalogExtractor::new();

    if let Some(fixture) = &options.fixture {
        tracing::info!("Replaying page fixture {}", fixture.display());
        let session = FixtureSession::from_file(fixture)?;
        return run_pipeline(&extractor, &session, store, &options.query).await;
    }

    let session = launch_chrome(options).await?;
    let outcome = run_pipeline(&extractor, &session, store, &options.query).await;

    // Released on success and failure alike; the Drop impl covers panics
    if let Err(e) = session.shutdown().await {
        tracing::warn!("Chrome did not shut down cleanly: {}", e);
    }

    outcome
}

async fn launch_chrome(options: &ScrapeOptions) -> Result<ChromeSession> {
    let chrome_binary = ChromeFinder::new(options.chrome_path.clone()).find()?;
    tracing::info!("Found Chrome at: {}", chrome_binary.display());

    let profile = if let Some(profile_name) = &options.profile {
        let profile_path = dirs::home_dir()
            .ok_or_else(|| anyhow::anyhow!("Could not determine home directory"))?
            .join(".coursescout")
            .join("profiles")
            .join(profile_name);

        tracing::info!("Using profile: {}", profile_path.display());
        ProfileDir::persistent(profile_path)?
    } else {
        tracing::debug!("Using temporary profile");
        ProfileDir::temporary()?
    };

    let launcher = ChromeLauncher::new(chrome_binary, profile.path().to_path_buf())
        .with_debugging_port(options.port)
        .headless(options.headless);

    Ok(ChromeSession::start(&launcher, profile).await?)
}

/// Search, store, then read the course back by its title
///
/// Fails with [`coursescout_core::Error::InsertVerificationFailed`] when the
/// freshly inserted course cannot be found again.
pub async fn run_pipeline<S, E, St>(
    extractor: &E,
    session: &S,
    store: &mut St,
    query: &str,
) -> Result<CourseRecord>
where
    S: BrowserSession,
    E: Extractor<S>,
    St: CourseStore,
{
    let course = extractor.search(session, query).await?;

    let id = store.insert(course)?;
    tracing::info!("Stored course with id {}", id);

    let stored = store
        .find_by_title(query)
        .map_err(|_| coursescout_core::Error::InsertVerificationFailed(query.to_string()))?;

    Ok(stored.clone())
}

fn is_verification_failure(err: &anyhow::Error) -> bool {
    matches!(
        err.downcast_ref::<coursescout_core::Error>(),
        Some(coursescout_core::Error::InsertVerificationFailed(_))
    )
}
