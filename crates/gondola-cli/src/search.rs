//! `search` and `sources` command handlers.

use std::fmt::Write as _;
use std::sync::Arc;

use gondola_core::{format_report, load_sources, AppConfig, SourceConfig, SourcesFile};
use gondola_scraper::{aggregate, WebDriverBrowser};

/// Picks the sources named in `names`, in the order given. An empty filter
/// selects every configured source in file order.
pub(crate) fn select_sources(
    file: &SourcesFile,
    names: &[String],
) -> anyhow::Result<Vec<SourceConfig>> {
    if names.is_empty() {
        return Ok(file.sources.clone());
    }

    names
        .iter()
        .map(|name| {
            file.find(name).cloned().ok_or_else(|| {
                let known: Vec<&str> = file.sources.iter().map(|s| s.name.as_str()).collect();
                anyhow::anyhow!("unknown source '{name}' (configured: {})", known.join(", "))
            })
        })
        .collect()
}

/// Runs the search across the selected sources and prints the report.
///
/// Per-source failures are part of the report and do not fail the command.
pub(crate) async fn run_search(
    config: &AppConfig,
    term: &str,
    source_names: &[String],
    json: bool,
) -> anyhow::Result<()> {
    if term.trim().is_empty() {
        anyhow::bail!("search term cannot be empty");
    }

    let file = load_sources(&config.sources_path)?;
    let sources = select_sources(&file, source_names)?;
    let browser = WebDriverBrowser::from_config(config);

    tracing::info!(
        search_term = term,
        sources = sources.len(),
        webdriver_url = %config.webdriver_url,
        "starting search"
    );
    let report = aggregate(Arc::new(browser), term, &sources).await;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print!("{}", format_report(&report));
    }

    if report.failed_sources() > 0 {
        tracing::warn!(
            failed = report.failed_sources(),
            total = report.len(),
            "some sources failed"
        );
    }
    Ok(())
}

/// One line per source: name, base URL and pagination cap.
pub(crate) fn render_sources(file: &SourcesFile) -> String {
    let mut out = String::new();
    for source in &file.sources {
        let _ = writeln!(
            out,
            "{:<12} {}  (max {} load-more pages)",
            source.name, source.base_url, source.max_pagination_iterations
        );
    }
    out
}

pub(crate) fn run_sources(config: &AppConfig) -> anyhow::Result<()> {
    let file = load_sources(&config.sources_path)?;
    print!("{}", render_sources(&file));
    Ok(())
}
