use crate::server::{self, AppState};
use a11ycrawl_core::config::CrawlSettings;
use a11ycrawl_core::report::{ReportFormat, render_report, save_report};
use a11ycrawl_core::{CrawlOptions, execute_crawl};
use a11ycrawl_scanner::{AxeScript, AxeSource, ChromiumLauncher, ScopePolicy};
use anyhow::{Context, anyhow};
use clap::ArgMatches;
use colored::Colorize;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing::info;
use url::Url;

/// Parse a single line as a URL, trying to add http:// if needed
pub fn parse_url_line(line: &str) -> Option<String> {
    // Try to parse as-is
    if Url::parse(line).is_ok() {
        return Some(line.to_string());
    }

    // Try adding http://
    let with_scheme = format!("http://{}", line);
    if Url::parse(&with_scheme).is_ok() {
        return Some(with_scheme);
    }

    eprintln!("⚠️  Skipping invalid URL '{}'", line);
    None
}

/// Apply the crawl tunables given on the command line on top of `base`.
pub fn settings_from_matches(
    args: &ArgMatches,
    base: CrawlSettings,
) -> a11ycrawl_core::Result<CrawlSettings> {
    let mut settings = base;

    if let Some(depth) = args.get_one::<usize>("max-depth") {
        settings.budget.max_depth = *depth;
    }
    if let Some(pages) = args.get_one::<usize>("max-pages") {
        settings.budget.max_pages = *pages;
    }
    if let Some(secs) = args.get_one::<u64>("page-timeout") {
        settings.page_timeout = Duration::from_secs(*secs);
    }
    if let Some(ms) = args.get_one::<u64>("page-delay") {
        settings.page_delay = Duration::from_millis(*ms);
    }
    if let Some(scope) = args
        .get_one::<String>("scope")
        .and_then(|s| ScopePolicy::from_str(s))
    {
        settings.scope = scope;
    }

    settings.validate()?;
    Ok(settings)
}

/// True when `check` writes a JSON report to stdout, which must then carry
/// nothing but the report.
pub fn json_to_stdout(args: &ArgMatches) -> bool {
    let json = args
        .get_one::<String>("format")
        .and_then(|f| ReportFormat::from_str(f))
        == Some(ReportFormat::Json);
    json && args.get_one::<PathBuf>("output").is_none()
}

pub fn axe_source_from_matches(args: &ArgMatches) -> AxeSource {
    match args.get_one::<PathBuf>("axe-script") {
        Some(path) => AxeSource::File(path.clone()),
        None => AxeSource::default(),
    }
}

async fn launcher_from_matches(args: &ArgMatches) -> anyhow::Result<ChromiumLauncher> {
    let source = axe_source_from_matches(args);
    let axe = AxeScript::load(&source)
        .await
        .with_context(|| format!("Could not load axe-core ({:?})", source))?;

    Ok(ChromiumLauncher::new(axe)
        .with_headless(!args.get_flag("headful"))
        .with_sandbox(args.get_flag("sandbox")))
}

fn print_settings(settings: &CrawlSettings) {
    println!(
        "{} Max depth: {}  Max pages: {}  Scope: {}",
        "→".blue(),
        settings.budget.max_depth.to_string().bright_white(),
        settings.budget.max_pages.to_string().bright_white(),
        settings.scope.as_str().bright_white()
    );
    println!(
        "{} Page timeout: {}s  Page delay: {}ms\n",
        "→".blue(),
        settings.page_timeout.as_secs().to_string().bright_white(),
        settings.page_delay.as_millis().to_string().bright_white()
    );
}

pub async fn handle_serve(args: &ArgMatches) -> anyhow::Result<()> {
    let settings = settings_from_matches(args, CrawlSettings::from_env()?)?;
    let launcher = launcher_from_matches(args).await?;

    let bind = args
        .get_one::<IpAddr>("bind")
        .copied()
        .ok_or_else(|| anyhow!("--bind is required"))?;
    let port = args
        .get_one::<u16>("port")
        .copied()
        .ok_or_else(|| anyhow!("--port is required"))?;
    let addr = SocketAddr::new(bind, port);

    println!("{} Serving accessibility checks on {}", "✓".green().bold(), addr.to_string().bright_white());
    print_settings(&settings);

    let state = AppState {
        launcher: Arc::new(launcher),
        settings,
    };
    server::serve(state, addr).await
}

pub async fn handle_check(args: &ArgMatches, quiet: bool) -> anyhow::Result<()> {
    let raw_url = args
        .get_one::<String>("url")
        .ok_or_else(|| anyhow!("--url is required"))?;
    let url = parse_url_line(raw_url.trim()).ok_or_else(|| anyhow!("Invalid URL '{}'", raw_url))?;
    let format = args
        .get_one::<String>("format")
        .and_then(|f| ReportFormat::from_str(f))
        .unwrap_or(ReportFormat::Text);
    let output = args.get_one::<PathBuf>("output");

    let settings = settings_from_matches(args, CrawlSettings::from_env()?)?;
    let launcher = launcher_from_matches(args).await?;

    if !quiet {
        println!("\n{} Checking {}", "♿".bold(), url.bright_white());
        print_settings(&settings);
    }

    let options = CrawlOptions {
        url: url.clone(),
        settings,
        show_progress_bars: !quiet,
    };
    let summary = execute_crawl(&launcher, options, None)
        .await
        .with_context(|| format!("Accessibility check of {} failed", url))?;

    info!(
        "Audited {} of {} visited page(s)",
        summary.report.aggregated_results.len(),
        summary.pages_visited
    );

    let content = render_report(&summary, format)?;
    match output {
        Some(path) => {
            save_report(&content, path)
                .with_context(|| format!("Could not write report to {}", path.display()))?;
            if !quiet {
                println!(
                    "{} Report saved to {}",
                    "✓".green().bold(),
                    path.display().to_string().bright_white()
                );
            }
        }
        None => print!("{}", content),
    }

    Ok(())
}
