use a11ycrawl::commands::command_argument_builder;
use a11ycrawl::handlers::*;
use a11ycrawl_core::config::CrawlSettings;
use a11ycrawl_core::CoreError;
use a11ycrawl_scanner::{AxeSource, ScopePolicy};
use clap::ArgMatches;
use std::path::PathBuf;
use std::time::Duration;

fn subcommand_matches(argv: &[&str]) -> ArgMatches {
    let matches = command_argument_builder()
        .try_get_matches_from(argv)
        .unwrap();
    let (_, sub) = matches.subcommand().unwrap();
    sub.clone()
}

#[test]
fn test_parse_url_line_with_scheme() {
    let result = parse_url_line("https://example.com");
    assert_eq!(result, Some("https://example.com".to_string()));
}

#[test]
fn test_parse_url_line_without_scheme() {
    let result = parse_url_line("example.com");
    assert_eq!(result, Some("http://example.com".to_string()));
}

#[test]
fn test_parse_url_line_invalid() {
    let result = parse_url_line("not a valid url!!!");
    assert_eq!(result, None);
}

#[test]
fn test_settings_defaults_without_flags() {
    let args = subcommand_matches(&["a11ycrawl", "check", "-u", "https://example.com"]);
    let settings = settings_from_matches(&args, CrawlSettings::default()).unwrap();
    assert_eq!(settings, CrawlSettings::default());
}

#[test]
fn test_settings_flags_override_base() {
    let args = subcommand_matches(&[
        "a11ycrawl",
        "check",
        "-u",
        "https://example.com",
        "--max-depth",
        "1",
        "--max-pages",
        "5",
        "--page-timeout",
        "10",
        "--page-delay",
        "0",
        "--scope",
        "host",
    ]);
    let settings = settings_from_matches(&args, CrawlSettings::default()).unwrap();

    assert_eq!(settings.budget.max_depth, 1);
    assert_eq!(settings.budget.max_pages, 5);
    assert_eq!(settings.page_timeout, Duration::from_secs(10));
    assert_eq!(settings.page_delay, Duration::ZERO);
    assert_eq!(settings.scope, ScopePolicy::Host);
}

#[test]
fn test_settings_zero_max_pages_rejected() {
    let args = subcommand_matches(&["a11ycrawl", "serve", "--max-pages", "0"]);
    let result = settings_from_matches(&args, CrawlSettings::default());
    assert!(matches!(result, Err(CoreError::Config { .. })));
}

#[test]
fn test_axe_source_defaults_to_cdn() {
    let args = subcommand_matches(&["a11ycrawl", "serve"]);
    assert_eq!(axe_source_from_matches(&args), AxeSource::default());
}

#[test]
fn test_axe_source_from_file() {
    let args = subcommand_matches(&["a11ycrawl", "serve", "--axe-script", "/opt/axe.min.js"]);
    assert_eq!(
        axe_source_from_matches(&args),
        AxeSource::File(PathBuf::from("/opt/axe.min.js"))
    );
}

#[test]
fn test_serve_defaults() {
    let args = subcommand_matches(&["a11ycrawl", "serve"]);
    assert_eq!(
        args.get_one::<std::net::IpAddr>("bind").unwrap().to_string(),
        "0.0.0.0"
    );
    assert_eq!(*args.get_one::<u16>("port").unwrap(), 3001);
    assert!(!args.get_flag("headful"));
}

#[test]
fn test_check_requires_url() {
    let result = command_argument_builder().try_get_matches_from(["a11ycrawl", "check"]);
    assert!(result.is_err());
}

#[test]
fn test_check_rejects_unknown_format() {
    let result = command_argument_builder().try_get_matches_from([
        "a11ycrawl",
        "check",
        "-u",
        "https://example.com",
        "--format",
        "csv",
    ]);
    assert!(result.is_err());
}

#[test]
fn test_scope_rejects_unknown_value() {
    let result =
        command_argument_builder().try_get_matches_from(["a11ycrawl", "serve", "--scope", "domain"]);
    assert!(result.is_err());
}

#[test]
fn test_json_to_stdout_only_for_unsaved_json() {
    let json = subcommand_matches(&["a11ycrawl", "check", "-u", "https://example.com", "-f", "json"]);
    assert!(json_to_stdout(&json));

    let saved = subcommand_matches(&[
        "a11ycrawl",
        "check",
        "-u",
        "https://example.com",
        "-f",
        "json",
        "-o",
        "report.json",
    ]);
    assert!(!json_to_stdout(&saved));

    let text = subcommand_matches(&["a11ycrawl", "check", "-u", "https://example.com"]);
    assert!(!json_to_stdout(&text));
}
