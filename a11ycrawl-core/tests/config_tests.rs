// Tests for crawl settings and environment overrides

use a11ycrawl_core::config::{
    CrawlSettings, ENV_MAX_DEPTH, ENV_MAX_PAGES, ENV_PAGE_DELAY_MS, ENV_PAGE_TIMEOUT_SECS,
    ENV_SCOPE,
};
use a11ycrawl_core::CoreError;
use a11ycrawl_scanner::ScopePolicy;
use std::collections::HashMap;
use std::time::Duration;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key| map.get(key).cloned()
}

#[test]
fn test_defaults() {
    let settings = CrawlSettings::default();
    assert_eq!(settings.budget.max_depth, 3);
    assert_eq!(settings.budget.max_pages, 50);
    assert_eq!(settings.page_timeout, Duration::from_secs(60));
    assert_eq!(settings.page_delay, Duration::from_millis(200));
    assert_eq!(settings.scope, ScopePolicy::Prefix);
}

#[test]
fn test_no_overrides_keeps_defaults() {
    let settings = CrawlSettings::default().with_overrides(lookup(&[])).unwrap();
    assert_eq!(settings, CrawlSettings::default());
}

#[test]
fn test_overrides_applied() {
    let settings = CrawlSettings::default()
        .with_overrides(lookup(&[
            (ENV_MAX_DEPTH, "1"),
            (ENV_MAX_PAGES, "10"),
            (ENV_PAGE_TIMEOUT_SECS, "5"),
            (ENV_PAGE_DELAY_MS, "0"),
            (ENV_SCOPE, "host"),
        ]))
        .unwrap();

    assert_eq!(settings.budget.max_depth, 1);
    assert_eq!(settings.budget.max_pages, 10);
    assert_eq!(settings.page_timeout, Duration::from_secs(5));
    assert_eq!(settings.page_delay, Duration::ZERO);
    assert_eq!(settings.scope, ScopePolicy::Host);
}

#[test]
fn test_overrides_trim_whitespace() {
    let settings = CrawlSettings::default()
        .with_overrides(lookup(&[(ENV_MAX_PAGES, " 7 ")]))
        .unwrap();
    assert_eq!(settings.budget.max_pages, 7);
}

#[test]
fn test_unparseable_overrides_ignored() {
    let settings = CrawlSettings::default()
        .with_overrides(lookup(&[
            (ENV_MAX_DEPTH, "deep"),
            (ENV_MAX_PAGES, "-1"),
            (ENV_SCOPE, "everywhere"),
        ]))
        .unwrap();
    assert_eq!(settings, CrawlSettings::default());
}

#[test]
fn test_zero_max_pages_rejected() {
    let result = CrawlSettings::default().with_overrides(lookup(&[(ENV_MAX_PAGES, "0")]));
    match result {
        Err(CoreError::Config { field, .. }) => assert_eq!(field, "max_pages"),
        other => panic!("expected config error, got {:?}", other),
    }
}

#[test]
fn test_zero_timeout_rejected() {
    let result =
        CrawlSettings::default().with_overrides(lookup(&[(ENV_PAGE_TIMEOUT_SECS, "0")]));
    assert!(matches!(result, Err(CoreError::Config { .. })));
}

#[test]
fn test_zero_depth_allowed() {
    let settings = CrawlSettings::default()
        .with_overrides(lookup(&[(ENV_MAX_DEPTH, "0")]))
        .unwrap();
    assert_eq!(settings.budget.max_depth, 0);
}

#[test]
fn test_crawler_carries_budget() {
    let settings = CrawlSettings::default()
        .with_overrides(lookup(&[(ENV_MAX_DEPTH, "2"), (ENV_MAX_PAGES, "4")]))
        .unwrap();
    let crawler = settings.crawler();
    assert_eq!(crawler.budget().max_depth, 2);
    assert_eq!(crawler.budget().max_pages, 4);
}
