use std::cell::RefCell;
use std::sync::Once;

use rsclearurls::{
    CleanContext, CleanEngine, CleanerConfig, ConfigManager, RsclearurlsError, RuleLoader,
    TracingLogger,
};
use tracing_subscriber::EnvFilter;

static INIT_LOG: Once = Once::new();

/// 测试日志：RUST_LOG 未设置时输出 rsclearurls 的 debug 日志
fn init_test_log() {
    INIT_LOG.call_once(|| {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new("rsclearurls=debug"));
        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .try_init();
    });
}

const CATALOG: &str = r#"{
    "providers": {
        "p1": {
            "urlPattern": ".*example\\.com.*",
            "rules": ["utm_.*", "fbclid"],
            "referralMarketing": ["tag"],
            "exceptions": [".*example\\.com/keep.*"]
        },
        "p2": {
            "urlPattern": "^https?://p2\\.test",
            "forceRedirection": true,
            "redirections": ["(?:\\?|&)url=([^&]+)"]
        },
        "shop": {
            "urlPattern": "^https?://shop\\.test",
            "rules": ["ref"],
            "rawRules": ["/ref=[^/?]*"],
            "methods": ["GET"]
        },
        "tracker": {
            "urlPattern": "^https?://tracker\\.test",
            "completeProvider": true
        },
        "first": {
            "urlPattern": "^https?://order\\.test",
            "rules": ["a"]
        },
        "second": {
            "urlPattern": "^https?://order\\.test",
            "redirections": ["[?&]a=([^&]+)"]
        }
    }
}"#;

fn engine() -> CleanEngine {
    init_test_log();
    CleanEngine::from_json_str(CATALOG, CleanerConfig::default()).unwrap()
}

#[test]
fn test_end_to_end_field_removal() {
    let result = engine()
        .clean_url("https://example.com/?utm_source=x&fbclid=y&id=1#frag=2")
        .unwrap();

    assert!(result.changes);
    assert!(!result.redirect);
    assert_eq!(result.url, "https://example.com/?id=1#frag=2");
    assert_eq!(result.providers, vec!["p1"]);
}

#[test]
fn test_end_to_end_redirect() {
    let result = engine()
        .clean_url("https://p2.test/out?url=http%3A%2F%2Fdest.test%2Fa")
        .unwrap();

    assert!(result.redirect);
    assert!(result.force_redirect);
    assert_eq!(result.url, "http://dest.test/a");
}

#[test]
fn test_exception_bypasses_provider() {
    let url = "https://example.com/keep?utm_source=x";
    let result = engine().clean_url(url).unwrap();
    assert!(!result.changes);
    assert!(result.providers.is_empty());
    assert_eq!(result.url, url);
}

#[test]
fn test_referral_marketing_switch() {
    let url = "https://example.com/item?tag=aff-20&id=3";

    let stripped = engine().clean_url(url).unwrap();
    assert_eq!(stripped.url, "https://example.com/item?id=3");

    let config = ConfigManager::custom().referral_marketing(true).build();
    let allowed = CleanEngine::from_json_str(CATALOG, config)
        .unwrap()
        .clean_url(url)
        .unwrap();
    assert!(!allowed.changes);
    assert_eq!(allowed.url, url);
}

#[test]
fn test_raw_rules_and_method_filter() {
    let url = "https://shop.test/item/ref=sr_1?ref=abc&q=1";

    let get = CleanContext::with_method("GET");
    let result = engine().clean(url, Some(&get), None).unwrap();
    assert!(result.changes);
    assert_eq!(result.url, "https://shop.test/item?q=1");

    let post = CleanContext::with_method("POST");
    let result = engine().clean(url, Some(&post), None).unwrap();
    assert!(!result.changes);
    assert_eq!(result.url, url);
}

#[test]
fn test_domain_blocking_and_switch() {
    let url = "https://tracker.test/pixel?id=1";
    let result = engine().clean_url(url).unwrap();
    assert!(result.cancel);
    assert_eq!(result.url, url);

    let config = ConfigManager::custom().domain_blocking(false).build();
    let result = CleanEngine::from_json_str(CATALOG, config)
        .unwrap()
        .clean_url(url)
        .unwrap();
    assert!(!result.cancel);
    assert!(result.changes);
    assert_eq!(result.url, "https://tracker.test/pixel");
}

#[test]
fn test_local_addresses_untouched() {
    let json = r#"{"providers": {"all": {"urlPattern": ".*", "rules": ["x"]}}}"#;
    let engine = CleanEngine::from_json_str(json, CleanerConfig::default()).unwrap();

    for url in ["http://127.0.0.1/?x=1", "http://localhost/?x=1", "http://192.168.1.5/?x=1"] {
        let result = engine.clean_url(url).unwrap();
        assert!(!result.changes, "{url}");
        assert_eq!(result.url, url);
    }

    let result = engine.clean_url("http://8.8.8.8/?x=1").unwrap();
    assert!(result.changes);
    assert_eq!(result.url, "http://8.8.8.8/");
}

#[test]
fn test_provider_order_decides_outcome() {
    // first 先移除 a，second 的重定向不再命中
    let result = engine().clean_url("https://order.test/?a=http%3A%2F%2Fdest.test&b=1").unwrap();
    assert!(!result.redirect);
    assert!(result.changes);
    assert_eq!(result.url, "https://order.test/?b=1");
    assert_eq!(result.providers, vec!["first", "second"]);
}

#[test]
fn test_idempotence() {
    let engine = engine();
    let get = CleanContext::with_method("GET");
    for url in [
        "https://example.com/?utm_source=x&fbclid=y&id=1#frag=2",
        "https://example.com/a?q=a+b&flag&tag=1",
        "https://shop.test/item/ref=sr_1?ref=abc&q=1",
        "https://unrelated.test/?utm_source=1",
    ] {
        let once = engine.clean(url, Some(&get), None).unwrap();
        let twice = engine.clean(&once.url, Some(&get), None).unwrap();
        assert_eq!(once.url, twice.url, "{url}");
        assert!(!twice.changes, "{url}");
    }
}

#[test]
fn test_logger_records_rules() {
    let records = RefCell::new(Vec::new());
    let logger = |before: &str, after: &str, rule: &str| {
        records
            .borrow_mut()
            .push((before.to_string(), after.to_string(), rule.to_string()));
    };

    engine()
        .clean("https://example.com/?fbclid=1&id=2", None, Some(&logger))
        .unwrap();

    let records = records.into_inner();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].0, "https://example.com/?fbclid=1&id=2");
    assert_eq!(records[0].1, "https://example.com/?id=2");
    assert_eq!(records[0].2, "fbclid");
}

#[test]
fn test_result_serializes_camel_case() {
    let result = engine()
        .clean_url("https://p2.test/out?url=dest.test")
        .unwrap();
    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["forceRedirect"], true);
    assert_eq!(json["url"], "http://dest.test");
    assert_eq!(json["providers"][0], "p2");
}

#[test]
fn test_catalog_errors() {
    let err = RuleLoader::from_json_str(r#"{"providers": {"bad": {"rules": ["("]}}}"#).unwrap_err();
    assert!(matches!(err, RsclearurlsError::InvalidRulePattern { .. }));

    let err = engine().clean_url("/relative?utm_source=1").unwrap_err();
    assert!(matches!(err, RsclearurlsError::InvalidUrl(_)));
}

#[test]
fn test_raw_rule_breaking_url_stops_field_cleaning() {
    init_test_log();
    let json = r#"{
        "providers": {
            "strip": {"urlPattern": ".*example\\.com.*", "rawRules": ["^https?://"]},
            "after": {"urlPattern": ".*example\\.com.*", "rules": ["utm_.*"]}
        }
    }"#;
    let engine = CleanEngine::from_json_str(json, CleanerConfig::default()).unwrap();

    let result = engine
        .clean("https://example.com/?utm_source=1&id=2", None, Some(&TracingLogger))
        .unwrap();

    assert!(result.changes);
    assert!(!result.redirect);
    assert!(!result.cancel);
    assert_eq!(result.url, "example.com/?utm_source=1&id=2");
    assert_eq!(result.providers, vec!["strip", "after"]);
}
