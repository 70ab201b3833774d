use std::collections::HashMap;

use super::*;

fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |k| map.get(k).cloned()
}

#[test]
fn defaults_match_documented_constants() {
    let opts = RendererOpts::default();
    assert_eq!(opts.cache_capacity, 100);
    assert_eq!(opts.fetch_timeout, Duration::from_secs(10));
    assert_eq!(opts.site_name, "totem.org");
    assert!(!opts.insecure_tls);
    assert!(opts.logo.is_none());
}

#[test]
fn env_overrides_are_applied() {
    let opts = RendererOpts::from_lookup(lookup_from(&[
        ("TOTEM_SOCIAL_FONTS_DIR", "/srv/fonts"),
        ("TOTEM_SOCIAL_LOGO", "/srv/logo.svg"),
        ("TOTEM_SOCIAL_SITE_NAME", "example.org"),
        ("TOTEM_SOCIAL_CACHE_CAPACITY", "7"),
        ("TOTEM_SOCIAL_FETCH_TIMEOUT_MS", "250"),
        ("TOTEM_SOCIAL_DEBUG", "1"),
    ]));
    assert_eq!(opts.fonts, FontPaths::in_dir("/srv/fonts"));
    assert_eq!(opts.logo, Some(PathBuf::from("/srv/logo.svg")));
    assert_eq!(opts.site_name, "example.org");
    assert_eq!(opts.cache_capacity, 7);
    assert_eq!(opts.fetch_timeout, Duration::from_millis(250));
    assert!(opts.insecure_tls);
}

#[test]
fn invalid_numbers_fall_back_to_defaults() {
    let opts = RendererOpts::from_lookup(lookup_from(&[
        ("TOTEM_SOCIAL_CACHE_CAPACITY", "0"),
        ("TOTEM_SOCIAL_FETCH_TIMEOUT_MS", "soon"),
    ]));
    assert_eq!(opts.cache_capacity, DEFAULT_CACHE_CAPACITY);
    assert_eq!(opts.fetch_timeout, DEFAULT_FETCH_TIMEOUT);
}

#[test]
fn font_paths_keep_priority_order() {
    let paths = FontPaths::in_dir("f");
    let [a, b, c] = paths.ordered();
    assert_eq!(a, &paths.primary);
    assert_eq!(b, &paths.fallback);
    assert_eq!(c, &paths.emoji);
}
