use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::*;
use crate::foundation::error::SocialError;
use crate::text::face::fake::box_registry;

struct MemFetcher {
    files: HashMap<String, Vec<u8>>,
    calls: AtomicUsize,
}

impl MemFetcher {
    fn new() -> Self {
        let png = |rgb: [u8; 3]| {
            let img = image::RgbImage::from_pixel(32, 24, image::Rgb(rgb));
            crate::render::encode::encode_png(&img).unwrap()
        };
        let mut files = HashMap::new();
        files.insert("bg.png".to_string(), png([40, 80, 120]));
        files.insert("me.png".to_string(), png([0, 200, 0]));
        Self {
            files,
            calls: AtomicUsize::new(0),
        }
    }
}

impl ImageFetcher for MemFetcher {
    fn fetch(&self, location: &str) -> SocialResult<Vec<u8>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.files
            .get(location)
            .cloned()
            .ok_or_else(|| SocialError::asset(format!("no such file '{location}'")))
    }
}

fn renderer(capacity: usize) -> (Renderer, Arc<MemFetcher>) {
    let fetcher = Arc::new(MemFetcher::new());
    let opts = RendererOpts {
        cache_capacity: capacity,
        ..RendererOpts::default()
    };
    let r = Renderer::with_parts(box_registry(), fetcher.clone(), &opts).unwrap();
    (r, fetcher)
}

fn params(title: &str) -> ImageParams {
    ImageParams {
        background_path: "bg.png".to_string(),
        author_img_path: "me.png".to_string(),
        author_name: "Ada".to_string(),
        title: title.to_string(),
        width: 120,
        height: 90,
        ..ImageParams::default()
    }
}

#[test]
fn second_identical_request_is_served_from_cache() {
    let (r, fetcher) = renderer(8);
    let a = r.generate_image(&params("hello")).unwrap();
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 2);

    let b = r.generate_image(&params("hello")).unwrap();
    assert!(Arc::ptr_eq(&a, &b));
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 2);

    let stats = r.cache_stats();
    assert_eq!((stats.hits, stats.misses, stats.renders), (1, 1, 1));
}

#[test]
fn uncached_render_is_deterministic() {
    let (r, _) = renderer(8);
    let a = r.render_uncached(&params("same")).unwrap();
    let b = r.render_uncached(&params("same")).unwrap();
    assert_eq!(a, b);
    assert_eq!(r.cache_stats().len, 0);
}

#[test]
fn no_avatar_skips_avatar_fetch() {
    let (r, fetcher) = renderer(8);
    let mut p = params("x");
    p.include_avatar = false;
    p.author_img_path.clear();
    r.generate_image(&p).unwrap();
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 1);
}

#[test]
fn failures_are_not_cached() {
    let (r, fetcher) = renderer(8);
    let mut p = params("x");
    p.background_path = "missing.png".to_string();
    assert!(matches!(r.generate_image(&p), Err(SocialError::Asset(_))));
    assert!(r.generate_image(&p).is_err());
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 2);
    assert_eq!(r.cache_stats().len, 0);
}

#[test]
fn invalid_params_fail_before_fetching() {
    let (r, fetcher) = renderer(8);
    let mut p = params("x");
    p.width = 0;
    assert!(matches!(r.generate_image(&p), Err(SocialError::Validation(_))));
    assert_eq!(fetcher.calls.load(Ordering::SeqCst), 0);
}

#[test]
fn cache_is_bounded() {
    let (r, _) = renderer(2);
    for title in ["a", "b", "c"] {
        r.generate_image(&params(title)).unwrap();
    }
    assert_eq!(r.cache_stats().len, 2);
}

#[test]
fn missing_logo_file_fails_construction() {
    let opts = RendererOpts {
        logo: Some("/definitely/not/logo.png".into()),
        ..RendererOpts::default()
    };
    let fetcher: Arc<dyn ImageFetcher> = Arc::new(MemFetcher::new());
    assert!(Renderer::with_parts(box_registry(), fetcher, &opts).is_err());
}
