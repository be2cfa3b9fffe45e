mod common;

use std::fs;
use std::path::Path;

use common::{find_test_font, serve, unreachable_url, Route};
use webcloud::config::{RenderConfig, WebcloudConfig};
use webcloud::core::Pipeline;
use webcloud::error::WebcloudError;
use webcloud::storage::format_block;
use webcloud::text::WhitespaceSegmenter;

fn config_in(dir: &Path) -> WebcloudConfig {
    WebcloudConfig {
        scraped_output: dir.join("scraped_website_text.txt"),
        wordcloud_output: dir.join("website_wordcloud.png"),
        stopwords_path: None,
        timeout_secs: 5,
        render: RenderConfig {
            width: 240,
            height: 160,
            max_font_size: Some(48),
            ..RenderConfig::default()
        },
        ..WebcloudConfig::default()
    }
}

#[test]
fn scrape_keeps_only_successful_pages() {
    let server = serve(vec![Route::html(
        "/page",
        "<html><body>你好 你好 世界 测试</body></html>",
    )]);
    let good_url = format!("{server}/page");
    let dir = tempfile::tempdir().unwrap();

    let config = WebcloudConfig {
        urls: vec![unreachable_url(), good_url.clone()],
        ..config_in(dir.path())
    };
    let report = Pipeline::new(config).unwrap().scrape().unwrap();

    assert_eq!(report.attempted, 2);
    assert_eq!(report.succeeded, 1);
    assert_eq!(
        fs::read_to_string(&report.output).unwrap(),
        format_block(&good_url, "你好 你好 世界 测试")
    );
}

#[test]
fn scrape_with_nothing_usable_fails() {
    let dir = tempfile::tempdir().unwrap();
    let config = WebcloudConfig {
        urls: vec![unreachable_url()],
        ..config_in(dir.path())
    };

    let result = Pipeline::new(config).unwrap().scrape();
    assert!(matches!(result, Err(WebcloudError::NothingScraped(1))));
    assert!(!dir.path().join("scraped_website_text.txt").exists());
}

#[test]
fn run_stops_when_nothing_was_scraped() {
    let dir = tempfile::tempdir().unwrap();
    let config = WebcloudConfig {
        urls: vec![unreachable_url()],
        font_path: find_test_font(),
        ..config_in(dir.path())
    };

    let result = Pipeline::new(config).unwrap().run();
    assert!(matches!(result, Err(WebcloudError::NothingScraped(_))));
    assert!(!dir.path().join("website_wordcloud.png").exists());
}

#[test]
fn cloud_without_font_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    let input = dir.path().join("words.txt");
    fs::write(&input, "unused").unwrap();

    let config = WebcloudConfig {
        min_frequency: 1,
        font_path: None,
        ..config_in(dir.path())
    };
    let pipeline = Pipeline::new(config).unwrap();

    let result = pipeline.cloud_with(&input, &WhitespaceSegmenter);
    assert!(matches!(result, Err(WebcloudError::FontNotFound(_))));
    assert!(!dir.path().join("website_wordcloud.png").exists());
}

#[test]
fn run_end_to_end() {
    let server = serve(vec![
        Route::html(
            "/a",
            "<html><head><title>数据</title></head><body><p>数据 分析 数据 可视化 数据</p></body></html>",
        ),
        Route::html("/b", "<html><body><p>分析 数据 可视化</p></body></html>"),
    ]);
    let dir = tempfile::tempdir().unwrap();
    let font_path = find_test_font();

    let config = WebcloudConfig {
        urls: vec![format!("{server}/a"), format!("{server}/b")],
        font_path: font_path.clone(),
        min_frequency: 2,
        ..config_in(dir.path())
    };
    let result = Pipeline::new(config).unwrap().run();

    let scraped = fs::read_to_string(dir.path().join("scraped_website_text.txt")).unwrap();
    assert!(scraped.contains("数据 分析 数据 可视化 数据"));
    assert!(scraped.contains("分析 数据 可视化"));

    match font_path {
        Some(_) => {
            let report = result.unwrap();
            assert_eq!(report.scrape.succeeded, 2);
            assert!(report.cloud.words > 0);
            assert!(report.cloud.top_words.iter().all(|(_, count)| *count >= 2));
            assert!(dir.path().join("website_wordcloud.png").is_file());
        }
        None => {
            assert!(matches!(result, Err(WebcloudError::FontNotFound(_))));
            assert!(!dir.path().join("website_wordcloud.png").exists());
        }
    }
}
