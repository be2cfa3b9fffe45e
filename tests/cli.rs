//   ██████╗██╗     ██╗
//  ██╔════╝██║     ██║
//  ██║     ██║     ██║
//  ██║     ██║     ██║
//  ╚██████╗███████╗██║
//   ╚═════╝╚══════╝╚═╝

mod common;

use std::fs;
use std::path::Path;

use assert_cmd::Command;

const ENV_VARS: &[&str] = &[
    "WEBCLOUD_LOG_LEVEL",
    "WEBCLOUD_TIMEOUT",
    "WEBCLOUD_USER_AGENT",
    "WEBCLOUD_MIN_FREQUENCY",
    "WEBCLOUD_MIN_LENGTH",
    "WEBCLOUD_STOPWORDS",
    "WEBCLOUD_FONT_PATH",
];

fn webcloud(dir: &Path) -> Command {
    let mut cmd = Command::cargo_bin("webcloud").unwrap();
    cmd.current_dir(dir).env("NO_COLOR", "1");
    for var in ENV_VARS {
        cmd.env_remove(var);
    }
    cmd
}

fn write_page(dir: &Path) {
    fs::write(
        dir.join("page.html"),
        "<html><head><title>本地页面</title></head><body><p>你好 你好 世界 测试</p></body></html>",
    )
    .unwrap();
}

#[test]
fn env_docs_lists_variables() {
    let dir = tempfile::tempdir().unwrap();
    let out = webcloud(dir.path()).arg("env-docs").assert().success();
    let stdout = String::from_utf8(out.get_output().stdout.clone()).unwrap();

    assert!(stdout.contains("WEBCLOUD_FONT_PATH"));
    assert!(stdout.contains("WEBCLOUD_MIN_FREQUENCY"));
}

#[test]
fn env_docs_summarises_current_environment() {
    let dir = tempfile::tempdir().unwrap();
    let out = webcloud(dir.path())
        .arg("env-docs")
        .env("WEBCLOUD_MIN_FREQUENCY", "7")
        .assert()
        .success();
    let stdout = String::from_utf8(out.get_output().stdout.clone()).unwrap();

    assert!(stdout.contains("Environment Configuration Summary:"));
    assert!(stdout.contains("Min Frequency: 7"));
}

#[test]
fn env_docs_with_invalid_variable_is_a_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    webcloud(dir.path())
        .arg("env-docs")
        .env("WEBCLOUD_MIN_FREQUENCY", "lots")
        .assert()
        .code(2);
}

#[test]
fn init_config_writes_loadable_file() {
    let dir = tempfile::tempdir().unwrap();
    webcloud(dir.path())
        .args(["init-config", "webcloud.toml"])
        .assert()
        .success();

    let content = fs::read_to_string(dir.path().join("webcloud.toml")).unwrap();
    assert!(content.contains("min_frequency = 3"));
    assert!(content.contains("https://www.example.com/"));
}

#[test]
fn scrape_local_page() {
    let dir = tempfile::tempdir().unwrap();
    write_page(dir.path());

    webcloud(dir.path())
        .args(["scrape", "page.html", "--scraped-output", "out.txt"])
        .assert()
        .success();

    assert_eq!(
        fs::read_to_string(dir.path().join("out.txt")).unwrap(),
        "--- Start of Content from page.html ---\n本地页面你好 你好 世界 测试\n--- End of Content from page.html ---\n\n"
    );
}

#[test]
fn scrape_reads_urls_from_config_file() {
    let dir = tempfile::tempdir().unwrap();
    write_page(dir.path());
    fs::write(
        dir.path().join("webcloud.toml"),
        "urls = [\"page.html\"]\nscraped_output = \"from-config.txt\"\n",
    )
    .unwrap();

    webcloud(dir.path()).arg("scrape").assert().success();
    assert!(dir.path().join("from-config.txt").is_file());
}

#[test]
fn scrape_with_no_usable_source_exits_with_failure() {
    let dir = tempfile::tempdir().unwrap();

    webcloud(dir.path())
        .args(["scrape", "missing.html", "--scraped-output", "out.txt"])
        .assert()
        .code(1);

    assert!(!dir.path().join("out.txt").exists());
}

#[test]
fn cloud_with_missing_input_exits_with_failure() {
    let dir = tempfile::tempdir().unwrap();

    webcloud(dir.path())
        .args(["cloud", "nope.txt", "--output", "cloud.png"])
        .assert()
        .code(1);

    assert!(!dir.path().join("cloud.png").exists());
}

#[test]
fn cloud_of_empty_text_is_reported_as_warning() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("text.txt"), "  \n").unwrap();

    let out = webcloud(dir.path())
        .args(["cloud", "text.txt", "--output", "cloud.png"])
        .assert()
        .code(1);
    let stderr = String::from_utf8(out.get_output().stderr.clone()).unwrap();

    assert!(stderr.contains("Warning: "));
    assert!(!dir.path().join("cloud.png").exists());
}

#[test]
fn cloud_with_missing_font_writes_nothing() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("text.txt"), "你好 你好 你好 世界").unwrap();

    webcloud(dir.path())
        .args([
            "cloud",
            "text.txt",
            "--font",
            "missing.ttf",
            "--min-freq",
            "1",
            "--output",
            "cloud.png",
        ])
        .assert()
        .code(1);

    assert!(!dir.path().join("cloud.png").exists());
}

#[test]
fn cloud_with_font_writes_png() {
    let Some(font) = common::find_test_font() else {
        eprintln!("no test font available, skipping");
        return;
    };
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("text.txt"), "hello world hello rust hello").unwrap();
    fs::write(
        dir.path().join("webcloud.toml"),
        "[render]\nwidth = 200\nheight = 120\nmax_font_size = 40\n",
    )
    .unwrap();

    webcloud(dir.path())
        .args(["cloud", "text.txt", "--min-freq", "1", "--output", "cloud.png", "--font"])
        .arg(&font)
        .assert()
        .success();

    let png = fs::read(dir.path().join("cloud.png")).unwrap();
    assert!(png.starts_with(b"\x89PNG\r\n\x1a\n"));
}

#[test]
fn invalid_threshold_is_a_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    write_page(dir.path());

    webcloud(dir.path())
        .args(["run", "page.html", "--min-freq", "0"])
        .assert()
        .code(2);
}

#[test]
fn unknown_argument_is_a_usage_error() {
    let dir = tempfile::tempdir().unwrap();
    webcloud(dir.path()).args(["run", "--bogus"]).assert().code(2);
}
