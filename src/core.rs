use std::path::{Path, PathBuf};

use chrono::{SecondsFormat, Utc};
use tracing::{info, warn};

use crate::config::WebcloudConfig;
use crate::error::{WebcloudError, WebcloudResult};
use crate::network::Session;
use crate::render::render_wordcloud;
use crate::storage::{aggregate_and_save, read_text_file, AggregateSummary};
use crate::text::{top_words, word_frequencies, JiebaSegmenter, Segmenter, StopWords, WordFilter};

const ANSI_COLOR_RED: &str = "\x1b[31m";
const ANSI_COLOR_RESET: &str = "\x1b[0m";
// All known non-"text/..." plaintext media types
const PLAINTEXT_MEDIA_TYPES: &[&str] = &[
    "application/javascript",          // .js
    "application/json",                // .json
    "application/ld+json",             // .jsonld
    "application/x-sh",                // .sh
    "application/xhtml+xml",           // .xhtml
    "application/xml",                 // .xml
    "application/vnd.mozilla.xul+xml", // .xul
    "image/svg+xml",                   // .svg
];

/// 抓取阶段的结果
#[derive(Debug, Clone)]
pub struct ScrapeReport {
    pub attempted: usize,
    pub succeeded: usize,
    pub summary: AggregateSummary,
    /// 实际写入的中间文件路径（已展开模板）
    pub output: PathBuf,
}

/// 词云阶段的结果
#[derive(Debug, Clone)]
pub struct CloudReport {
    /// 通过过滤的不同词语数
    pub words: usize,
    /// 出现次数最多的词语，按次数降序
    pub top_words: Vec<(String, usize)>,
    pub output: PathBuf,
}

#[derive(Debug, Clone)]
pub struct RunReport {
    pub scrape: ScrapeReport,
    pub cloud: CloudReport,
}

/// 抓取 → 汇总 → 文本处理 → 渲染的流程驱动
///
/// 每个阶段都返回 `Result`，任何阶段失败时流程停止并返回该错误；
/// 单个 URL 抓取失败不算阶段失败。
pub struct Pipeline {
    config: WebcloudConfig,
}

impl Pipeline {
    /// 校验配置并创建流程
    pub fn new(config: WebcloudConfig) -> WebcloudResult<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &WebcloudConfig {
        &self.config
    }

    /// 完整流程：抓取所有 URL 并生成词云
    pub fn run(&self) -> WebcloudResult<RunReport> {
        let scrape = self.scrape()?;
        let cloud = self.cloud(&scrape.output)?;
        Ok(RunReport { scrape, cloud })
    }

    /// 抓取所有 URL 并把文本保存到中间文件
    pub fn scrape(&self) -> WebcloudResult<ScrapeReport> {
        if self.config.urls.is_empty() {
            return Err(WebcloudError::Config("no URLs to scrape".to_string()));
        }

        let session = Session::new(&self.config)?;
        let results = session.fetch_all(&self.config.urls);
        let succeeded = results.iter().filter(|page| page.is_success()).count();
        if succeeded < results.len() {
            warn!("{} of {} page(s) failed", results.len() - succeeded, results.len());
        }

        let output = expand_output_path(&self.config.scraped_output);
        let summary = aggregate_and_save(&results, &output)?;

        Ok(ScrapeReport {
            attempted: results.len(),
            succeeded,
            summary,
            output,
        })
    }

    /// 读取文本文件并生成词云，使用 jieba 分词
    pub fn cloud(&self, input: &Path) -> WebcloudResult<CloudReport> {
        let segmenter = match &self.config.user_dict_path {
            Some(path) => JiebaSegmenter::with_user_dict(path)?,
            None => JiebaSegmenter::new(),
        };
        self.cloud_with(input, &segmenter)
    }

    /// 读取文本文件并用指定分词器生成词云
    pub fn cloud_with(&self, input: &Path, segmenter: &dyn Segmenter) -> WebcloudResult<CloudReport> {
        let text = read_text_file(input)?;
        if text.trim().is_empty() {
            warn!("{} contains no text", input.display());
            return Err(WebcloudError::NoWords);
        }

        let stopwords = StopWords::load(self.config.stopwords_path.as_deref());
        let filter = WordFilter {
            min_freq: self.config.min_frequency,
            min_len: self.config.min_length,
        };
        let frequencies = word_frequencies(&text, segmenter, &stopwords, filter);

        let top: Vec<(String, usize)> = top_words(&frequencies, self.config.top_words)
            .into_iter()
            .map(|(word, count)| (word.to_string(), count))
            .collect();
        if !top.is_empty() {
            info!(
                "Top {} word(s): {}",
                top.len(),
                top.iter()
                    .map(|(word, count)| format!("{word}({count})"))
                    .collect::<Vec<_>>()
                    .join(", ")
            );
        }

        let output = expand_output_path(&self.config.wordcloud_output);
        render_wordcloud(
            &frequencies,
            &output,
            self.config.font_path.as_deref(),
            &self.config.render,
        )?;

        Ok(CloudReport {
            words: frequencies.len(),
            top_words: top,
            output,
        })
    }
}

fn expand_output_path(path: &Path) -> PathBuf {
    PathBuf::from(format_output_path(&path.to_string_lossy()))
}

/// Parses Content-Type header value
pub fn parse_content_type(content_type: &str) -> (String, String, bool) {
    let mut media_type = String::new();
    let mut charset = String::new();
    let mut is_base64 = false;

    let parts: Vec<&str> = content_type.split(';').collect();

    if !parts.is_empty() {
        media_type = parts[0].trim().to_lowercase();
    }

    for part in parts.iter().skip(1) {
        let part = part.trim();
        if let Some(value) = part.strip_prefix("charset=") {
            charset = value.trim_matches('"').to_string();
        } else if part == "base64" {
            is_base64 = true;
        }
    }

    (media_type, charset, is_base64)
}

/// Checks if the given media type represents plaintext content
pub fn is_plaintext_media_type(media_type: &str) -> bool {
    media_type.starts_with("text/") || PLAINTEXT_MEDIA_TYPES.contains(&media_type)
}

/// 展开输出路径中的 `%timestamp%`（UTC，`:` 替换为 `_`）
pub fn format_output_path(path: &str) -> String {
    let datetime: &str = &Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true);
    path.replace("%timestamp%", &datetime.replace(':', "_"))
}

/// Prints an error message to stderr
pub fn print_error_message(msg: &str) {
    eprintln!("{ANSI_COLOR_RED}{msg}{ANSI_COLOR_RESET}");
}

/// Prints an info message to stdout
pub fn print_info_message(msg: &str) {
    println!("{msg}");
}
