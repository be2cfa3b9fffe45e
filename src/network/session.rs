//! HTTP会话：逐个抓取来源并提取可见文本
//!
//! 所有请求串行执行。单个来源失败只记录日志，不会中断整批抓取。

use std::fs;
use std::path::Path;
use std::time::Duration;

use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use tracing::{debug, info, warn};

use crate::config::WebcloudConfig;
use crate::core::{is_plaintext_media_type, parse_content_type};
use crate::error::{FetchError, WebcloudError, WebcloudResult};
use crate::parsers::html::{decode_document, extract_visible_text, get_title};
use crate::utils::url::{parse_source, Source, Url};

/// 下载到的原始文档
#[derive(Debug, Clone)]
pub struct RawDocument {
    pub data: Vec<u8>,
    /// 响应头中的 charset，可能为空
    pub charset: String,
    pub media_type: String,
    pub final_url: String,
}

/// 提取后的页面内容
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContent {
    pub title: Option<String>,
    pub text: String,
}

/// 单个来源的抓取结果
#[derive(Debug, Clone)]
pub struct PageResult {
    pub url: String,
    pub result: Result<PageContent, FetchError>,
}

impl PageResult {
    /// 成功时返回规范化后的文本
    pub fn text(&self) -> Option<&str> {
        self.result.as_ref().ok().map(|content| content.text.as_str())
    }

    pub fn is_success(&self) -> bool {
        self.result.is_ok()
    }
}

/// 抓取会话
pub struct Session {
    client: Client,
    timeout: Duration,
}

impl Session {
    /// 按配置创建会话（User-Agent 与超时）
    pub fn new(config: &WebcloudConfig) -> WebcloudResult<Self> {
        Self::with_settings(&config.user_agent, config.timeout())
    }

    pub fn with_settings(user_agent: &str, timeout: Duration) -> WebcloudResult<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(user_agent)
            .build()
            .map_err(|e| WebcloudError::Config(format!("failed to create HTTP client: {e}")))?;

        Ok(Self { client, timeout })
    }

    /// 获取来源的原始字节
    pub fn retrieve(&self, input: &str) -> Result<RawDocument, FetchError> {
        match parse_source(input)? {
            Source::Remote(url) => self.retrieve_remote(&url),
            Source::Local(path) => retrieve_local(&path),
        }
    }

    fn retrieve_remote(&self, url: &Url) -> Result<RawDocument, FetchError> {
        let classify = |e: reqwest::Error| {
            if e.is_timeout() {
                FetchError::Timeout(url.to_string())
            } else {
                FetchError::Network {
                    url: url.to_string(),
                    message: e.to_string(),
                }
            }
        };

        debug!("GET {} (timeout {:?})", url, self.timeout);
        let response = self.client.get(url.as_str()).send().map_err(classify)?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::HttpStatus {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .unwrap_or_default()
            .to_string();
        let (media_type, charset, _is_base64) = parse_content_type(&content_type);

        if !media_type.is_empty() && !is_plaintext_media_type(&media_type) {
            return Err(FetchError::UnsupportedMediaType {
                media_type,
                url: url.to_string(),
            });
        }

        let final_url = response.url().to_string();
        let data = response.bytes().map_err(classify)?.to_vec();

        Ok(RawDocument {
            data,
            charset,
            media_type,
            final_url,
        })
    }

    /// 抓取单个来源并提取规范化后的可见文本
    pub fn fetch(&self, input: &str) -> Result<PageContent, FetchError> {
        let raw = self.retrieve(input)?;
        let charset_hint = Some(raw.charset.as_str()).filter(|charset| !charset.is_empty());
        let (dom, encoding) = decode_document(&raw.data, charset_hint)?;
        debug!("Decoded {} as {}", raw.final_url, encoding);

        let text = extract_visible_text(&dom.document);
        if text.is_empty() {
            return Err(FetchError::NoContent(input.to_string()));
        }

        Ok(PageContent {
            title: get_title(&dom.document),
            text,
        })
    }

    /// 依次抓取所有来源，返回与输入顺序一致的结果
    pub fn fetch_all(&self, urls: &[String]) -> Vec<PageResult> {
        info!("Scraping {} page(s)", urls.len());

        urls.iter()
            .enumerate()
            .map(|(i, url)| {
                info!("Fetching ({}/{}): {}", i + 1, urls.len(), url);
                let result = self.fetch(url);

                match &result {
                    Ok(content) => info!(
                        "Extracted {} characters from {}{}",
                        content.text.chars().count(),
                        url,
                        content
                            .title
                            .as_deref()
                            .map(|title| format!(" ({title})"))
                            .unwrap_or_default()
                    ),
                    Err(FetchError::NoContent(_)) => warn!("No usable text extracted from {}", url),
                    Err(e) => warn!("Failed to scrape {}: {}", url, e),
                }

                PageResult {
                    url: url.clone(),
                    result,
                }
            })
            .collect()
    }
}

fn retrieve_local(path: &Path) -> Result<RawDocument, FetchError> {
    let data = fs::read(path).map_err(|e| FetchError::Io {
        path: path.display().to_string(),
        message: e.to_string(),
    })?;

    let final_url = fs::canonicalize(path)
        .ok()
        .and_then(|canonical_path| Url::from_file_path(canonical_path).ok())
        .map(|url| url.to_string())
        .unwrap_or_else(|| path.display().to_string());

    Ok(RawDocument {
        data,
        charset: String::new(),
        media_type: "text/html".to_string(),
        final_url,
    })
}
