//! 统一错误处理
//!
//! 每个流水线阶段都返回 `WebcloudResult`，由调用方显式检查，
//! 单个 URL 的失败则用 `FetchError` 记录在 `PageResult` 中。

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// 单个页面抓取失败的原因
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FetchError {
    /// URL 无法解析或协议不受支持
    #[error("invalid URL \"{0}\"")]
    InvalidUrl(String),

    /// 请求超时
    #[error("timed out fetching {0}")]
    Timeout(String),

    /// 连接、TLS、解码等网络层错误
    #[error("network error fetching {url}: {message}")]
    Network { url: String, message: String },

    /// 非 2xx 状态码
    #[error("HTTP {status} for {url}")]
    HttpStatus { status: u16, url: String },

    /// 响应不是文本类型
    #[error("unsupported media type \"{media_type}\" at {url}")]
    UnsupportedMediaType { media_type: String, url: String },

    /// 提取后没有可见文本
    #[error("no text extracted from {0}")]
    NoContent(String),

    /// 本地文件读取失败
    #[error("failed to read {path}: {message}")]
    Io { path: String, message: String },
}

/// 流水线错误类型
#[derive(Error, Debug)]
pub enum WebcloudError {
    /// 配置错误
    #[error("configuration error: {0}")]
    Config(String),

    /// 所有 URL 都没有产出文本
    #[error("no text was scraped from any of the {0} source(s)")]
    NothingScraped(usize),

    /// 输入文件不存在
    #[error("file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// 过滤后没有任何词语
    #[error("no words left to draw")]
    NoWords,

    /// 字体文件不存在
    #[error("font file not found: {}", .0.display())]
    FontNotFound(PathBuf),

    /// 布局或编码失败
    #[error("rendering failed: {0}")]
    Render(String),

    /// 单个抓取错误（用于只有一个来源的调用）
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// 文件读写错误
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type WebcloudResult<T> = Result<T, WebcloudError>;

impl WebcloudError {
    /// 为 I/O 错误附加路径
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        WebcloudError::Io {
            path: path.into(),
            source,
        }
    }

    /// 获取错误的严重程度
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            WebcloudError::Config(_) => ErrorSeverity::Critical,
            WebcloudError::NothingScraped(_) => ErrorSeverity::Error,
            WebcloudError::InputNotFound(_) => ErrorSeverity::Error,
            WebcloudError::NoWords => ErrorSeverity::Warning,
            WebcloudError::FontNotFound(_) => ErrorSeverity::Error,
            WebcloudError::Render(_) => ErrorSeverity::Error,
            WebcloudError::Fetch(_) => ErrorSeverity::Warning,
            WebcloudError::Io { .. } => ErrorSeverity::Error,
        }
    }

    /// 获取错误类别
    pub fn category(&self) -> ErrorCategory {
        match self {
            WebcloudError::Config(_) => ErrorCategory::Configuration,
            WebcloudError::NothingScraped(_) => ErrorCategory::Aggregation,
            WebcloudError::InputNotFound(_) => ErrorCategory::Input,
            WebcloudError::NoWords => ErrorCategory::Precondition,
            WebcloudError::FontNotFound(_) => ErrorCategory::Precondition,
            WebcloudError::Render(_) => ErrorCategory::Rendering,
            WebcloudError::Fetch(_) => ErrorCategory::Network,
            WebcloudError::Io { .. } => ErrorCategory::Io,
        }
    }
}

/// 错误严重程度
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ErrorSeverity {
    Info,
    Warning,
    Error,
    Critical,
}

/// 错误类别
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCategory {
    Configuration,
    Network,
    Aggregation,
    Input,
    Precondition,
    Rendering,
    Io,
}
