//! # 工具模块
//!
//! - `url` - 抓取来源（远程 URL / 本地文件）的识别

pub mod url;

// Re-export commonly used items for convenience
pub use url::{is_url_and_has_protocol, parse_source, Source, Url};
