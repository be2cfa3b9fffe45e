//! # 解析器模块
//!
//! 把抓取到的网页字节转换为纯文本：
//!
//! - `html` - 编码判定、DOM 解析、可见文本提取

pub mod html;

// Re-export commonly used items for convenience
pub use html::{decode_document, extract_visible_text, get_charset, get_title, html_to_dom, normalize_whitespace};
