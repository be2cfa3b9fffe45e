//! # 网络模块
//!
//! - `session` - HTTP会话管理、逐个抓取来源、提取页面文本

pub mod session;

// Re-export commonly used items for convenience
pub use session::{PageContent, PageResult, RawDocument, Session};
