//! # Webcloud Library
//!
//! 抓取一组网页的可见文本，分词统计词频，并生成中文词云图片。
//!
//! ## 模块组织
//!
//! - `core` - 流程驱动与通用辅助函数
//! - `config` - 分层配置（默认值、配置文件、环境变量）
//! - `env` - 类型化的环境变量
//! - `error` - 错误类型
//! - `network` - 网页抓取
//! - `parsers` - HTML 解析、编码判定与文本提取
//! - `storage` - 中间文本文件的写入与读取
//! - `text` - 清理、分词、停用词与词频统计
//! - `render` - 词云布局与 PNG 输出
//! - `utils` - 来源解析等工具函数

pub mod config;
pub mod core;
pub mod env;
pub mod error;
pub mod network;
pub mod parsers;
pub mod render;
pub mod storage;
pub mod text;
pub mod utils;

// Re-export commonly used items for convenience
pub use config::{RenderConfig, WebcloudConfig};
pub use crate::core::*;
pub use error::{FetchError, WebcloudError, WebcloudResult};
pub use crate::network::*;
