//! HTML解析和处理模块
//!
//! - `dom`: 解码与基础DOM操作
//! - `encoding`: 文档编码判定
//! - `metadata`: 字符编码声明与标题
//! - `text`: 可见文本提取与空白规范化

pub mod dom;
pub mod encoding;
pub mod metadata;
pub mod text;

pub use encoding::{decode_document, DEFAULT_ENCODING};
pub use dom::{find_nodes, get_node_attr, get_node_name, html_to_dom};
pub use metadata::{get_charset, get_title};
pub use text::{extract_visible_text, get_text, normalize_whitespace, INVISIBLE_ELEMENTS};
