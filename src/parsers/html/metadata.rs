//! HTML 文档元数据处理模块
//!
//! 提供字符编码声明与标题的读取，用于在解码页面前确定真实编码，
//! 以及在抓取日志中标明页面。

use markup5ever_rcdom::{Handle, NodeData};

use crate::core::parse_content_type;

use super::dom::{find_nodes, get_node_attr};
use super::text::normalize_whitespace;

/// 获取文档字符编码
///
/// 从 HTML 文档的 meta 标签中提取字符编码信息。支持两种格式：
/// 1. HTML5 格式：`<meta charset="utf-8">`
/// 2. HTML4 格式：`<meta http-equiv="content-type" content="text/html; charset=utf-8">`
///
/// # 返回值
///
/// * `Some(String)` - 找到的编码名称（如 "utf-8"）
/// * `None` - 没有找到任何字符编码声明
pub fn get_charset(node: &Handle) -> Option<String> {
    for meta_node in find_nodes(node, &["html", "head", "meta"]).iter() {
        if let Some(meta_charset_node_attr_value) = get_node_attr(meta_node, "charset") {
            return Some(meta_charset_node_attr_value);
        }

        if get_node_attr(meta_node, "http-equiv")
            .unwrap_or_default()
            .eq_ignore_ascii_case("content-type")
        {
            if let Some(meta_content_type_node_attr_value) = get_node_attr(meta_node, "content") {
                let (_media_type, charset, _is_base64) =
                    parse_content_type(&meta_content_type_node_attr_value);
                if !charset.is_empty() {
                    return Some(charset);
                }
            }
        }
    }

    None
}

/// 获取文档标题
///
/// 只看 `<head>` 中的第一个 `<title>`，空白会被折叠。
pub fn get_title(node: &Handle) -> Option<String> {
    let title_node = find_nodes(node, &["html", "head", "title"])
        .into_iter()
        .next()?;

    let mut title = String::new();
    for child in title_node.children.borrow().iter() {
        if let NodeData::Text { contents } = &child.data {
            title.push_str(&contents.borrow());
        }
    }

    let title = normalize_whitespace(&title);
    if title.is_empty() {
        None
    } else {
        Some(title)
    }
}
