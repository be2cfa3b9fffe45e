//! 可见文本提取
//!
//! 按文档顺序直接拼接所有文本节点（不插入分隔符），
//! 跳过脚本、样式与模板内容，然后折叠空白。

use markup5ever_rcdom::{Handle, NodeData};

/// 内容不可见、不参与提取的元素
pub const INVISIBLE_ELEMENTS: &[&str] = &["script", "style", "template"];

/// 提取整个文档的可见文本（未做空白规范化）
pub fn get_text(node: &Handle) -> String {
    let mut text = String::new();
    collect_text(node, &mut text);
    text
}

fn collect_text(node: &Handle, out: &mut String) {
    match &node.data {
        NodeData::Text { contents } => {
            out.push_str(&contents.borrow());
            return;
        }
        NodeData::Element { name, .. } if INVISIBLE_ELEMENTS.contains(&name.local.as_ref()) => {
            return;
        }
        NodeData::Comment { .. } | NodeData::ProcessingInstruction { .. } => return,
        _ => {}
    }

    for child_node in node.children.borrow().iter() {
        collect_text(child_node, out);
    }
}

/// 规范化空白：去掉空行，再把所有连续空白折叠为一个空格并去掉首尾空白
pub fn normalize_whitespace(text: &str) -> String {
    let non_blank_lines: Vec<&str> = text.lines().filter(|line| !line.trim().is_empty()).collect();

    non_blank_lines
        .join("\n")
        .split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
}

/// 提取并规范化文档的可见文本
pub fn extract_visible_text(document: &Handle) -> String {
    normalize_whitespace(&get_text(document))
}
