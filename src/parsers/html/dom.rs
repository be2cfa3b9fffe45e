use encoding_rs::Encoding;
use html5ever::parse_document;
use html5ever::tendril::TendrilSink;
use markup5ever_rcdom::{Handle, NodeData, RcDom};

use crate::error::FetchError;

/// 将 HTML 字节按给定编码解码并转换为 DOM
pub fn html_to_dom(data: &[u8], document_encoding: &str) -> Result<RcDom, FetchError> {
    let s: String = if let Some(encoding) = Encoding::for_label(document_encoding.as_bytes()) {
        let (string, _, _) = encoding.decode(data);
        string.into_owned()
    } else {
        String::from_utf8_lossy(data).into_owned()
    };

    parse_document(RcDom::default(), Default::default())
        .from_utf8()
        .read_from(&mut s.as_bytes())
        .map_err(|e| FetchError::Io {
            path: "<document>".to_string(),
            message: e.to_string(),
        })
}

/// 查找指定路径的DOM节点
pub fn find_nodes(node: &Handle, node_names: &[&str]) -> Vec<Handle> {
    let mut found_nodes = Vec::new();
    let Some((node_name, rest)) = node_names.split_first() else {
        return found_nodes;
    };

    let is_match = get_node_name(node) == Some(*node_name);

    if is_match && rest.is_empty() {
        found_nodes.push(node.clone());
    }

    if is_match && !rest.is_empty() {
        found_nodes.append(&mut find_nodes_in_children(node, rest));
    } else {
        found_nodes.append(&mut find_nodes_in_children(node, node_names));
    }

    found_nodes
}

fn find_nodes_in_children(node: &Handle, node_names: &[&str]) -> Vec<Handle> {
    node.children
        .borrow()
        .iter()
        .flat_map(|child_node| find_nodes(child_node, node_names))
        .collect()
}

/// 获取节点属性值
pub fn get_node_attr(node: &Handle, attr_name: &str) -> Option<String> {
    match &node.data {
        NodeData::Element { attrs, .. } => attrs
            .borrow()
            .iter()
            .find(|attr| &*attr.name.local == attr_name)
            .map(|attr| attr.value.to_string()),
        _ => None,
    }
}

/// 获取节点名称
pub fn get_node_name(node: &Handle) -> Option<&'_ str> {
    match &node.data {
        NodeData::Element { name, .. } => Some(name.local.as_ref()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_html_to_dom_decodes_gbk() {
        let (bytes, _, _) = encoding_rs::GBK.encode("<p>你好</p>");
        let dom = html_to_dom(&bytes, "gbk").unwrap();
        let paragraphs = find_nodes(&dom.document, &["html", "body", "p"]);
        assert_eq!(paragraphs.len(), 1);
    }

    #[test]
    fn test_unknown_label_falls_back_to_utf8() {
        let dom = html_to_dom("<title>世界</title>".as_bytes(), "no-such-charset").unwrap();
        let titles = find_nodes(&dom.document, &["html", "head", "title"]);
        assert_eq!(titles.len(), 1);
    }

    #[test]
    fn test_find_nodes_nested_path() {
        let html = "<html><head><meta charset=\"utf-8\"><meta name=\"robots\"></head><body><meta></body></html>";
        let dom = html_to_dom(html.as_bytes(), "utf-8").unwrap();

        let head_meta = find_nodes(&dom.document, &["html", "head", "meta"]);
        assert_eq!(head_meta.len(), 2);
        assert_eq!(get_node_attr(&head_meta[0], "charset"), Some("utf-8".to_string()));
        assert_eq!(get_node_attr(&head_meta[1], "charset"), None);
        assert_eq!(get_node_name(&head_meta[1]), Some("meta"));
    }
}
