//! 文档编码判定
//!
//! 依次采用：响应头中的 charset、字节序标记、文档内的 meta 声明；
//! 都没有时，若内容不是合法的 UTF-8，则根据字节内容猜测编码，否则使用 UTF-8。

use chardetng::EncodingDetector;
use encoding_rs::Encoding;
use markup5ever_rcdom::RcDom;

use crate::error::FetchError;

use super::dom::html_to_dom;
use super::metadata::get_charset;

pub const DEFAULT_ENCODING: &str = "utf-8";

/// 判定编码并解析文档，返回 DOM 与最终采用的编码名称
pub fn decode_document(data: &[u8], charset_hint: Option<&str>) -> Result<(RcDom, String), FetchError> {
    if let Some(encoding) = charset_hint
        .filter(|label| !label.trim().is_empty())
        .and_then(|label| Encoding::for_label_no_replacement(label.trim().as_bytes()))
    {
        let dom = html_to_dom(data, encoding.name())?;
        return Ok((dom, encoding.name().to_string()));
    }

    if let Some((encoding, _bom_length)) = Encoding::for_bom(data) {
        let dom = html_to_dom(data, encoding.name())?;
        return Ok((dom, encoding.name().to_string()));
    }

    // 初始解析
    let dom = html_to_dom(data, DEFAULT_ENCODING)?;

    if let Some(html_charset) = get_charset(&dom.document) {
        if let Some(document_charset) = Encoding::for_label_no_replacement(html_charset.trim().as_bytes()) {
            if document_charset != encoding_rs::UTF_8 {
                let dom = html_to_dom(data, document_charset.name())?;
                return Ok((dom, document_charset.name().to_string()));
            }
        }
    }

    if let Some(detected) = detect_encoding(data) {
        let dom = html_to_dom(data, detected.name())?;
        return Ok((dom, detected.name().to_string()));
    }

    Ok((dom, encoding_rs::UTF_8.name().to_string()))
}

/// 未声明编码且不是合法 UTF-8 时，根据字节内容猜测编码
pub fn detect_encoding(data: &[u8]) -> Option<&'static Encoding> {
    if std::str::from_utf8(data).is_ok() {
        return None;
    }

    let mut detector = EncodingDetector::new();
    detector.feed(data, true);
    let guess = detector.guess(None, false);
    (guess != encoding_rs::UTF_8).then_some(guess)
}
