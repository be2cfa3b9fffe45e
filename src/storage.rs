//! 抓取结果的汇总、落盘与读取
//!
//! 中间文件格式（每个成功的来源一段）：
//!
//! ```text
//! --- Start of Content from {url} ---
//! {normalized text}
//! --- End of Content from {url} ---
//!
//! ```

use std::fs;
use std::io;
use std::path::Path;

use tracing::{error, info};

use crate::error::{WebcloudError, WebcloudResult};
use crate::network::PageResult;

/// 汇总写盘的结果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AggregateSummary {
    /// 写入文件的页面数
    pub pages: usize,
    /// 写入的字节数
    pub bytes: usize,
}

/// 生成单个来源的文本块
pub fn format_block(url: &str, text: &str) -> String {
    format!("--- Start of Content from {url} ---\n{text}\n--- End of Content from {url} ---\n\n")
}

/// 按输入顺序拼接所有成功来源的文本块
pub fn aggregate(results: &[PageResult]) -> String {
    results
        .iter()
        .filter_map(|page| page.text().map(|text| (page.url.as_str(), text)))
        .filter(|(_, text)| !text.is_empty())
        .map(|(url, text)| format_block(url, text))
        .collect()
}

/// 汇总并保存抓取结果
///
/// 没有任何文本时不写文件并返回 `NothingScraped`；已有文件会被覆盖。
pub fn aggregate_and_save(results: &[PageResult], output_path: &Path) -> WebcloudResult<AggregateSummary> {
    let all_text = aggregate(results);

    if all_text.trim().is_empty() {
        error!("No usable text was scraped");
        return Err(WebcloudError::NothingScraped(results.len()));
    }

    fs::write(output_path, &all_text).map_err(|e| {
        error!("Failed to save scraped text to {}: {}", output_path.display(), e);
        WebcloudError::io(output_path, e)
    })?;

    let summary = AggregateSummary {
        pages: results
            .iter()
            .filter(|page| page.text().map_or(false, |text| !text.is_empty()))
            .count(),
        bytes: all_text.len(),
    };
    info!(
        "Saved text of {} page(s) to {}",
        summary.pages,
        output_path.display()
    );

    Ok(summary)
}

/// 读取 UTF-8 文本文件
///
/// 文件不存在返回 `InputNotFound`，其他读取错误返回 `Io`。
pub fn read_text_file(path: &Path) -> WebcloudResult<String> {
    match fs::read_to_string(path) {
        Ok(text) => {
            info!("Read {} bytes from {}", text.len(), path.display());
            Ok(text)
        }
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            error!("File not found: {}", path.display());
            Err(WebcloudError::InputNotFound(path.to_path_buf()))
        }
        Err(e) => {
            error!("Failed to read {}: {}", path.display(), e);
            Err(WebcloudError::io(path, e))
        }
    }
}
