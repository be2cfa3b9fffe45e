//! # 词云渲染模块
//!
//! 把词频表绘制为 PNG 图片：
//!
//! - `layout` - 默认布局实现（字号缩放、占用图、固定随机种子）
//!
//! 前置条件（词频表非空、字体文件存在）检查失败时不会写出任何文件。

pub mod layout;

use std::fs;
use std::path::Path;

use tracing::{error, info};

use crate::config::RenderConfig;
use crate::error::{WebcloudError, WebcloudResult};
use crate::text::FrequencyMap;

pub use layout::{OccupancyMap, PlacedWord, WordCloud};

/// 布局与栅格化策略
pub trait CloudLayout {
    /// 根据词频与字体数据生成编码好的 PNG 字节
    fn layout_and_render(&self, frequencies: &FrequencyMap, font_data: &[u8]) -> WebcloudResult<Vec<u8>>;
}

/// 使用默认布局渲染词云并写入 `output_path`
pub fn render_wordcloud(
    frequencies: &FrequencyMap,
    output_path: &Path,
    font_path: Option<&Path>,
    config: &RenderConfig,
) -> WebcloudResult<()> {
    config.validate()?;
    render_with(&WordCloud::new(config.clone()), frequencies, output_path, font_path)
}

/// 使用指定布局渲染词云并写入 `output_path`
pub fn render_with(
    layout: &dyn CloudLayout,
    frequencies: &FrequencyMap,
    output_path: &Path,
    font_path: Option<&Path>,
) -> WebcloudResult<()> {
    if frequencies.is_empty() {
        error!("No words to generate a word cloud from");
        return Err(WebcloudError::NoWords);
    }

    let font_path = match font_path {
        Some(path) if path.is_file() => path,
        Some(path) => {
            error!("Font file not found: {}", path.display());
            return Err(WebcloudError::FontNotFound(path.to_path_buf()));
        }
        None => {
            error!("No font configured; a font with CJK glyphs is required");
            return Err(WebcloudError::FontNotFound("(not configured)".into()));
        }
    };

    let font_data = fs::read(font_path).map_err(|e| WebcloudError::io(font_path, e))?;

    info!("Rendering word cloud of {} word(s)", frequencies.len());
    let png = layout.layout_and_render(frequencies, &font_data)?;

    fs::write(output_path, &png).map_err(|e| {
        error!("Failed to save word cloud to {}: {}", output_path.display(), e);
        WebcloudError::io(output_path, e)
    })?;
    info!("Word cloud saved to {}", output_path.display());

    Ok(())
}
