//! 词云布局
//!
//! 按词频从高到低依次放置词语：字号随词频缩放，在占用图中随机挑选一个能容纳
//! 词语外框（含间距）的空位；放不下时先尝试另一方向，再逐步缩小字号，
//! 字号低于下限时停止。外框由字形度量直接算出，只有找到位置后才栅格化。
//! 随机数由固定种子生成，布局完全可复现。

use std::cmp::Reverse;
use std::io::Cursor;

use ab_glyph::{point, Font, FontRef, Glyph, GlyphId, PxScale, ScaleFont};
use image::imageops::rotate270;
use image::{DynamicImage, GrayImage, ImageFormat, Rgb, RgbImage};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::debug;

use crate::config::RenderConfig;
use crate::error::{WebcloudError, WebcloudResult};
use crate::text::FrequencyMap;

use super::CloudLayout;

/// 一个已放置的词语
#[derive(Debug, Clone, PartialEq)]
pub struct PlacedWord {
    pub word: String,
    pub font_size: u32,
    /// 词语左上角
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
    pub vertical: bool,
    pub color: Rgb<u8>,
}

/// 记录画布上哪些像素已被占用，并用积分图快速判断矩形区域是否空闲
pub struct OccupancyMap {
    width: u32,
    height: u32,
    occupied: Vec<bool>,
    integral: Vec<u32>,
}

impl OccupancyMap {
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            occupied: vec![false; width as usize * height as usize],
            integral: vec![0; (width as usize + 1) * (height as usize + 1)],
        }
    }

    fn integral_at(&self, x: u32, y: u32) -> u32 {
        self.integral[y as usize * (self.width as usize + 1) + x as usize]
    }

    /// 以 (x, y) 为左上角、大小为 w × h 的区域内已占用的像素数
    pub fn area(&self, x: u32, y: u32, w: u32, h: u32) -> u32 {
        self.integral_at(x + w, y + h) + self.integral_at(x, y)
            - self.integral_at(x + w, y)
            - self.integral_at(x, y + h)
    }

    /// 在所有能放下 w × h 矩形的空位中随机选择一个
    pub fn sample_position(&self, w: u32, h: u32, rng: &mut StdRng) -> Option<(u32, u32)> {
        if w == 0 || h == 0 || w > self.width || h > self.height {
            return None;
        }

        let hits = self.free_positions(w, h).count();
        if hits == 0 {
            return None;
        }

        let chosen = rng.gen_range(0..hits);
        self.free_positions(w, h).nth(chosen)
    }

    fn free_positions(&self, w: u32, h: u32) -> impl Iterator<Item = (u32, u32)> + '_ {
        (0..=self.height - h)
            .flat_map(move |y| (0..=self.width - w).map(move |x| (x, y)))
            .filter(move |&(x, y)| self.area(x, y, w, h) == 0)
    }

    /// 把蒙版中有墨迹的像素标记为已占用，并更新受影响的积分图区域
    pub fn mark(&mut self, mask: &GrayImage, left: u32, top: u32) {
        for (mx, my, pixel) in mask.enumerate_pixels() {
            let (x, y) = (left + mx, top + my);
            if pixel.0[0] > 0 && x < self.width && y < self.height {
                self.occupied[y as usize * self.width as usize + x as usize] = true;
            }
        }

        let stride = (self.width + 1) as usize;
        for y in (top + 1).min(self.height)..=self.height {
            for x in (left + 1).min(self.width)..=self.width {
                let (yu, xu) = (y as usize, x as usize);
                let cell = self.occupied[(yu - 1) * self.width as usize + (xu - 1)] as u32;
                self.integral[yu * stride + xu] = cell + self.integral[(yu - 1) * stride + xu]
                    + self.integral[yu * stride + xu - 1]
                    - self.integral[(yu - 1) * stride + xu - 1];
            }
        }
    }

    pub fn is_occupied(&self, x: u32, y: u32) -> bool {
        self.occupied[y as usize * self.width as usize + x as usize]
    }
}

/// 默认的词云布局实现
pub struct WordCloud {
    config: RenderConfig,
}

impl WordCloud {
    pub fn new(config: RenderConfig) -> Self {
        Self { config }
    }

    /// 按词频降序排列（次数相同时按词语排序），最多保留 `max_words` 个
    pub fn ordered_words<'a>(&self, frequencies: &'a FrequencyMap) -> Vec<(&'a str, usize)> {
        let mut words: Vec<(&str, usize)> = frequencies
            .iter()
            .filter(|(_, count)| **count > 0)
            .map(|(word, count)| (word.as_str(), *count))
            .collect();
        words.sort_by_key(|&(word, count)| (Reverse(count), word));
        words.truncate(self.config.max_words);
        words
    }

    /// 计算所有词语的位置、字号与颜色
    pub fn layout(&self, frequencies: &FrequencyMap, font: &FontRef) -> WebcloudResult<Vec<PlacedWord>> {
        let config = &self.config;
        let words = self.ordered_words(frequencies);
        let Some(&(_, max_count)) = words.first() else {
            return Err(WebcloudError::NoWords);
        };

        let mut rng = StdRng::seed_from_u64(config.random_seed);
        let mut occupancy = OccupancyMap::new(config.width, config.height);
        let mut placed = Vec::with_capacity(words.len());

        let mut font_size = config.max_font_size.unwrap_or(config.height);
        let mut last_freq = 1.0_f32;
        let rs = config.relative_scaling;

        for (word, count) in words {
            let freq = count as f32 / max_count as f32;
            if rs != 0.0 {
                font_size = ((rs * (freq / last_freq) + (1.0 - rs)) * font_size as f32).round() as u32;
            }

            let mut vertical = rng.gen::<f32>() >= config.prefer_horizontal;
            let mut tried_other_orientation = false;

            let found = loop {
                if font_size < config.min_font_size {
                    break None;
                }

                let (w, h) = measure(font, word, font_size as f32, vertical);
                let position = occupancy.sample_position(
                    w.saturating_add(config.margin),
                    h.saturating_add(config.margin),
                    &mut rng,
                );
                if let Some(position) = position {
                    break Some(position);
                }

                if !tried_other_orientation && config.prefer_horizontal < 1.0 {
                    vertical = !vertical;
                    tried_other_orientation = true;
                } else {
                    font_size = font_size.saturating_sub(config.font_step);
                    vertical = false;
                }
            };

            let Some((x, y)) = found else {
                debug!("No room left for \"{}\", stopping after {} word(s)", word, placed.len());
                break;
            };

            let mask = rasterize(font, word, font_size as f32, vertical);
            let (x, y) = (x + config.margin / 2, y + config.margin / 2);
            occupancy.mark(&mask, x, y);
            placed.push(PlacedWord {
                word: word.to_string(),
                font_size,
                x,
                y,
                width: mask.width(),
                height: mask.height(),
                vertical,
                color: random_color(&mut rng),
            });
            last_freq = freq;
        }

        Ok(placed)
    }

    /// 把已放置的词语绘制到画布上
    pub fn draw(&self, placed: &[PlacedWord], font: &FontRef) -> RgbImage {
        let mut canvas =
            RgbImage::from_pixel(self.config.width, self.config.height, Rgb(self.config.background));

        for word in placed {
            let mask = rasterize(font, &word.word, word.font_size as f32, word.vertical);
            blend_mask(&mut canvas, &mask, word.x, word.y, word.color);
        }

        canvas
    }
}

impl CloudLayout for WordCloud {
    fn layout_and_render(&self, frequencies: &FrequencyMap, font_data: &[u8]) -> WebcloudResult<Vec<u8>> {
        let font = FontRef::try_from_slice(font_data)
            .map_err(|e| WebcloudError::Render(format!("unusable font: {e}")))?;

        let placed = self.layout(frequencies, &font)?;
        debug!("Placed {} word(s)", placed.len());
        let canvas = self.draw(&placed, &font);

        let mut bytes = Vec::new();
        DynamicImage::ImageRgb8(canvas)
            .write_to(&mut Cursor::new(&mut bytes), ImageFormat::Png)
            .map_err(|e| WebcloudError::Render(format!("PNG encoding failed: {e}")))?;

        Ok(bytes)
    }
}

/// 排好的一行字形及其外框（横排时的宽高）
struct GlyphRun {
    glyphs: Vec<Glyph>,
    width: u32,
    height: u32,
}

fn layout_glyphs<F: Font>(font: &F, word: &str, size: f32) -> GlyphRun {
    let scale = PxScale::from(size);
    let scaled_font = font.as_scaled(scale);
    let ascent = scaled_font.ascent();

    let mut glyphs = Vec::new();
    let mut caret = 0.0_f32;
    let mut previous: Option<GlyphId> = None;
    for c in word.chars() {
        let glyph_id = scaled_font.glyph_id(c);
        if let Some(previous) = previous {
            caret += scaled_font.kern(previous, glyph_id);
        }
        glyphs.push(glyph_id.with_scale_and_position(scale, point(caret, ascent)));
        caret += scaled_font.h_advance(glyph_id);
        previous = Some(glyph_id);
    }

    GlyphRun {
        glyphs,
        width: (caret.ceil() as u32).max(1),
        height: ((ascent - scaled_font.descent()).ceil() as u32).max(1),
    }
}

/// 词语蒙版的宽高（竖排时交换），与 [`rasterize`] 的结果尺寸一致
pub fn measure<F: Font>(font: &F, word: &str, size: f32, vertical: bool) -> (u32, u32) {
    let run = layout_glyphs(font, word, size);
    if vertical {
        (run.height, run.width)
    } else {
        (run.width, run.height)
    }
}

/// 把词语栅格化为灰度蒙版，竖排时逆时针旋转 90 度
pub fn rasterize<F: Font>(font: &F, word: &str, size: f32, vertical: bool) -> GrayImage {
    let GlyphRun { glyphs, width, height } = layout_glyphs(font, word, size);
    let mut mask = GrayImage::new(width, height);

    for glyph in glyphs {
        let Some(outlined) = font.outline_glyph(glyph) else {
            continue;
        };
        let bounds = outlined.px_bounds();
        outlined.draw(|gx, gy, coverage| {
            let x = bounds.min.x as i32 + gx as i32;
            let y = bounds.min.y as i32 + gy as i32;
            if x >= 0 && y >= 0 && (x as u32) < width && (y as u32) < height {
                let pixel = mask.get_pixel_mut(x as u32, y as u32);
                let value = (coverage.clamp(0.0, 1.0) * 255.0).round() as u8;
                pixel.0[0] = pixel.0[0].max(value);
            }
        });
    }

    if vertical {
        rotate270(&mask)
    } else {
        mask
    }
}

fn blend_mask(canvas: &mut RgbImage, mask: &GrayImage, left: u32, top: u32, color: Rgb<u8>) {
    for (mx, my, coverage) in mask.enumerate_pixels() {
        let (x, y) = (left + mx, top + my);
        if coverage.0[0] == 0 || x >= canvas.width() || y >= canvas.height() {
            continue;
        }

        let alpha = coverage.0[0] as f32 / 255.0;
        let pixel = canvas.get_pixel_mut(x, y);
        for channel in 0..3 {
            let blended = pixel.0[channel] as f32 * (1.0 - alpha) + color.0[channel] as f32 * alpha;
            pixel.0[channel] = blended.round() as u8;
        }
    }
}

/// 随机色相、全饱和、偏暗的颜色
fn random_color(rng: &mut StdRng) -> Rgb<u8> {
    let hue = 360.0 * rng.gen_range(0..=255) as f32 / 255.0;
    let lightness = rng.gen_range(60..=120) as f32 / 255.0;
    hsl_to_rgb(hue, 1.0, lightness)
}

/// HSL（色相为角度，饱和度与亮度为 0.0–1.0）转 RGB
pub fn hsl_to_rgb(hue: f32, saturation: f32, lightness: f32) -> Rgb<u8> {
    let chroma = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let h = (hue % 360.0) / 60.0;
    let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());

    let (r, g, b) = match h as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };

    let m = lightness - chroma / 2.0;
    let to_channel = |v: f32| ((v + m) * 255.0).round().clamp(0.0, 255.0) as u8;
    Rgb([to_channel(r), to_channel(g), to_channel(b)])
}
