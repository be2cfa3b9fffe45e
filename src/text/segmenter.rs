//! 分词
//!
//! 计数阶段只依赖 `Segmenter` 特性，按顺序消费一次词语序列；
//! 默认实现使用 jieba 精确模式（未登录词使用 HMM）。

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use jieba_rs::Jieba;
use tracing::info;

use crate::error::{WebcloudError, WebcloudResult};

/// 分词器
pub trait Segmenter {
    /// 把文本切分为词语序列，词语都是输入的子串
    fn segment<'a>(&'a self, text: &'a str) -> Box<dyn Iterator<Item = &'a str> + 'a>;
}

/// 基于 jieba 词典的中文分词器
pub struct JiebaSegmenter {
    jieba: Jieba,
}

impl JiebaSegmenter {
    /// 使用内置词典
    pub fn new() -> Self {
        Self { jieba: Jieba::new() }
    }

    /// 使用内置词典并加载用户词典（每行 `词语 [词频] [词性]`）
    pub fn with_user_dict(path: &Path) -> WebcloudResult<Self> {
        let mut segmenter = Self::new();
        let file = File::open(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                WebcloudError::InputNotFound(path.to_path_buf())
            } else {
                WebcloudError::io(path, e)
            }
        })?;

        segmenter
            .jieba
            .load_dict(&mut BufReader::new(file))
            .map_err(|e| {
                WebcloudError::Config(format!(
                    "invalid user dictionary {}: {:?}",
                    path.display(),
                    e
                ))
            })?;
        info!("Loaded user dictionary {}", path.display());

        Ok(segmenter)
    }
}

impl Default for JiebaSegmenter {
    fn default() -> Self {
        Self::new()
    }
}

impl Segmenter for JiebaSegmenter {
    fn segment<'a>(&'a self, text: &'a str) -> Box<dyn Iterator<Item = &'a str> + 'a> {
        Box::new(self.jieba.cut(text, true).into_iter())
    }
}

/// 按空白切分，适用于已经分好词的文本
#[derive(Debug, Default, Clone, Copy)]
pub struct WhitespaceSegmenter;

impl Segmenter for WhitespaceSegmenter {
    fn segment<'a>(&'a self, text: &'a str) -> Box<dyn Iterator<Item = &'a str> + 'a> {
        Box::new(text.split_whitespace())
    }
}
