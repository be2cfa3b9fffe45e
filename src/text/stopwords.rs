use std::collections::HashSet;
use std::fs;
use std::path::Path;

use tracing::{error, info, warn};

/// 停用词集合
///
/// 条目在加载时去掉首尾空白并转为小写，与计数时规范化后的词语保持一致。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StopWords {
    words: HashSet<String>,
}

impl StopWords {
    pub fn new() -> Self {
        Self::default()
    }

    /// 从文件加载停用词，每行一个
    ///
    /// 未配置、文件不存在或读取失败时返回空集合，流水线照常进行。
    pub fn load(path: Option<&Path>) -> Self {
        let Some(path) = path else {
            return Self::new();
        };

        if !path.exists() {
            warn!(
                "Stopword file not found: {}, skipping stopword filtering",
                path.display()
            );
            return Self::new();
        }

        match fs::read_to_string(path) {
            Ok(content) => {
                let stopwords = Self::parse(&content);
                info!("Loaded {} stopword(s) from {}", stopwords.len(), path.display());
                stopwords
            }
            Err(e) => {
                error!("Failed to load stopword file {}: {}", path.display(), e);
                Self::new()
            }
        }
    }

    /// 解析停用词文件内容，忽略空行
    pub fn parse(content: &str) -> Self {
        content.lines().collect()
    }

    pub fn contains(&self, word: &str) -> bool {
        self.words.contains(word)
    }

    pub fn len(&self) -> usize {
        self.words.len()
    }

    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }
}

impl<S: AsRef<str>> FromIterator<S> for StopWords {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let words = iter
            .into_iter()
            .map(|word| word.as_ref().trim().to_lowercase())
            .filter(|word| !word.is_empty())
            .collect();
        Self { words }
    }
}
