use std::cmp::Reverse;
use std::collections::HashMap;

use tracing::info;

use super::stopwords::StopWords;

/// 词语 → 出现次数
pub type FrequencyMap = HashMap<String, usize>;

/// 词频统计的过滤条件
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WordFilter {
    /// 最低出现次数
    pub min_freq: usize,
    /// 最短长度（字符数）
    pub min_len: usize,
}

impl Default for WordFilter {
    fn default() -> Self {
        Self {
            min_freq: 1,
            min_len: 1,
        }
    }
}

/// 规范化词语：去掉首尾空白并转小写
pub fn normalize_token(token: &str) -> String {
    token.trim().to_lowercase()
}

/// 统计词频，跳过空词、停用词和过短的词
pub fn count_words<I, S>(tokens: I, stopwords: &StopWords, min_len: usize) -> FrequencyMap
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut word_counts = FrequencyMap::new();

    for token in tokens {
        let word = normalize_token(token.as_ref());
        if word.is_empty() || stopwords.contains(&word) || word.chars().count() < min_len {
            continue;
        }
        *word_counts.entry(word).or_insert(0) += 1;
    }

    word_counts
}

/// 统计词频并过滤停用词、短词和低频词
pub fn count_and_filter<I, S>(tokens: I, stopwords: &StopWords, filter: WordFilter) -> FrequencyMap
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut word_counts = count_words(tokens, stopwords, filter.min_len);
    word_counts.retain(|_, count| *count >= filter.min_freq);

    info!("{} word(s) left for the word cloud after filtering", word_counts.len());
    word_counts
}

/// 出现次数最多的 `n` 个词，次数相同时按词语排序
pub fn top_words(frequencies: &FrequencyMap, n: usize) -> Vec<(&str, usize)> {
    let mut words: Vec<(&str, usize)> = frequencies
        .iter()
        .map(|(word, count)| (word.as_str(), *count))
        .collect();
    words.sort_by_key(|&(word, count)| (Reverse(count), word));
    words.truncate(n);
    words
}
