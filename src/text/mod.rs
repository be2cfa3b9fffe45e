//! # 文本处理模块
//!
//! 清理 → 分词 → 过滤计数，产出交给渲染阶段的词频表：
//!
//! - `cleaner` - 只保留中文、英文字母和数字
//! - `segmenter` - 分词器特性与 jieba 实现
//! - `stopwords` - 停用词加载
//! - `counter` - 规范化、过滤与计数

pub mod cleaner;
pub mod counter;
pub mod segmenter;
pub mod stopwords;

pub use cleaner::{clean_text, is_kept_char};
pub use counter::{count_and_filter, count_words, normalize_token, top_words, FrequencyMap, WordFilter};
pub use segmenter::{JiebaSegmenter, Segmenter, WhitespaceSegmenter};
pub use stopwords::StopWords;

/// 对原始文本执行完整的文本处理流程
pub fn word_frequencies(
    raw_text: &str,
    segmenter: &dyn Segmenter,
    stopwords: &StopWords,
    filter: WordFilter,
) -> FrequencyMap {
    tracing::info!("Cleaning text");
    let cleaned_text = clean_text(raw_text);

    tracing::info!("Segmenting {} characters", cleaned_text.chars().count());
    let tokens = segmenter.segment(&cleaned_text);

    tracing::info!("Counting and filtering words");
    count_and_filter(tokens, stopwords, filter)
}
