use std::sync::OnceLock;

use regex::Regex;

/// 中文（基本区 U+4E00–U+9FA5）、英文字母与数字以外的连续字符
const NON_WORD_PATTERN: &str = r"[^\x{4e00}-\x{9fa5}a-zA-Z0-9]+";

fn non_word_regex() -> &'static Regex {
    static NON_WORD_REGEX: OnceLock<Regex> = OnceLock::new();
    NON_WORD_REGEX.get_or_init(|| Regex::new(NON_WORD_PATTERN).expect("cleaner pattern is valid"))
}

/// 是否为清理后保留的字符
pub fn is_kept_char(c: char) -> bool {
    ('\u{4e00}'..='\u{9fa5}').contains(&c) || c.is_ascii_alphanumeric()
}

/// 删除所有标点、空白和其他字符，只保留中文、英文和数字
///
/// 被删除的片段不会被替换成空格，保留下来的部分直接相连。
pub fn clean_text(text: &str) -> String {
    non_word_regex().replace_all(text, "").into_owned()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_punctuation_run_removed_without_space() {
        assert_eq!(clean_text("你好你好世界测试abc123!!!"), "你好你好世界测试abc123");
    }

    #[test]
    fn test_whitespace_and_markers_removed() {
        assert_eq!(
            clean_text("--- Start of Content from https://a.example/ ---\n你好 世界\n"),
            "StartofContentfromhttpsaexample你好世界"
        );
    }

    #[test]
    fn test_other_scripts_removed() {
        assert_eq!(clean_text("こんにちは한국어Ωmega，。“”"), "mega");
        assert_eq!(clean_text("全角ＡＢＣ１２３"), "全角");
    }

    #[test]
    fn test_idempotent() {
        let samples = [
            "你好，世界！Hello, World 2024",
            "--- End of Content from x ---\n\n",
            "",
            "纯中文",
        ];
        for sample in samples {
            let once = clean_text(sample);
            assert_eq!(clean_text(&once), once);
            assert!(once.chars().all(is_kept_char));
        }
    }

    #[test]
    fn test_range_boundaries() {
        assert_eq!(clean_text("\u{4dff}\u{4e00}\u{9fa5}\u{9fa6}"), "\u{4e00}\u{9fa5}");
    }
}
