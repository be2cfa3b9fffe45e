//! 统一的环境变量管理系统
//!
//! 提供类型安全、可验证的环境变量访问，用于覆盖配置文件中的值

use std::env;
use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

/// 环境变量解析错误
#[derive(Debug, Clone)]
pub struct EnvError {
    pub variable: String,
    pub message: String,
}

impl fmt::Display for EnvError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Environment variable '{}': {}", self.variable, self.message)
    }
}

impl std::error::Error for EnvError {}

pub type EnvResult<T> = Result<T, EnvError>;

/// 环境变量访问器特性
pub trait EnvVar<T> {
    const NAME: &'static str;
    const DEFAULT: Option<T>;
    const DESCRIPTION: &'static str;

    fn parse(value: &str) -> EnvResult<T>;

    fn get() -> EnvResult<T> {
        match env::var(Self::NAME) {
            Ok(value) => Self::parse(&value),
            Err(_) => {
                if let Some(default) = Self::DEFAULT {
                    Ok(default)
                } else {
                    Err(EnvError {
                        variable: Self::NAME.to_string(),
                        message: "Required environment variable not set".to_string(),
                    })
                }
            }
        }
    }

    /// 只在变量确实被设置时返回值
    fn get_if_set() -> EnvResult<Option<T>> {
        match env::var(Self::NAME) {
            Ok(value) => Self::parse(&value).map(Some),
            Err(_) => Ok(None),
        }
    }

    fn get_or_default(default: T) -> T {
        Self::get().unwrap_or(default)
    }
}

/// 核心环境变量定义
pub mod core {
    use super::*;

    /// 日志级别
    pub struct LogLevel;
    impl EnvVar<String> for LogLevel {
        const NAME: &'static str = "WEBCLOUD_LOG_LEVEL";
        const DEFAULT: Option<String> = None;

        fn get() -> EnvResult<String> {
            match env::var(Self::NAME) {
                Ok(value) => Self::parse(&value),
                Err(_) => Ok("info".to_string()),
            }
        }
        const DESCRIPTION: &'static str = "Log level: trace, debug, info, warn, error";

        fn parse(value: &str) -> EnvResult<String> {
            match value.to_lowercase().as_str() {
                "trace" | "debug" | "info" | "warn" | "error" => Ok(value.to_lowercase()),
                _ => Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: format!(
                        "Invalid log level '{}'. Use: trace, debug, info, warn, error",
                        value
                    ),
                }),
            }
        }
    }

    /// 禁用颜色输出
    pub struct NoColor;
    impl EnvVar<bool> for NoColor {
        const NAME: &'static str = "NO_COLOR";
        const DEFAULT: Option<bool> = Some(false);
        const DESCRIPTION: &'static str = "Disable colored output when set to any value";

        fn parse(value: &str) -> EnvResult<bool> {
            // NO_COLOR 遵循标准：任何值都表示禁用颜色
            Ok(!value.is_empty())
        }
    }
}

/// 抓取相关环境变量
pub mod fetch {
    use super::*;

    /// 单个页面的超时时间（秒）
    pub struct Timeout;
    impl EnvVar<Duration> for Timeout {
        const NAME: &'static str = "WEBCLOUD_TIMEOUT";
        const DEFAULT: Option<Duration> = Some(Duration::from_secs(15));
        const DESCRIPTION: &'static str = "Per-page fetch timeout in seconds";

        fn parse(value: &str) -> EnvResult<Duration> {
            let seconds = parse_positive_usize(value, Self::NAME, 1, 600)?;
            Ok(Duration::from_secs(seconds as u64))
        }
    }

    /// 请求使用的 User-Agent
    pub struct UserAgent;
    impl EnvVar<String> for UserAgent {
        const NAME: &'static str = "WEBCLOUD_USER_AGENT";
        const DEFAULT: Option<String> = None;
        const DESCRIPTION: &'static str = "User-Agent header sent with every request";

        fn parse(value: &str) -> EnvResult<String> {
            let value = value.trim();
            if value.is_empty() {
                return Err(EnvError {
                    variable: Self::NAME.to_string(),
                    message: "User agent must not be empty".to_string(),
                });
            }
            Ok(value.to_string())
        }
    }
}

/// 词频统计相关环境变量
pub mod words {
    use super::*;

    /// 最低词频
    pub struct MinFrequency;
    impl EnvVar<usize> for MinFrequency {
        const NAME: &'static str = "WEBCLOUD_MIN_FREQUENCY";
        const DEFAULT: Option<usize> = Some(3);
        const DESCRIPTION: &'static str = "Minimum number of occurrences for a word to be drawn";

        fn parse(value: &str) -> EnvResult<usize> {
            parse_positive_usize(value, Self::NAME, 1, usize::MAX)
        }
    }

    /// 最短词长（字符数）
    pub struct MinLength;
    impl EnvVar<usize> for MinLength {
        const NAME: &'static str = "WEBCLOUD_MIN_LENGTH";
        const DEFAULT: Option<usize> = Some(2);
        const DESCRIPTION: &'static str = "Minimum word length in characters";

        fn parse(value: &str) -> EnvResult<usize> {
            parse_positive_usize(value, Self::NAME, 1, 64)
        }
    }

    /// 停用词文件
    pub struct StopwordsPath;
    impl EnvVar<PathBuf> for StopwordsPath {
        const NAME: &'static str = "WEBCLOUD_STOPWORDS";
        const DEFAULT: Option<PathBuf> = None;
        const DESCRIPTION: &'static str = "Stopword file, one word per line";

        fn parse(value: &str) -> EnvResult<PathBuf> {
            parse_path(value, Self::NAME)
        }
    }
}

/// 渲染相关环境变量
pub mod render {
    use super::*;

    /// 字体文件
    pub struct FontPath;
    impl EnvVar<PathBuf> for FontPath {
        const NAME: &'static str = "WEBCLOUD_FONT_PATH";
        const DEFAULT: Option<PathBuf> = None;
        const DESCRIPTION: &'static str = "TrueType/OpenType font with CJK glyphs";

        fn parse(value: &str) -> EnvResult<PathBuf> {
            parse_path(value, Self::NAME)
        }
    }
}

/// 辅助函数
fn parse_positive_usize(value: &str, var_name: &str, min: usize, max: usize) -> EnvResult<usize> {
    let num: usize = value.trim().parse().map_err(|_| EnvError {
        variable: var_name.to_string(),
        message: "Must be a valid positive number".to_string(),
    })?;

    if num < min {
        return Err(EnvError {
            variable: var_name.to_string(),
            message: format!("Value {} is below minimum {}", num, min),
        });
    }

    if num > max {
        return Err(EnvError {
            variable: var_name.to_string(),
            message: format!("Value {} exceeds maximum {}", num, max),
        });
    }

    Ok(num)
}

fn parse_path(value: &str, var_name: &str) -> EnvResult<PathBuf> {
    let value = value.trim();
    if value.is_empty() {
        return Err(EnvError {
            variable: var_name.to_string(),
            message: "Path must not be empty".to_string(),
        });
    }
    Ok(PathBuf::from(shellexpand::tilde(value).as_ref()))
}

/// 环境变量配置汇总
#[derive(Debug, Clone)]
pub struct EnvConfig {
    pub log_level: String,
    pub no_color: bool,
    pub timeout: Duration,
    pub user_agent: Option<String>,
    pub min_frequency: usize,
    pub min_length: usize,
    pub stopwords_path: Option<PathBuf>,
    pub font_path: Option<PathBuf>,
}

impl EnvConfig {
    /// 从环境变量加载配置
    pub fn from_env() -> EnvResult<Self> {
        Ok(Self {
            log_level: core::LogLevel::get()?,
            no_color: core::NoColor::get()?,
            timeout: fetch::Timeout::get()?,
            user_agent: fetch::UserAgent::get_if_set()?,
            min_frequency: words::MinFrequency::get()?,
            min_length: words::MinLength::get()?,
            stopwords_path: words::StopwordsPath::get_if_set()?,
            font_path: render::FontPath::get_if_set()?,
        })
    }

    /// 打印配置摘要
    pub fn print_summary(&self) {
        println!("Environment Configuration Summary:");
        println!("  Log Level: {}", self.log_level);
        println!("  Timeout: {}s", self.timeout.as_secs());
        println!("  Min Frequency: {}", self.min_frequency);
        println!("  Min Length: {}", self.min_length);
        if let Some(font_path) = &self.font_path {
            println!("  Font: {}", font_path.display());
        }
    }
}

/// 环境变量文档生成器
pub fn generate_env_docs() -> String {
    let mut docs = String::new();
    docs.push_str("# Environment Variables Documentation\n\n");

    docs.push_str("## Core Configuration\n\n");
    docs.push_str(&format!(
        "- `{}`: {} (default: \"info\")\n",
        core::LogLevel::NAME,
        core::LogLevel::DESCRIPTION
    ));
    docs.push_str(&format!(
        "- `{}`: {} (default: {:?})\n",
        core::NoColor::NAME,
        core::NoColor::DESCRIPTION,
        core::NoColor::DEFAULT
    ));

    docs.push_str("\n## Fetch Configuration\n\n");
    docs.push_str(&format!(
        "- `{}`: {} (default: {:?})\n",
        fetch::Timeout::NAME,
        fetch::Timeout::DESCRIPTION,
        fetch::Timeout::DEFAULT
    ));
    docs.push_str(&format!(
        "- `{}`: {} (default: browser-like)\n",
        fetch::UserAgent::NAME,
        fetch::UserAgent::DESCRIPTION
    ));

    docs.push_str("\n## Word Configuration\n\n");
    docs.push_str(&format!(
        "- `{}`: {} (default: {:?})\n",
        words::MinFrequency::NAME,
        words::MinFrequency::DESCRIPTION,
        words::MinFrequency::DEFAULT
    ));
    docs.push_str(&format!(
        "- `{}`: {} (default: {:?})\n",
        words::MinLength::NAME,
        words::MinLength::DESCRIPTION,
        words::MinLength::DEFAULT
    ));
    docs.push_str(&format!(
        "- `{}`: {} (default: {:?})\n",
        words::StopwordsPath::NAME,
        words::StopwordsPath::DESCRIPTION,
        words::StopwordsPath::DEFAULT
    ));

    docs.push_str("\n## Render Configuration\n\n");
    docs.push_str(&format!(
        "- `{}`: {} (default: {:?})\n",
        render::FontPath::NAME,
        render::FontPath::DESCRIPTION,
        render::FontPath::DEFAULT
    ));

    docs
}
