//! 配置管理
//!
//! 配置按 默认值 → 配置文件 → 环境变量 → 命令行 的顺序叠加，
//! 最终得到一个显式传给各阶段的 `WebcloudConfig`。

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{WebcloudError, WebcloudResult};

/// 默认值与常量
pub mod constants {
    /// 按顺序查找的配置文件
    pub const CONFIG_PATHS: &[&str] = &[
        "./webcloud.toml",
        "./.webcloud.toml",
        "~/.config/webcloud/config.toml",
    ];

    /// 按顺序尝试加载的 .env 文件，只加载第一个存在的
    pub const ENV_FILES: &[&str] = &[".env.local", ".env"];

    pub const DEFAULT_SCRAPED_OUTPUT: &str = "scraped_website_text.txt";
    pub const DEFAULT_WORDCLOUD_OUTPUT: &str = "website_wordcloud.png";
    pub const DEFAULT_STOPWORDS: &str = "stop_words.txt";

    pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";
    pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

    pub const DEFAULT_MIN_FREQUENCY: usize = 3;
    pub const DEFAULT_MIN_LENGTH: usize = 2;
    pub const DEFAULT_TOP_WORDS: usize = 20;

    pub const DEFAULT_BACKGROUND: [u8; 3] = [255, 255, 255];
    pub const DEFAULT_MAX_WORDS: usize = 2000;
    pub const DEFAULT_WIDTH: u32 = 800;
    pub const DEFAULT_HEIGHT: u32 = 600;
    pub const MAX_CANVAS_SIDE: u32 = 8192;
    pub const DEFAULT_MARGIN: u32 = 5;
    pub const DEFAULT_RANDOM_SEED: u64 = 42;
    pub const DEFAULT_PREFER_HORIZONTAL: f32 = 0.9;
    pub const DEFAULT_MIN_FONT_SIZE: u32 = 4;
    pub const DEFAULT_FONT_STEP: u32 = 1;
    pub const DEFAULT_RELATIVE_SCALING: f32 = 0.5;
}

/// 词云渲染配置
///
/// 默认值保证同样的词频与字体得到逐字节相同的图片。
/// 相邻词语从不合并成词组渲染。
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct RenderConfig {
    /// 背景颜色 (RGB)
    pub background: [u8; 3],
    /// 最多绘制的词语数量
    pub max_words: usize,
    pub width: u32,
    pub height: u32,
    /// 词语之间的间距（像素）
    pub margin: u32,
    /// 布局随机数种子
    pub random_seed: u64,
    /// 横排概率，其余词语竖排
    pub prefer_horizontal: f32,
    pub min_font_size: u32,
    /// 最大字号，未设置时取画布高度
    pub max_font_size: Option<u32>,
    /// 放不下时每次缩小的字号
    pub font_step: u32,
    /// 词频对字号的影响程度 (0.0 - 1.0)
    pub relative_scaling: f32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            background: constants::DEFAULT_BACKGROUND,
            max_words: constants::DEFAULT_MAX_WORDS,
            width: constants::DEFAULT_WIDTH,
            height: constants::DEFAULT_HEIGHT,
            margin: constants::DEFAULT_MARGIN,
            random_seed: constants::DEFAULT_RANDOM_SEED,
            prefer_horizontal: constants::DEFAULT_PREFER_HORIZONTAL,
            min_font_size: constants::DEFAULT_MIN_FONT_SIZE,
            max_font_size: None,
            font_step: constants::DEFAULT_FONT_STEP,
            relative_scaling: constants::DEFAULT_RELATIVE_SCALING,
        }
    }
}

impl RenderConfig {
    /// 验证配置
    pub fn validate(&self) -> WebcloudResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(WebcloudError::Config("canvas must not be empty".to_string()));
        }
        if self.width > constants::MAX_CANVAS_SIDE || self.height > constants::MAX_CANVAS_SIDE {
            return Err(WebcloudError::Config(format!(
                "canvas {}x{} exceeds the {} pixel limit per side",
                self.width,
                self.height,
                constants::MAX_CANVAS_SIDE
            )));
        }
        if self.max_words == 0 {
            return Err(WebcloudError::Config("max_words must be at least 1".to_string()));
        }
        if self.min_font_size == 0 || self.font_step == 0 {
            return Err(WebcloudError::Config(
                "min_font_size and font_step must be at least 1".to_string(),
            ));
        }
        if let Some(max_font_size) = self.max_font_size {
            if max_font_size < self.min_font_size {
                return Err(WebcloudError::Config(format!(
                    "max_font_size {} is below min_font_size {}",
                    max_font_size, self.min_font_size
                )));
            }
        }
        if !(0.0..=1.0).contains(&self.prefer_horizontal)
            || !(0.0..=1.0).contains(&self.relative_scaling)
        {
            return Err(WebcloudError::Config(
                "prefer_horizontal and relative_scaling must be within 0.0..=1.0".to_string(),
            ));
        }
        Ok(())
    }
}

/// 完整的流水线配置
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct WebcloudConfig {
    /// 要抓取的网页，也可以是本地 HTML 文件
    pub urls: Vec<String>,
    /// 抓取结果保存位置
    pub scraped_output: PathBuf,
    /// 词云图片保存位置
    pub wordcloud_output: PathBuf,
    /// 支持中文的字体文件
    pub font_path: Option<PathBuf>,
    /// 停用词文件（可选）
    pub stopwords_path: Option<PathBuf>,
    /// jieba 用户词典（可选）
    pub user_dict_path: Option<PathBuf>,
    pub min_frequency: usize,
    pub min_length: usize,
    pub timeout_secs: u64,
    pub user_agent: String,
    /// 日志中列出的高频词数量
    pub top_words: usize,
    pub render: RenderConfig,
}

impl Default for WebcloudConfig {
    fn default() -> Self {
        Self {
            urls: Vec::new(),
            scraped_output: PathBuf::from(constants::DEFAULT_SCRAPED_OUTPUT),
            wordcloud_output: PathBuf::from(constants::DEFAULT_WORDCLOUD_OUTPUT),
            font_path: None,
            stopwords_path: Some(PathBuf::from(constants::DEFAULT_STOPWORDS)),
            user_dict_path: None,
            min_frequency: constants::DEFAULT_MIN_FREQUENCY,
            min_length: constants::DEFAULT_MIN_LENGTH,
            timeout_secs: constants::DEFAULT_TIMEOUT_SECS,
            user_agent: constants::DEFAULT_USER_AGENT.to_string(),
            top_words: constants::DEFAULT_TOP_WORDS,
            render: RenderConfig::default(),
        }
    }
}

impl WebcloudConfig {
    /// 加载配置：`.env`、配置文件、环境变量覆盖
    ///
    /// 显式给出的配置文件必须存在；否则依次查找 `CONFIG_PATHS`，都不存在时使用默认配置。
    pub fn load(explicit_path: Option<&Path>) -> WebcloudResult<Self> {
        Self::load_dotenv();

        let mut config = match explicit_path {
            Some(path) => {
                if !path.exists() {
                    return Err(WebcloudError::InputNotFound(path.to_path_buf()));
                }
                tracing::info!("Loading config file {}", path.display());
                Self::load_from_file(path)?
            }
            None => Self::find_config_file()?,
        };

        config.apply_env_overrides()?;
        Ok(config)
    }

    fn find_config_file() -> WebcloudResult<Self> {
        for path in constants::CONFIG_PATHS {
            let expanded_path = shellexpand::tilde(path);
            let path = Path::new(expanded_path.as_ref());
            if path.exists() {
                tracing::info!("Loading config file {}", path.display());
                return Self::load_from_file(path);
            }
        }

        tracing::debug!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// 从指定文件加载配置，按扩展名区分 TOML 与 JSON
    pub fn load_from_file(path: &Path) -> WebcloudResult<Self> {
        let content =
            std::fs::read_to_string(path).map_err(|e| WebcloudError::io(path, e))?;

        let is_json = path
            .extension()
            .map_or(false, |ext| ext.eq_ignore_ascii_case("json"));

        if is_json {
            serde_json::from_str(&content).map_err(|e| {
                WebcloudError::Config(format!("failed to parse {}: {}", path.display(), e))
            })
        } else {
            toml::from_str(&content).map_err(|e| {
                WebcloudError::Config(format!("failed to parse {}: {}", path.display(), e))
            })
        }
    }

    /// 加载 .env 文件
    fn load_dotenv() {
        for env_file in constants::ENV_FILES {
            if Path::new(env_file).exists() && dotenv::from_filename(env_file).is_ok() {
                tracing::debug!("Loaded environment file {}", env_file);
                break;
            }
        }
    }

    /// 应用环境变量覆盖
    pub fn apply_env_overrides(&mut self) -> WebcloudResult<()> {
        use crate::env::{fetch, render, words, EnvVar};

        let to_config_error = |e: crate::env::EnvError| WebcloudError::Config(e.to_string());

        if let Some(timeout) = fetch::Timeout::get_if_set().map_err(to_config_error)? {
            self.timeout_secs = timeout.as_secs();
        }
        if let Some(user_agent) = fetch::UserAgent::get_if_set().map_err(to_config_error)? {
            self.user_agent = user_agent;
        }
        if let Some(min_frequency) = words::MinFrequency::get_if_set().map_err(to_config_error)? {
            self.min_frequency = min_frequency;
        }
        if let Some(min_length) = words::MinLength::get_if_set().map_err(to_config_error)? {
            self.min_length = min_length;
        }
        if let Some(stopwords) = words::StopwordsPath::get_if_set().map_err(to_config_error)? {
            self.stopwords_path = Some(stopwords);
        }
        if let Some(font_path) = render::FontPath::get_if_set().map_err(to_config_error)? {
            tracing::debug!("Font path overridden by environment: {}", font_path.display());
            self.font_path = Some(font_path);
        }

        Ok(())
    }

    /// 验证配置
    pub fn validate(&self) -> WebcloudResult<()> {
        if self.min_frequency == 0 {
            return Err(WebcloudError::Config("min_frequency must be at least 1".to_string()));
        }
        if self.min_length == 0 {
            return Err(WebcloudError::Config("min_length must be at least 1".to_string()));
        }
        if self.timeout_secs == 0 {
            return Err(WebcloudError::Config("timeout_secs must be at least 1".to_string()));
        }
        self.render.validate()
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// 生成示例配置文件
    pub fn generate_example_config(path: &Path) -> WebcloudResult<()> {
        let mut config = Self::default();
        config.urls = vec!["https://www.example.com/".to_string()];
        config.font_path = Some(PathBuf::from("fonts/simhei.ttf"));

        let content = toml::to_string_pretty(&config).map_err(|e| {
            WebcloudError::Config(format!("failed to serialize example config: {}", e))
        })?;

        std::fs::write(path, content).map_err(|e| WebcloudError::io(path, e))
    }
}
