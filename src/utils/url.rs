use std::path::{Path, PathBuf};

pub use url::Url;

use crate::error::FetchError;

/// 抓取来源：远程网页或本地 HTML 文件
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    Remote(Url),
    Local(PathBuf),
}

/// 检查字符串是否是带协议的 URL
pub fn is_url_and_has_protocol(input: &str) -> bool {
    match Url::parse(input) {
        Ok(parsed_url) => !parsed_url.scheme().is_empty(),
        Err(_) => false,
    }
}

/// 把配置中的一项解析为抓取来源
///
/// `http(s)://` 为远程网页，`file://` 或已存在的路径为本地文件，其余都视为无效。
pub fn parse_source(input: &str) -> Result<Source, FetchError> {
    let trimmed = input.trim();

    if let Ok(parsed_url) = Url::parse(trimmed) {
        match parsed_url.scheme() {
            "http" | "https" => return Ok(Source::Remote(parsed_url)),
            "file" => {
                return parsed_url
                    .to_file_path()
                    .map(Source::Local)
                    .map_err(|_| FetchError::InvalidUrl(input.to_string()));
            }
            // Windows 盘符会被解析成单字母协议
            scheme if scheme.len() > 1 => return Err(FetchError::InvalidUrl(input.to_string())),
            _ => {}
        }
    }

    let path = Path::new(trimmed);
    if !trimmed.is_empty() && path.exists() {
        Ok(Source::Local(path.to_path_buf()))
    } else {
        Err(FetchError::InvalidUrl(input.to_string()))
    }
}
