use crate::cache::DEFAULT_TTL_MS;
use crate::ranker::SIMILARITY_THRESHOLD;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const APP_DIR: &str = "voice-faq";

/// 应用配置
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub matching: MatchingConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// 问答目录接口地址
    #[serde(default = "default_catalog_url")]
    pub url: String,
    /// 请求超时（毫秒）
    #[serde(default = "default_timeout")]
    pub timeout_ms: u64,
    /// 缓存有效期（毫秒）
    #[serde(default = "default_cache_ttl")]
    pub cache_ttl_ms: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchingConfig {
    /// 相似度阈值
    #[serde(default = "default_similarity_threshold")]
    pub similarity_threshold: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// 未匹配时使用的搜索页
    #[serde(default = "default_search_base_url")]
    pub base_url: String,
    /// 搜索词参数名
    #[serde(default = "default_search_query_param")]
    pub query_param: String,
    /// 条目图片的相对路径以此为基准
    #[serde(default = "default_image_base_url")]
    pub image_base_url: Option<String>,
}

fn default_catalog_url() -> String {
    "http://127.0.0.1:5000/api/faqs".to_string()
}
fn default_timeout() -> u64 {
    5000
}
fn default_cache_ttl() -> i64 {
    DEFAULT_TTL_MS
}
fn default_similarity_threshold() -> f64 {
    SIMILARITY_THRESHOLD
}
fn default_search_base_url() -> String {
    "https://www.goarmy.com/search".to_string()
}
fn default_search_query_param() -> String {
    "fulltext".to_string()
}
fn default_image_base_url() -> Option<String> {
    Some("https://www.goarmy.com".to_string())
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            url: default_catalog_url(),
            timeout_ms: default_timeout(),
            cache_ttl_ms: default_cache_ttl(),
        }
    }
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            similarity_threshold: default_similarity_threshold(),
        }
    }
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            base_url: default_search_base_url(),
            query_param: default_search_query_param(),
            image_base_url: default_image_base_url(),
        }
    }
}

/// 获取配置文件路径
pub fn config_path() -> PathBuf {
    let config_dir = dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR);
    config_dir.join("config.toml")
}

/// 问答目录缓存所在目录
pub fn cache_dir() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(APP_DIR)
}

/// 加载配置，文件不存在则创建默认配置
pub fn load_config() -> Result<AppConfig, String> {
    load_config_from(&config_path())
}

pub fn load_config_from(path: &Path) -> Result<AppConfig, String> {
    if path.exists() {
        let content = fs::read_to_string(path).map_err(|e| format!("读取配置失败: {e}"))?;
        toml::from_str(&content).map_err(|e| format!("解析配置失败: {e}"))
    } else {
        let config = AppConfig::default();
        save_config(path, &config)?;
        Ok(config)
    }
}

/// 保存配置到文件
pub fn save_config(path: &Path, config: &AppConfig) -> Result<(), String> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).map_err(|e| format!("创建配置目录失败: {e}"))?;
    }
    let content = toml::to_string_pretty(config).map_err(|e| format!("序列化配置失败: {e}"))?;
    fs::write(path, content).map_err(|e| format!("写入配置失败: {e}"))?;
    Ok(())
}
