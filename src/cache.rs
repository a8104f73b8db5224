use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::sync::{Mutex, PoisonError};

/// 固定的缓存键
pub const CACHE_KEY: &str = "faqCache";

/// 默认缓存有效期：1 小时
pub const DEFAULT_TTL_MS: i64 = 3_600_000;

/// 缓存记录
///
/// 保存远端原始数据和写入时间，读取方按 TTL 判断是否新鲜。
/// 过期记录不删除，远端失败时仍可作为兜底。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CacheRecord {
    /// 写入时间（毫秒时间戳）
    pub timestamp: i64,
    /// 远端原始数据，未经转换
    pub data: Value,
}

/// 缓存是否仍在有效期内
///
/// 时间戳溢出或晚于当前时间的记录视为过期。
pub fn is_fresh(record: &CacheRecord, now: i64, ttl_ms: i64) -> bool {
    match now.checked_sub(record.timestamp) {
        Some(age) => (0..ttl_ms).contains(&age),
        None => false,
    }
}

/// 进程级键值存储
pub trait CacheStore: Send + Sync {
    /// 读取记录；不存在或无法解析时返回 None
    fn load(&self, key: &str) -> Option<CacheRecord>;
    fn save(&self, key: &str, record: &CacheRecord) -> Result<(), CatalogError>;
}

/// 以 JSON 文件保存，每个键一个文件
pub struct FileCacheStore {
    dir: PathBuf,
}

impl FileCacheStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{key}.json"))
    }
}

impl CacheStore for FileCacheStore {
    fn load(&self, key: &str) -> Option<CacheRecord> {
        let path = self.path_for(key);
        if !path.exists() {
            return None;
        }
        let content = match fs::read_to_string(&path) {
            Ok(c) => c,
            Err(e) => {
                log::warn!("读取缓存 {} 失败: {e}", path.display());
                return None;
            }
        };
        match serde_json::from_str(&content) {
            Ok(record) => Some(record),
            Err(e) => {
                log::warn!("缓存 {} 已损坏，忽略: {e}", path.display());
                None
            }
        }
    }

    fn save(&self, key: &str, record: &CacheRecord) -> Result<(), CatalogError> {
        fs::create_dir_all(&self.dir)
            .map_err(|e| CatalogError::Store(format!("创建缓存目录失败: {e}")))?;
        let content = serde_json::to_string(record)
            .map_err(|e| CatalogError::Store(format!("序列化缓存失败: {e}")))?;
        fs::write(self.path_for(key), content)
            .map_err(|e| CatalogError::Store(format!("写入缓存失败: {e}")))?;
        Ok(())
    }
}

/// 内存存储，值按序列化后的字符串保存
#[derive(Default)]
pub struct MemoryCacheStore {
    values: Mutex<HashMap<String, String>>,
}

impl MemoryCacheStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// 预先放入一条记录
    pub fn with_record(key: &str, record: &CacheRecord) -> Self {
        let store = Self::new();
        if let Err(e) = store.save(key, record) {
            log::warn!("预置缓存失败: {e}");
        }
        store
    }
}

impl CacheStore for MemoryCacheStore {
    fn load(&self, key: &str) -> Option<CacheRecord> {
        let values = self.values.lock().unwrap_or_else(PoisonError::into_inner);
        let raw = values.get(key)?;
        serde_json::from_str(raw)
            .map_err(|e| log::warn!("内存缓存已损坏，忽略: {e}"))
            .ok()
    }

    fn save(&self, key: &str, record: &CacheRecord) -> Result<(), CatalogError> {
        let raw = serde_json::to_string(record)
            .map_err(|e| CatalogError::Store(format!("序列化缓存失败: {e}")))?;
        self.values
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(key.to_string(), raw);
        Ok(())
    }
}
