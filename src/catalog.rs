use crate::error::CatalogError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 远端接口返回的原始记录
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawEntry {
    pub question: String,
    pub answer: String,
    pub source_url: String,
    #[serde(default)]
    pub image: Option<String>,
    /// 人工优先级，排序的最后一级
    #[serde(default)]
    pub specificity: Option<i32>,
}

/// 问答条目，加载后不再修改
#[derive(Debug, Clone, PartialEq)]
pub struct Entry {
    /// 小写的问句
    pub keyword: String,
    pub answer: String,
    pub source_url: String,
    pub image_url: Option<String>,
    pub specificity: Option<i32>,
}

impl From<RawEntry> for Entry {
    fn from(raw: RawEntry) -> Self {
        Self {
            keyword: raw.question.to_lowercase(),
            answer: raw.answer,
            source_url: raw.source_url,
            image_url: raw.image,
            specificity: raw.specificity,
        }
    }
}

#[cfg(test)]
impl Entry {
    pub fn new(keyword: &str, answer: &str, source_url: &str) -> Self {
        Self {
            keyword: keyword.to_lowercase(),
            answer: answer.to_string(),
            source_url: source_url.to_string(),
            image_url: None,
            specificity: None,
        }
    }
}

/// 有序的问答目录，整体替换，不做原地修改
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Catalog {
    entries: Vec<Entry>,
}

impl Catalog {
    pub fn new(entries: Vec<Entry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[Entry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// 将远端原始数据转换为问答目录
///
/// 缓存里保存的是未转换的原始数据，每次读取都走这里。
pub fn entries_from_payload(payload: &Value) -> Result<Catalog, CatalogError> {
    if !payload.is_array() {
        return Err(CatalogError::Parse("响应不是数组".to_string()));
    }
    let raw: Vec<RawEntry> =
        serde_json::from_value(payload.clone()).map_err(|e| CatalogError::Parse(e.to_string()))?;
    Ok(Catalog::new(raw.into_iter().map(Entry::from).collect()))
}
