use crate::cache::CacheStore;
use crate::catalog::Catalog;
use crate::loader::{CatalogLoader, CatalogOrigin};
use crate::ranker::rank;
use crate::source::CatalogSource;
use std::sync::{Arc, Mutex, PoisonError};

/// 匹配结果
#[derive(Debug, Clone, PartialEq)]
pub enum MatchResult {
    /// 命中问答条目
    Found {
        answer: String,
        source_url: String,
        image_url: Option<String>,
    },
    /// 未命中，返回原始问句用于网页搜索
    NotFound { fallback_query: String },
}

/// 问答匹配引擎
///
/// 持有当前问答目录；重新加载时整体替换引用，正在进行的匹配仍使用旧目录。
pub struct QueryEngine<S, C> {
    loader: CatalogLoader<S, C>,
    catalog: Mutex<Arc<Catalog>>,
    threshold: f64,
}

impl<S: CatalogSource, C: CacheStore> QueryEngine<S, C> {
    pub fn new(loader: CatalogLoader<S, C>, threshold: f64) -> Self {
        Self {
            loader,
            catalog: Mutex::new(Arc::new(Catalog::default())),
            threshold,
        }
    }

    /// 加载问答目录并替换当前目录
    ///
    /// 加载失败不会报错：有旧缓存就用旧缓存，否则目录为空，匹配一律返回未命中。
    pub async fn initialize(&self) -> CatalogOrigin {
        let now = chrono::Utc::now().timestamp_millis();
        let load = self.loader.load_catalog(now).await;
        let origin = load.origin();
        let catalog = Arc::new(load.into_catalog());
        log::info!("问答目录就绪: {:?}，共 {} 条", origin, catalog.len());
        *self.catalog.lock().unwrap_or_else(PoisonError::into_inner) = catalog;
        origin
    }

    /// 当前目录的快照
    pub fn catalog(&self) -> Arc<Catalog> {
        self.catalog
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// 匹配语音识别文本，`confidence` 为识别置信度（0~1），仅用于日志
    pub fn match_text(&self, transcript: &str, confidence: Option<f32>) -> MatchResult {
        let catalog = self.catalog();
        let transcript = transcript.trim();

        if let Some(c) = confidence {
            log::debug!("识别文本: {transcript}（置信度 {:.2}%）", c * 100.0);
        }

        match rank(transcript, &catalog, self.threshold) {
            Some(best) => {
                log::info!(
                    "命中: {}（相似度 {:.2}）",
                    best.entry.keyword,
                    best.similarity
                );
                MatchResult::Found {
                    answer: best.entry.answer.clone(),
                    source_url: best.entry.source_url.clone(),
                    image_url: best.entry.image_url.clone(),
                }
            }
            None => {
                log::info!("未匹配到问答，转为搜索: {transcript}");
                MatchResult::NotFound {
                    fallback_query: transcript.to_string(),
                }
            }
        }
    }
}
