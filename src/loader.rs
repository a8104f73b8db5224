use crate::cache::{is_fresh, CacheRecord, CacheStore, CACHE_KEY};
use crate::catalog::{entries_from_payload, Catalog};
use crate::error::CatalogError;
use crate::source::CatalogSource;

/// 一次加载的结果及其来源
#[derive(Debug)]
pub enum CatalogLoad {
    /// 缓存未过期，未访问网络
    Cached(Catalog),
    /// 从远端拉取并已写入缓存
    Fetched(Catalog),
    /// 远端失败，退回到已过期的缓存
    Stale { catalog: Catalog, cause: CatalogError },
    /// 远端失败且没有可用缓存，目录为空
    Unavailable(CatalogError),
}

impl CatalogLoad {
    pub fn into_catalog(self) -> Catalog {
        match self {
            CatalogLoad::Cached(c) | CatalogLoad::Fetched(c) => c,
            CatalogLoad::Stale { catalog, .. } => catalog,
            CatalogLoad::Unavailable(_) => Catalog::default(),
        }
    }

    pub fn origin(&self) -> CatalogOrigin {
        match self {
            CatalogLoad::Cached(_) => CatalogOrigin::Cached,
            CatalogLoad::Fetched(_) => CatalogOrigin::Fetched,
            CatalogLoad::Stale { .. } => CatalogOrigin::Stale,
            CatalogLoad::Unavailable(_) => CatalogOrigin::Unavailable,
        }
    }
}

/// 目录来源，供调用方展示或记录
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogOrigin {
    Cached,
    Fetched,
    Stale,
    Unavailable,
}

/// 问答目录加载器：缓存优先，过期后拉取远端，远端失败时退回旧缓存
pub struct CatalogLoader<S, C> {
    source: S,
    store: C,
    ttl_ms: i64,
}

impl<S: CatalogSource, C: CacheStore> CatalogLoader<S, C> {
    pub fn new(source: S, store: C, ttl_ms: i64) -> Self {
        Self {
            source,
            store,
            ttl_ms,
        }
    }

    pub fn store(&self) -> &C {
        &self.store
    }

    /// 加载问答目录，`now` 为当前毫秒时间戳
    ///
    /// 过期缓存只在远端失败时使用，网络正常时不会越过 TTL 继续使用旧数据。
    pub async fn load_catalog(&self, now: i64) -> CatalogLoad {
        let cached = self.store.load(CACHE_KEY);

        if let Some(record) = cached.as_ref().filter(|r| is_fresh(r, now, self.ttl_ms)) {
            match entries_from_payload(&record.data) {
                Ok(catalog) => {
                    log::info!("使用缓存的问答目录，共 {} 条", catalog.len());
                    return CatalogLoad::Cached(catalog);
                }
                Err(e) => log::warn!("缓存数据无法转换，重新拉取: {e}"),
            }
        }

        let cause = match self.fetch_and_store(now).await {
            Ok(catalog) => return CatalogLoad::Fetched(catalog),
            Err(e) => e,
        };
        log::error!("{cause}");

        match cached {
            Some(record) => match entries_from_payload(&record.data) {
                Ok(catalog) => {
                    log::warn!("远端不可用，使用过期缓存，共 {} 条", catalog.len());
                    CatalogLoad::Stale { catalog, cause }
                }
                Err(e) => {
                    log::error!("过期缓存也无法使用: {e}");
                    CatalogLoad::Unavailable(CatalogError::NoCacheAvailable(Box::new(cause)))
                }
            },
            None => {
                log::error!("远端不可用且没有缓存，问答目录为空");
                CatalogLoad::Unavailable(CatalogError::NoCacheAvailable(Box::new(cause)))
            }
        }
    }

    /// 拉取远端数据，校验通过后写入缓存
    async fn fetch_and_store(&self, now: i64) -> Result<Catalog, CatalogError> {
        let payload = self.source.fetch().await?;
        let catalog = entries_from_payload(&payload)?;

        let record = CacheRecord {
            timestamp: now,
            data: payload,
        };
        if let Err(e) = self.store.save(CACHE_KEY, &record) {
            log::warn!("{e}");
        }
        log::info!("问答目录已加载并缓存，共 {} 条", catalog.len());
        Ok(catalog)
    }
}
