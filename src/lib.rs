pub mod cache;
pub mod catalog;
pub mod commands;
pub mod config;
pub mod engine;
pub mod error;
pub mod loader;
pub mod normalize;
pub mod present;
pub mod ranker;
pub mod similarity;
pub mod source;

use cache::FileCacheStore;
use config::{cache_dir, load_config, AppConfig};
use engine::QueryEngine;
use loader::CatalogLoader;
use source::HttpCatalogSource;
use std::io::BufRead;
use std::time::Duration;

/// 从标准输入逐行读取识别文本，输出匹配到的答案或搜索链接
pub fn run() {
    env_logger::init();

    let config = load_config().unwrap_or_else(|e| {
        log::error!("加载配置失败: {e}，使用默认配置");
        AppConfig::default()
    });

    let source = match HttpCatalogSource::new(
        &config.catalog.url,
        Duration::from_millis(config.catalog.timeout_ms),
    ) {
        Ok(s) => s,
        Err(e) => {
            log::error!("{e}");
            return;
        }
    };
    let store = FileCacheStore::new(cache_dir());
    let loader = CatalogLoader::new(source, store, config.catalog.cache_ttl_ms);
    let engine = QueryEngine::new(loader, config.matching.similarity_threshold);

    let rt = match tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
    {
        Ok(rt) => rt,
        Err(e) => {
            log::error!("创建运行时失败: {e}");
            return;
        }
    };
    rt.block_on(engine.initialize());

    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                log::error!("读取输入失败: {e}");
                break;
            }
        };
        let Some((transcript, confidence)) = commands::parse_line(&line) else {
            continue;
        };
        let result = engine.match_text(transcript, confidence);
        println!("{}", commands::render(&result, &config.search));
    }
}
