use thiserror::Error;

/// 问答目录加载过程中的错误
///
/// 未匹配不是错误，见 [`crate::engine::MatchResult::NotFound`]。
#[derive(Debug, Error)]
pub enum CatalogError {
    /// 网络请求失败、超时或非 2xx 状态
    #[error("获取问答目录失败: {0}")]
    Fetch(String),
    /// 响应不是合法 JSON 或缺少字段
    #[error("解析问答目录失败: {0}")]
    Parse(String),
    /// 远端获取失败且本地没有任何缓存
    #[error("问答目录不可用且无缓存: {0}")]
    NoCacheAvailable(Box<CatalogError>),
    /// 缓存读写失败，只记日志
    #[error("缓存读写失败: {0}")]
    Store(String),
}
