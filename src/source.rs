use crate::error::CatalogError;
use async_trait::async_trait;
use serde_json::Value;
use std::time::Duration;

/// 问答目录的远端数据源
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// 拉取原始数据（未转换的 JSON）
    async fn fetch(&self) -> Result<Value, CatalogError>;
}

/// 通过 HTTP GET 拉取问答目录
pub struct HttpCatalogSource {
    url: String,
    client: reqwest::Client,
}

impl HttpCatalogSource {
    /// 请求带超时，避免远端无响应时调用方一直挂起
    pub fn new(url: &str, timeout: Duration) -> Result<Self, CatalogError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CatalogError::Fetch(format!("创建 HTTP 客户端失败: {e}")))?;
        Ok(Self {
            url: url.to_string(),
            client,
        })
    }
}

#[async_trait]
impl CatalogSource for HttpCatalogSource {
    async fn fetch(&self) -> Result<Value, CatalogError> {
        let resp = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| CatalogError::Fetch(format!("请求 {} 失败: {e}", self.url)))?;

        if !resp.status().is_success() {
            return Err(CatalogError::Fetch(format!(
                "{} 返回错误状态: {}",
                self.url,
                resp.status()
            )));
        }

        resp.json::<Value>()
            .await
            .map_err(|e| CatalogError::Parse(format!("解析响应失败: {e}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::time::Instant;

    /// 起一个只响应一次的本地 HTTP 服务
    async fn serve_once(status: &str, body: &str) -> String {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let response = format!(
            "HTTP/1.1 {status}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
            body.len()
        );
        tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut buf = [0u8; 4096];
            let _ = socket.read(&mut buf).await;
            socket.write_all(response.as_bytes()).await.unwrap();
            let _ = socket.shutdown().await;
        });
        format!("http://{addr}/api/faqs")
    }

    #[tokio::test]
    async fn fetches_json_array() {
        let url = serve_once("200 OK", r#"[{"question":"q","answer":"a","source_url":"u"}]"#).await;
        let source = HttpCatalogSource::new(&url, Duration::from_secs(5)).unwrap();
        let value = source.fetch().await.unwrap();
        assert_eq!(value[0]["answer"], "a");
    }

    #[tokio::test]
    async fn non_success_status_is_fetch_failure() {
        let url = serve_once("500 Internal Server Error", "{}").await;
        let source = HttpCatalogSource::new(&url, Duration::from_secs(5)).unwrap();
        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, CatalogError::Fetch(_)));
    }

    #[tokio::test]
    async fn malformed_body_is_parse_failure() {
        let url = serve_once("200 OK", "not json").await;
        let source = HttpCatalogSource::new(&url, Duration::from_secs(5)).unwrap();
        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, CatalogError::Parse(_)));
    }

    #[tokio::test]
    async fn silent_server_times_out() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            let (_socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(30)).await;
        });

        let source = HttpCatalogSource::new(&format!("http://{addr}/api/faqs"), Duration::from_millis(300)).unwrap();
        let started = Instant::now();
        let err = source.fetch().await.unwrap_err();
        let elapsed = started.elapsed();
        assert!(matches!(err, CatalogError::Fetch(_)));
        assert!(elapsed >= Duration::from_millis(250), "{elapsed:?}");
        assert!(elapsed < Duration::from_secs(5), "{elapsed:?}");
    }

    #[tokio::test]
    async fn unreachable_host_is_fetch_failure() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        drop(listener);
        let source = HttpCatalogSource::new(&format!("http://{addr}/api/faqs"), Duration::from_millis(500)).unwrap();
        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, CatalogError::Fetch(_)));
    }
}
