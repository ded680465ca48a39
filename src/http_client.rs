use once_cell::sync::Lazy;
use reqwest::{Client, Response};
use std::time::Duration;
use thiserror::Error;
use url::Url;

const TIMEOUT_SECONDS: u64 = 30;

/// 源站按客户端标识放行, 固定使用 Aidoku
pub const USER_AGENT: &str = "Aidoku";

/// 全局 HTTP 客户端
pub static HTTP_CLIENT: Lazy<Client> = Lazy::new(|| {
    Client::builder()
        .timeout(Duration::from_secs(TIMEOUT_SECONDS))
        .user_agent(USER_AGENT)
        .gzip(true)
        .brotli(true)
        .build()
        .expect("Failed to create HTTP client")
});

#[derive(Debug, Error)]
pub enum HttpClientError {
    #[error("无效的地址 {url}: {reason}")]
    InvalidUrl { url: String, reason: String },
    #[error("请求超时")]
    Timeout,
    #[error("请求失败: {0}")]
    RequestFailed(String),
    #[error("响应异常状态码: {0}")]
    BadStatus(u16),
}

/// 去掉末尾的 `/` 并校验是否为绝对地址
pub fn normalize_base_url(base_url: &str) -> Result<String, HttpClientError> {
    let trimmed = base_url.trim_end_matches('/');
    Url::parse(trimmed).map_err(|e| HttpClientError::InvalidUrl {
        url: base_url.to_string(),
        reason: e.to_string(),
    })?;
    Ok(trimmed.to_string())
}

/// GET 请求
pub async fn get(url: &str, referer: Option<&str>) -> Result<Response, HttpClientError> {
    let mut req = HTTP_CLIENT.get(url);

    if let Some(ref_url) = referer {
        req = req.header("Referer", ref_url);
    }

    let response = req.send().await.map_err(|e| {
        if e.is_timeout() {
            HttpClientError::Timeout
        } else {
            HttpClientError::RequestFailed(e.to_string())
        }
    })?;

    if !response.status().is_success() {
        return Err(HttpClientError::BadStatus(response.status().as_u16()));
    }

    Ok(response)
}

/// GET 请求并返回文本
pub async fn get_text(url: &str, referer: Option<&str>) -> Result<String, HttpClientError> {
    let response = get(url, referer).await?;
    response
        .text()
        .await
        .map_err(|e| HttpClientError::RequestFailed(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_base_url() {
        assert_eq!(
            normalize_base_url("https://example.com/").unwrap(),
            "https://example.com"
        );
        assert_eq!(
            normalize_base_url("https://example.com/manga///").unwrap(),
            "https://example.com/manga"
        );
        assert_eq!(
            normalize_base_url("https://example.com").unwrap(),
            "https://example.com"
        );
    }

    #[test]
    fn test_normalize_base_url_rejects_relative() {
        assert!(matches!(
            normalize_base_url("example.com/"),
            Err(HttpClientError::InvalidUrl { .. })
        ));
        assert!(normalize_base_url("").is_err());
    }
}
