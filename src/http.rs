//! HTTP 客户端适配层。
//!
//! 所有目录请求都是带查询参数的 GET 请求，本层只负责发送请求并带回状态码和原始 JSON，
//! 不对失败做任何分类。

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::{
    config::CatalogConfig,
    error::{Result, ShowcaseError},
};

const USER_AGENT: &str = "artist-showcase-rs/0.1.0";

/// 一次请求的原始结果。
#[derive(Debug, Clone, PartialEq)]
pub struct RawResponse {
    /// HTTP 状态码。
    pub status: u16,
    /// 解码后的响应体。无法解码的非成功响应体以字符串保存，空响应体为 `Null`。
    pub body: Value,
}

impl RawResponse {
    /// 构造一个 200 响应，常用于测试。
    pub fn ok(body: Value) -> Self {
        Self { status: 200, body }
    }
}

/// 目录 API 的传输层抽象。
#[async_trait]
pub trait CatalogTransport: Send + Sync {
    ///
    /// 调用一个 API 方法。
    ///
    /// # 参数
    /// * `method` - API 方法名，例如 `"chart.getTopArtists"`。
    /// * `params` - 额外的查询参数。
    ///
    /// # 返回
    /// 成功时包含状态码与响应体；网络失败或超时返回错误。
    ///
    async fn get(&self, method: &str, params: &[(&str, String)]) -> Result<RawResponse>;
}

/// 基于 `reqwest` 的传输层实现。
#[derive(Debug, Clone)]
pub struct HttpTransport {
    http_client: Client,
    base_url: String,
    api_key: String,
}

impl HttpTransport {
    /// 根据配置创建传输层，超时时间在客户端上统一设置。
    pub fn new(config: &CatalogConfig) -> Result<Self> {
        let http_client = Client::builder()
            .timeout(config.timeout())
            .user_agent(USER_AGENT)
            .build()?;
        Ok(Self {
            http_client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
        })
    }
}

#[async_trait]
impl CatalogTransport for HttpTransport {
    #[instrument(skip(self, params), fields(base_url = %self.base_url))]
    async fn get(&self, method: &str, params: &[(&str, String)]) -> Result<RawResponse> {
        let mut query: Vec<(&str, &str)> = vec![
            ("method", method),
            ("api_key", self.api_key.as_str()),
            ("format", "json"),
        ];
        query.extend(params.iter().map(|(k, v)| (*k, v.as_str())));

        let response = self
            .http_client
            .get(&self.base_url)
            .query(&query)
            .send()
            .await
            .map_err(classify_transport_error)?;

        let status = response.status().as_u16();
        let text = response.text().await.map_err(classify_transport_error)?;
        debug!(status, bytes = text.len(), "收到响应");

        let body = if text.trim().is_empty() {
            Value::Null
        } else {
            match serde_json::from_str::<Value>(&text) {
                Ok(value) => value,
                Err(e) if status == 200 => return Err(e.into()),
                Err(_) => Value::String(text),
            }
        };

        Ok(RawResponse { status, body })
    }
}

fn classify_transport_error(err: reqwest::Error) -> ShowcaseError {
    if err.is_timeout() {
        ShowcaseError::Timeout(err.to_string())
    } else {
        ShowcaseError::Reqwest(err)
    }
}
