//! 负责读取目录服务的配置。
//!
//! 配置只有两项来自环境：API 密钥和 API 基础地址，它们在进程启动时读取一次。

use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Result, ShowcaseError};

/// 存放 API 密钥的环境变量。
pub const API_KEY_ENV: &str = "LASTFM_API_KEY";
/// 存放 API 基础地址的环境变量。
pub const BASE_URL_ENV: &str = "LASTFM_API_BASE_URL";
/// 未配置基础地址时使用的默认值。
pub const DEFAULT_BASE_URL: &str = "https://ws.audioscrobbler.com/2.0/";
/// 所有请求的固定超时时间。
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// 目录服务的配置项。
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct CatalogConfig {
    /// Last.fm API 密钥。
    pub api_key: String,
    /// API 基础地址。
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// 请求超时（秒）。
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    DEFAULT_BASE_URL.to_string()
}

fn default_timeout_secs() -> u64 {
    REQUEST_TIMEOUT.as_secs()
}

impl CatalogConfig {
    /// 使用给定的 API 密钥和默认地址创建配置。
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: default_base_url(),
            timeout_secs: default_timeout_secs(),
        }
    }

    /// 替换 API 基础地址。
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// 从进程环境变量中读取配置。
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 通过任意的键值查找函数读取配置。
    ///
    /// # 参数
    /// * `lookup` - 根据变量名返回变量值的函数。
    ///
    /// # 返回
    /// 缺少 API 密钥时返回 `ShowcaseError::Config`。
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup(API_KEY_ENV)
            .map(|key| key.trim().to_string())
            .filter(|key| !key.is_empty())
            .ok_or_else(|| ShowcaseError::Config(format!("缺少环境变量 {API_KEY_ENV}")))?;

        let base_url = match lookup(BASE_URL_ENV).map(|url| url.trim().to_string()) {
            Some(url) if !url.is_empty() => url,
            _ => {
                info!("未设置 {BASE_URL_ENV}，使用默认地址 {DEFAULT_BASE_URL}");
                default_base_url()
            }
        };

        Ok(Self {
            api_key,
            base_url,
            timeout_secs: default_timeout_secs(),
        })
    }

    /// 请求超时时间。
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}
