//! 定义了整个 `artist-showcase` 库的错误类型 `ShowcaseError`。

use thiserror::Error;

/// 错误的分类，用于在扁平化之后仍然保留失败的原因类别。
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum_macros::Display)]
pub enum ErrorKind {
    /// 网络层失败（包括超时）。
    Transport,
    /// 服务器返回了非 200 状态码。
    UnexpectedStatus,
    /// 服务器以 200 状态码返回了 Last.fm 错误对象。
    Api,
    /// 响应缺少预期的子结构（“未找到结果”）。
    ResponseShape,
    /// 实体缺少必需的标识字段。
    MalformedEntity,
    /// 配置缺失或无效。
    Config,
    /// 其它内部错误。
    Internal,
}

/// `artist-showcase` 库的通用错误枚举。
#[derive(Error, Debug)]
pub enum ShowcaseError {
    /// 网络请求失败 (源自 `reqwest::Error`)
    #[error("网络请求失败: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// 请求在超时时间内没有完成
    #[error("请求超时: {0}")]
    Timeout(String),

    /// JSON 解析失败 (源自 `serde_json::Error`)
    #[error("JSON 解析失败: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// 服务器返回了非预期的状态码
    #[error("意外的状态码: {status}")]
    UnexpectedStatus {
        /// HTTP 状态码。
        status: u16,
        /// 响应体中的 Last.fm 错误码（如果有）。
        api_code: Option<u64>,
        /// 响应体中的错误信息。响应体不是 JSON 时为原始文本。
        api_message: Option<String>,
    },

    /// API 在成功的响应中返回了错误对象
    #[error("API 返回错误 {code}: {message}")]
    Api {
        /// Last.fm 错误码。
        code: u64,
        /// 错误信息。
        message: String,
    },

    /// 响应结构不符合预期
    #[error("响应结构无效: {0}")]
    ResponseShape(String),

    /// 实体缺少必需字段
    #[error("无效的 {entity} 数据: {reason}")]
    MalformedEntity {
        /// 实体种类，例如 "track"。
        entity: &'static str,
        /// 具体原因。
        reason: String,
    },

    /// 配置错误
    #[error("配置错误: {0}")]
    Config(String),

    /// 内部错误
    #[error("内部错误: {0}")]
    Internal(String),

    /// 目录服务函数扁平化之后的错误。
    #[error("{message}")]
    Service {
        /// 失败的操作，例如 "chart.getTopArtists"。
        operation: &'static str,
        /// 原始错误的分类。
        kind: ErrorKind,
        /// 面向用户的完整错误信息。
        message: String,
    },
}

/// `ShowcaseError` 的 `Result` 类型别名，方便在函数签名中使用。
pub type Result<T> = std::result::Result<T, ShowcaseError>;

impl ShowcaseError {
    /// 返回此错误的分类。
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::Reqwest(_) | Self::Timeout(_) => ErrorKind::Transport,
            Self::UnexpectedStatus { .. } => ErrorKind::UnexpectedStatus,
            Self::Api { .. } => ErrorKind::Api,
            Self::ResponseShape(_) | Self::JsonParse(_) => ErrorKind::ResponseShape,
            Self::MalformedEntity { .. } => ErrorKind::MalformedEntity,
            Self::Config(_) => ErrorKind::Config,
            Self::Internal(_) => ErrorKind::Internal,
            Self::Service { kind, .. } => *kind,
        }
    }

    /// 返回最具体的失败原因。
    ///
    /// 优先级：服务器提供的错误信息 > 服务器提供的错误码 > 原始错误文本。
    pub fn cause_message(&self) -> String {
        match self {
            Self::UnexpectedStatus {
                api_message: Some(message),
                ..
            } if !message.trim().is_empty() => message.clone(),
            Self::UnexpectedStatus {
                api_code: Some(code),
                ..
            } => format!("错误码 {code}"),
            Self::Api { code, message } => {
                if message.trim().is_empty() {
                    format!("错误码 {code}")
                } else {
                    message.clone()
                }
            }
            other => other.to_string(),
        }
    }
}
