//! 图片尺寸与图片地址解析。

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// 目录为同一图片提供的固定尺寸档位，按从小到大排列。
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    strum_macros::Display,
    strum_macros::EnumString,
    strum_macros::EnumIter,
    strum_macros::AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ImageSize {
    /// 约 34px
    Small,
    /// 约 64px
    Medium,
    /// 约 174px
    Large,
    /// 约 300px
    ExtraLarge,
    /// 原始尺寸
    Mega,
}

/// 一个 (尺寸, 地址) 对。
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImageVariant {
    /// 尺寸档位。
    pub size: ImageSize,
    /// 图片地址，目录可能给出空字符串。
    pub url: String,
}

/// 同一图片的不同尺寸集合，每个尺寸最多出现一次，保持原始顺序。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImageSet(Vec<ImageVariant>);

impl ImageSet {
    /// 从变体列表构造。同一尺寸重复出现时保留第一个。
    pub fn from_variants<I>(variants: I) -> Self
    where
        I: IntoIterator<Item = ImageVariant>,
    {
        let mut set: Vec<ImageVariant> = Vec::new();
        for variant in variants {
            if !set.iter().any(|v| v.size == variant.size) {
                set.push(variant);
            }
        }
        Self(set)
    }

    /// 返回指定尺寸的地址。
    pub fn url(&self, size: ImageSize) -> Option<&str> {
        self.0
            .iter()
            .find(|v| v.size == size)
            .map(|v| v.url.as_str())
    }

    /// 返回地址非空的最大尺寸图片。
    pub fn largest(&self) -> Option<&ImageVariant> {
        self.0
            .iter()
            .filter(|v| !v.url.is_empty())
            .max_by_key(|v| v.size)
    }

    /// 变体数量。
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// 是否没有任何变体。
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// 遍历所有变体。
    pub fn iter(&self) -> impl Iterator<Item = &ImageVariant> {
        self.0.iter()
    }
}

/// 在可能不存在的图片集合中查找指定尺寸的地址。
pub fn image_url(size: ImageSize, images: Option<&ImageSet>) -> Option<&str> {
    images.and_then(|set| set.url(size))
}

/// 直接在原始的 Last.fm 图片数组上查找指定尺寸的地址。
///
/// 原始数组形如 `[{"#text": "...", "size": "large"}, ...]`。
/// 不是数组、没有匹配尺寸或条目格式不对时返回 `None`，从不 panic。
pub fn resolve_image_url(size: ImageSize, images: &Value) -> Option<String> {
    images
        .as_array()?
        .iter()
        .find(|entry| {
            entry
                .get("size")
                .and_then(Value::as_str)
                .and_then(|s| ImageSize::from_str(s).ok())
                == Some(size)
        })
        .and_then(|entry| entry.get("#text"))
        .and_then(Value::as_str)
        .map(str::to_string)
}
