//! 定义了整个库通用的核心数据模型。
//!
//! 这些结构体（如 `Artist`, `Track`, `Album`）是目录 API 的原始响应在规范化之后的目标格式。
//! 每次请求都会重新构造，不做跨请求的合并。

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::{model::image::ImageSet, utils::strip_read_more};

/// 收听统计。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stats {
    /// 听众数。
    pub listeners: Option<u64>,
    /// 播放次数。
    pub playcount: Option<u64>,
}

impl Stats {
    /// 两项都缺失时返回 `None`。
    pub fn from_counts(listeners: Option<u64>, playcount: Option<u64>) -> Option<Self> {
        if listeners.is_none() && playcount.is_none() {
            None
        } else {
            Some(Self {
                listeners,
                playcount,
            })
        }
    }
}

/// 流派/分类标签。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tag {
    /// 标签名。
    pub name: String,
    /// 标签页面地址。
    pub url: String,
}

/// 艺人简介。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Biography {
    /// 发布时间（原始文本）。
    pub published: String,
    /// 摘要。
    pub summary: String,
    /// 完整内容。
    pub content: String,
    /// 规范链接。
    pub link: Option<String>,
}

impl Biography {
    /// 去掉末尾 “Read more” 链接后的摘要。
    pub fn summary_text(&self) -> String {
        strip_read_more(&self.summary)
    }
}

/// 专辑百科。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Wiki {
    /// 发布时间（原始文本）。
    pub published: String,
    /// 摘要。
    pub summary: String,
    /// 完整内容。
    pub content: String,
}

impl Wiki {
    /// 去掉末尾 “Read more” 链接后的摘要。
    pub fn summary_text(&self) -> String {
        strip_read_more(&self.summary)
    }
}

/// 代表一位艺人的通用模型。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Artist {
    /// MusicBrainz ID。
    pub mbid: Option<String>,
    /// 艺人名。
    pub name: String,
    /// 目录中的页面地址。
    pub url: Option<String>,
    /// 头像。
    pub images: ImageSet,
    /// 是否可流式播放。
    pub streamable: Option<bool>,
    /// 是否正在巡演。
    pub on_tour: Option<bool>,
    /// 收听统计。
    pub stats: Option<Stats>,
    /// 相似艺人。
    pub similar: Option<Vec<Artist>>,
    /// 标签。
    pub tags: Option<Vec<Tag>>,
    /// 简介。
    pub bio: Option<Biography>,
}

impl Artist {
    /// 只有名字的艺人占位。
    pub fn stub(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }
}

/// 可播放性标记。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Streamable {
    /// 可试听片段。
    pub preview: Option<bool>,
    /// 可播放完整曲目。
    pub full_track: Option<bool>,
}

/// 代表一首歌曲的通用模型。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Track {
    /// MusicBrainz ID。
    pub mbid: Option<String>,
    /// 歌曲名。
    pub name: String,
    /// 演唱者，可能只有名字。
    pub artist: Artist,
    /// 时长，精确到秒。
    pub duration: Option<Duration>,
    /// 播放次数。
    pub playcount: Option<u64>,
    /// 听众数。
    pub listeners: Option<u64>,
    /// 封面。
    pub images: ImageSet,
    /// 目录中的页面地址。
    pub url: Option<String>,
    /// 可播放性。
    pub streamable: Option<Streamable>,
    /// 排行。
    pub rank: Option<u32>,
    /// 本地收藏标记，从不回传给 API。
    pub loved: bool,
}

impl Track {
    /// 将时长格式化为 `m:ss`。时长未知或为 0 时返回 `None`。
    pub fn formatted_duration(&self) -> Option<String> {
        let secs = self.duration?.as_secs();
        if secs == 0 {
            return None;
        }
        Some(format!("{}:{:02}", secs / 60, secs % 60))
    }
}

/// 代表一张专辑的通用模型。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Album {
    /// MusicBrainz ID，用于路由。
    pub mbid: String,
    /// 专辑名。
    pub name: String,
    /// 艺人名。
    pub artist: Option<String>,
    /// 封面，可能为空。
    pub images: ImageSet,
    /// 是否可流式播放。
    pub streamable: Option<bool>,
    /// 目录中的页面地址。
    pub url: String,
    /// 发行日期（原始文本）。
    pub release_date: Option<String>,
    /// 发行日期（Unix 时间戳，秒）。
    pub release_timestamp: Option<i64>,
    /// 收听统计。
    pub stats: Option<Stats>,
    /// 热门标签。
    pub top_tags: Option<Vec<Tag>>,
    /// 标签。
    pub tags: Option<Vec<Tag>>,
    /// 曲目列表，保持原始顺序。
    pub tracks: Option<Vec<Track>>,
    /// 排行。
    pub rank: Option<u32>,
    /// 百科。
    pub wiki: Option<Wiki>,
}

/// 分页信息，所有数值字段都已从字符串转换。
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageInfo {
    /// 所属艺人。
    pub artist: Option<String>,
    /// 当前页，从 1 开始。
    pub page: u32,
    /// 每页条数。
    pub per_page: u32,
    /// 总条数。
    pub total: u64,
    /// 总页数。
    pub total_pages: u32,
}

impl PageInfo {
    /// 是否存在下一页。
    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }

    /// 是否存在上一页。
    pub fn has_previous(&self) -> bool {
        self.page > 1
    }
}

/// 一页数据。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Page<T> {
    /// 本页条目。
    pub items: Vec<T>,
    /// 分页信息。
    pub info: PageInfo,
}
