//! 此模块定义了所有用于反序列化 Last.fm API 响应的 `struct` 数据结构。
//! API 文档见 <https://www.last.fm/api>
//!
//! 同一实体在不同接口中的形状并不一致（例如曲目的 `artist` 在搜索接口中是字符串，
//! 在排行榜接口中是对象），因此这里的结构体覆盖所有已知形状，并对可选字段保持宽容。
//! 只有 `name` 等必需的标识字段缺失时才会解析失败。

use serde::Deserialize;

use super::de;

// =================================================================
// 通用片段
// =================================================================

/// 图片数组中的一项。
#[derive(Debug, Deserialize)]
pub struct RawImage {
    /// 尺寸名，例如 `"extralarge"`。
    #[serde(default)]
    pub size: String,
    /// 图片地址。
    #[serde(rename = "#text", default)]
    pub text: String,
}

/// 标签。
#[derive(Debug, Deserialize)]
pub struct RawTag {
    /// 标签名。
    pub name: String,
    /// 标签地址。
    #[serde(default, deserialize_with = "de::opt_string")]
    pub url: Option<String>,
}

/// `{"tag": [...]}` 容器。
#[derive(Debug, Deserialize)]
pub struct RawTags {
    /// 标签列表。
    #[serde(default, deserialize_with = "de::one_or_many_lossy")]
    pub tag: Vec<RawTag>,
}

/// `@attr` 中的排行信息。
#[derive(Debug, Deserialize)]
pub struct RawRankAttr {
    /// 排行。
    #[serde(default, deserialize_with = "de::opt_u32")]
    pub rank: Option<u32>,
}

/// 收听统计。
#[derive(Debug, Deserialize)]
pub struct RawStats {
    /// 听众数。
    #[serde(default, deserialize_with = "de::opt_u64")]
    pub listeners: Option<u64>,
    /// 播放次数。
    #[serde(default, deserialize_with = "de::opt_u64")]
    pub playcount: Option<u64>,
}

// =================================================================
// 艺人
// =================================================================

/// 代表一位艺人，覆盖排行榜条目、详情与相似艺人三种形状。
#[derive(Debug, Deserialize)]
pub struct RawArtist {
    /// 艺人名。
    pub name: String,
    /// MusicBrainz ID。
    #[serde(default, deserialize_with = "de::non_empty_string")]
    pub mbid: Option<String>,
    /// 页面地址。
    #[serde(default, deserialize_with = "de::opt_string")]
    pub url: Option<String>,
    /// 头像。
    #[serde(default, deserialize_with = "de::one_or_many_lossy")]
    pub image: Vec<RawImage>,
    /// 排行榜条目把统计直接放在顶层。
    #[serde(default, deserialize_with = "de::opt_u64")]
    pub listeners: Option<u64>,
    /// 排行榜条目把统计直接放在顶层。
    #[serde(default, deserialize_with = "de::opt_u64")]
    pub playcount: Option<u64>,
    /// 是否可流式播放。
    #[serde(default, deserialize_with = "de::opt_flag")]
    pub streamable: Option<bool>,
    /// 是否正在巡演。
    #[serde(default, deserialize_with = "de::opt_flag")]
    pub ontour: Option<bool>,
    /// 详情接口中的统计。
    #[serde(default, deserialize_with = "de::lossy_object")]
    pub stats: Option<RawStats>,
    /// 相似艺人。
    #[serde(default, deserialize_with = "de::lossy_object")]
    pub similar: Option<RawSimilar>,
    /// 标签。
    #[serde(default, deserialize_with = "de::lossy_object")]
    pub tags: Option<RawTags>,
    /// 简介。
    #[serde(default, deserialize_with = "de::lossy_object")]
    pub bio: Option<RawBio>,
}

/// `{"artist": [...]}` 容器。
#[derive(Debug, Deserialize)]
pub struct RawSimilar {
    /// 相似艺人列表。
    #[serde(default, deserialize_with = "de::one_or_many_lossy")]
    pub artist: Vec<RawArtist>,
}

/// 艺人简介。
#[derive(Debug, Deserialize)]
pub struct RawBio {
    /// 发布时间。
    #[serde(default, deserialize_with = "de::opt_string")]
    pub published: Option<String>,
    /// 摘要。
    #[serde(default, deserialize_with = "de::opt_string")]
    pub summary: Option<String>,
    /// 内容。
    #[serde(default, deserialize_with = "de::opt_string")]
    pub content: Option<String>,
    /// 链接容器。
    #[serde(default, deserialize_with = "de::lossy_object")]
    pub links: Option<RawLinks>,
}

/// `{"link": {...}}` 容器。
#[derive(Debug, Deserialize)]
pub struct RawLinks {
    /// 链接，可能是单个对象或数组。
    #[serde(default, deserialize_with = "de::one_or_many_lossy")]
    pub link: Vec<RawLink>,
}

/// 一个链接。
#[derive(Debug, Deserialize)]
pub struct RawLink {
    /// 地址。
    #[serde(default, deserialize_with = "de::opt_string")]
    pub href: Option<String>,
}

/// 曲目中的艺人引用：搜索接口给出字符串，其它接口给出对象。
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum RawArtistRef {
    /// 只有名字。
    Name(String),
    /// 完整或部分的艺人对象。
    Object(Box<RawArtist>),
}

// =================================================================
// 曲目
// =================================================================

/// 代表一首曲目，覆盖排行榜、搜索和专辑曲目三种形状。
#[derive(Debug, Deserialize)]
pub struct RawTrack {
    /// 曲目名。
    pub name: String,
    /// 演唱者。
    pub artist: RawArtistRef,
    /// MusicBrainz ID。
    #[serde(default, deserialize_with = "de::non_empty_string")]
    pub mbid: Option<String>,
    /// 页面地址。
    #[serde(default, deserialize_with = "de::opt_string")]
    pub url: Option<String>,
    /// 时长（秒）。
    #[serde(default, deserialize_with = "de::opt_u64")]
    pub duration: Option<u64>,
    /// 播放次数。
    #[serde(default, deserialize_with = "de::opt_u64")]
    pub playcount: Option<u64>,
    /// 听众数。
    #[serde(default, deserialize_with = "de::opt_u64")]
    pub listeners: Option<u64>,
    /// 封面。
    #[serde(default, deserialize_with = "de::one_or_many_lossy")]
    pub image: Vec<RawImage>,
    /// 可播放性，原样保留以便按形状处理。
    #[serde(default)]
    pub streamable: serde_json::Value,
    /// 排行信息。
    #[serde(rename = "@attr", default, deserialize_with = "de::lossy_object")]
    pub attr: Option<RawRankAttr>,
}

/// `{"track": [...]}` 容器。
#[derive(Debug, Deserialize)]
pub struct RawTrackList {
    /// 曲目列表。
    #[serde(default, deserialize_with = "de::one_or_many")]
    pub track: Vec<RawTrack>,
}

// =================================================================
// 专辑
// =================================================================

/// 代表一张专辑，覆盖搜索、艺人热门专辑和专辑详情三种形状。
#[derive(Debug, Deserialize)]
pub struct RawAlbum {
    /// 专辑名。
    pub name: String,
    /// MusicBrainz ID，路由需要它。缺少该键时与空字符串相同。
    #[serde(default)]
    pub mbid: String,
    /// 艺人，可能是字符串或对象。
    #[serde(default, deserialize_with = "de::artist_name")]
    pub artist: Option<String>,
    /// 页面地址。
    #[serde(default, deserialize_with = "de::opt_string")]
    pub url: Option<String>,
    /// 封面。
    #[serde(default, deserialize_with = "de::one_or_many_lossy")]
    pub image: Vec<RawImage>,
    /// 是否可流式播放。
    #[serde(default, deserialize_with = "de::opt_flag")]
    pub streamable: Option<bool>,
    /// 发行日期。
    #[serde(default, deserialize_with = "de::non_empty_string")]
    pub releasedate: Option<String>,
    /// 听众数。
    #[serde(default, deserialize_with = "de::opt_u64")]
    pub listeners: Option<u64>,
    /// 播放次数。
    #[serde(default, deserialize_with = "de::opt_u64")]
    pub playcount: Option<u64>,
    /// 热门标签。
    #[serde(default, deserialize_with = "de::lossy_object")]
    pub toptags: Option<RawTags>,
    /// 标签。
    #[serde(default, deserialize_with = "de::lossy_object")]
    pub tags: Option<RawTags>,
    /// 曲目列表，条目缺少名称时整个专辑无效。
    #[serde(default, deserialize_with = "de::object_or_none")]
    pub tracks: Option<RawTrackList>,
    /// 排行信息。
    #[serde(rename = "@attr", default, deserialize_with = "de::lossy_object")]
    pub attr: Option<RawRankAttr>,
    /// 百科。
    #[serde(default, deserialize_with = "de::lossy_object")]
    pub wiki: Option<RawWiki>,
}

/// 专辑百科。
#[derive(Debug, Deserialize)]
pub struct RawWiki {
    /// 发布时间。
    #[serde(default, deserialize_with = "de::opt_string")]
    pub published: Option<String>,
    /// 摘要。
    #[serde(default, deserialize_with = "de::opt_string")]
    pub summary: Option<String>,
    /// 内容。
    #[serde(default, deserialize_with = "de::opt_string")]
    pub content: Option<String>,
}

// =================================================================
// 艺人热门专辑接口 (`artist.gettopalbums`) 的分页信息
// =================================================================

/// `topalbums.@attr` 的原始形状，数值可能是字符串。
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawPageAttr {
    /// 所属艺人。
    #[serde(default, deserialize_with = "de::opt_string")]
    pub artist: Option<String>,
    /// 当前页。
    #[serde(default, deserialize_with = "de::opt_u32")]
    pub page: Option<u32>,
    /// 每页条数。
    #[serde(default, deserialize_with = "de::opt_u32")]
    pub per_page: Option<u32>,
    /// 总条数。
    #[serde(default, deserialize_with = "de::opt_u64")]
    pub total: Option<u64>,
    /// 总页数。
    #[serde(default, deserialize_with = "de::opt_u32")]
    pub total_pages: Option<u32>,
}

// =================================================================
// 错误响应
// =================================================================

/// Last.fm 的错误对象，例如 `{"error": 6, "message": "Artist not found"}`。
#[derive(Debug, Deserialize)]
pub struct RawApiError {
    /// 错误码。
    #[serde(default, deserialize_with = "de::opt_u64")]
    pub error: Option<u64>,
    /// 错误信息。
    #[serde(default, deserialize_with = "de::opt_string")]
    pub message: Option<String>,
}
