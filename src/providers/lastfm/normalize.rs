//! 把 Last.fm 的原始响应片段规范化为通用模型。
//!
//! 每个规范化函数接收一个 `serde_json::Value`，先解析为 [`models`](super::models) 中的原始结构，
//! 再转换为 [`generic`](crate::model::generic) 中的严格结构。
//! 可选字段缺失不会导致失败；必需的标识字段缺失或类型错误时返回
//! [`ShowcaseError::MalformedEntity`]。

use std::{str::FromStr, time::Duration};

use serde::de::DeserializeOwned;
use serde_json::Value;

use super::{
    de::{coerce_flag, one_or_many_values},
    models::{
        RawAlbum, RawArtist, RawArtistRef, RawBio, RawImage, RawPageAttr, RawTags, RawTrack,
        RawWiki,
    },
};
use crate::{
    error::{Result, ShowcaseError},
    model::{
        generic::{Album, Artist, Biography, PageInfo, Stats, Streamable, Tag, Track, Wiki},
        image::{ImageSet, ImageSize, ImageVariant},
    },
    utils::parse_release_date,
};

/// 规范化一位艺人。
pub fn normalize_artist(raw: Value) -> Result<Artist> {
    parse_entity::<RawArtist>("artist", raw)?.try_into()
}

/// 规范化一首曲目。
pub fn normalize_track(raw: Value) -> Result<Track> {
    parse_entity::<RawTrack>("track", raw)?.try_into()
}

/// 规范化一张专辑，包括其中的曲目列表和百科。
pub fn normalize_album(raw: Value) -> Result<Album> {
    parse_entity::<RawAlbum>("album", raw)?.try_into()
}

/// 规范化图片数组。不是数组时按单个对象或空集合处理，从不失败。
pub fn normalize_images(raw: &Value) -> ImageSet {
    let images = one_or_many_values(raw.clone())
        .into_iter()
        .filter_map(|item| serde_json::from_value::<RawImage>(item).ok())
        .collect();
    images_from_raw(images)
}

/// 规范化一个实体列表。单个对象视为只有一个元素的列表，任一元素失败则整体失败。
pub fn normalize_list<T>(raw: Value, normalize: fn(Value) -> Result<T>) -> Result<Vec<T>> {
    one_or_many_values(raw).into_iter().map(normalize).collect()
}

/// 规范化 `artist.gettopalbums` 返回的 `@attr` 分页信息。
///
/// 字符串形式的数值会被转换；缺少页码、每页条数或总数时返回
/// [`ShowcaseError::ResponseShape`]。缺少总页数时由总数和每页条数推算。
pub fn normalize_page_info(raw: &Value) -> Result<PageInfo> {
    if !raw.is_object() {
        return Err(ShowcaseError::ResponseShape("缺少分页信息".to_string()));
    }
    let attr: RawPageAttr = serde_json::from_value(raw.clone())
        .map_err(|e| ShowcaseError::ResponseShape(format!("分页信息无效: {e}")))?;

    let missing = |field: &str| ShowcaseError::ResponseShape(format!("分页信息缺少 {field}"));
    let page = attr.page.ok_or_else(|| missing("page"))?;
    let per_page = attr.per_page.ok_or_else(|| missing("perPage"))?;
    let total = attr.total.ok_or_else(|| missing("total"))?;
    let total_pages = attr.total_pages.unwrap_or_else(|| {
        if per_page == 0 {
            0
        } else {
            u32::try_from(total.div_ceil(u64::from(per_page))).unwrap_or(u32::MAX)
        }
    });

    Ok(PageInfo {
        artist: attr.artist,
        page,
        per_page,
        total,
        total_pages,
    })
}

fn parse_entity<T: DeserializeOwned>(entity: &'static str, raw: Value) -> Result<T> {
    if !raw.is_object() {
        return Err(ShowcaseError::MalformedEntity {
            entity,
            reason: format!("期望 JSON 对象，实际为 {}", json_type_name(&raw)),
        });
    }
    serde_json::from_value(raw).map_err(|e| ShowcaseError::MalformedEntity {
        entity,
        reason: e.to_string(),
    })
}

fn ensure_name(entity: &'static str, name: &str) -> Result<()> {
    if name.trim().is_empty() {
        Err(ShowcaseError::MalformedEntity {
            entity,
            reason: "名称为空".to_string(),
        })
    } else {
        Ok(())
    }
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn images_from_raw(images: Vec<RawImage>) -> ImageSet {
    ImageSet::from_variants(images.into_iter().filter_map(|image| {
        ImageSize::from_str(&image.size)
            .ok()
            .map(|size| ImageVariant {
                size,
                url: image.text,
            })
    }))
}

fn tags_from_raw(tags: Option<RawTags>) -> Option<Vec<Tag>> {
    tags.map(|tags| {
        tags.tag
            .into_iter()
            .filter(|tag| !tag.name.trim().is_empty())
            .map(|tag| Tag {
                name: tag.name,
                url: tag.url.unwrap_or_default(),
            })
            .collect()
    })
}

fn streamable_from_raw(value: &Value) -> Option<Streamable> {
    match value {
        Value::Null => None,
        Value::Object(map) => {
            let streamable = Streamable {
                preview: map.get("#text").and_then(coerce_flag),
                full_track: map.get("fulltrack").and_then(coerce_flag),
            };
            (streamable != Streamable::default()).then_some(streamable)
        }
        other => coerce_flag(other).map(|full_track| Streamable {
            preview: None,
            full_track: Some(full_track),
        }),
    }
}

impl From<RawBio> for Biography {
    fn from(bio: RawBio) -> Self {
        let link = bio
            .links
            .and_then(|links| links.link.into_iter().find_map(|link| link.href))
            .filter(|href| !href.trim().is_empty());
        Biography {
            published: bio.published.unwrap_or_default(),
            summary: bio.summary.unwrap_or_default(),
            content: bio.content.unwrap_or_default(),
            link,
        }
    }
}

impl From<RawWiki> for Wiki {
    fn from(wiki: RawWiki) -> Self {
        Wiki {
            published: wiki.published.unwrap_or_default(),
            summary: wiki.summary.unwrap_or_default(),
            content: wiki.content.unwrap_or_default(),
        }
    }
}

impl TryFrom<RawArtist> for Artist {
    type Error = ShowcaseError;

    fn try_from(raw: RawArtist) -> Result<Self> {
        ensure_name("artist", &raw.name)?;

        // 详情接口把统计放在 `stats` 中，排行榜接口放在顶层
        let (listeners, playcount) = match raw.stats {
            Some(stats) => (
                stats.listeners.or(raw.listeners),
                stats.playcount.or(raw.playcount),
            ),
            None => (raw.listeners, raw.playcount),
        };

        let similar = raw.similar.map(|similar| {
            similar
                .artist
                .into_iter()
                .filter_map(|artist| Artist::try_from(artist).ok())
                .collect()
        });

        Ok(Artist {
            mbid: raw.mbid,
            name: raw.name,
            url: raw.url,
            images: images_from_raw(raw.image),
            streamable: raw.streamable,
            on_tour: raw.ontour,
            stats: Stats::from_counts(listeners, playcount),
            similar,
            tags: tags_from_raw(raw.tags),
            bio: raw.bio.map(Into::into),
        })
    }
}

impl TryFrom<RawTrack> for Track {
    type Error = ShowcaseError;

    fn try_from(raw: RawTrack) -> Result<Self> {
        ensure_name("track", &raw.name)?;

        let artist = match raw.artist {
            RawArtistRef::Name(name) => {
                ensure_name("artist", &name)?;
                Artist::stub(name)
            }
            RawArtistRef::Object(artist) => Artist::try_from(*artist)?,
        };

        Ok(Track {
            mbid: raw.mbid,
            name: raw.name,
            artist,
            duration: raw.duration.map(Duration::from_secs),
            playcount: raw.playcount,
            listeners: raw.listeners,
            images: images_from_raw(raw.image),
            url: raw.url,
            streamable: streamable_from_raw(&raw.streamable),
            rank: raw.attr.and_then(|attr| attr.rank),
            loved: false,
        })
    }
}

impl TryFrom<RawAlbum> for Album {
    type Error = ShowcaseError;

    fn try_from(raw: RawAlbum) -> Result<Self> {
        ensure_name("album", &raw.name)?;

        let tracks = raw
            .tracks
            .map(|list| {
                list.track
                    .into_iter()
                    .map(Track::try_from)
                    .collect::<Result<Vec<_>>>()
            })
            .transpose()?;

        let release_timestamp = raw.releasedate.as_deref().and_then(parse_release_date);

        Ok(Album {
            mbid: raw.mbid,
            name: raw.name,
            artist: raw.artist,
            images: images_from_raw(raw.image),
            streamable: raw.streamable,
            url: raw.url.unwrap_or_default(),
            release_date: raw.releasedate.map(|date| date.trim().to_string()),
            release_timestamp,
            stats: Stats::from_counts(raw.listeners, raw.playcount),
            top_tags: tags_from_raw(raw.toptags),
            tags: tags_from_raw(raw.tags),
            tracks,
            rank: raw.attr.and_then(|attr| attr.rank),
            wiki: raw.wiki.map(Into::into),
        })
    }
}
