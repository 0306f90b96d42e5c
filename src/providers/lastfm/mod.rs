//! 此模块实现了与 Last.fm 目录 API 进行交互的 `CatalogProvider`。
//! API 文档见 <https://www.last.fm/api>
//!
//! 每个操作都遵循同样的流程：发出一次请求，检查状态码和错误对象，
//! 取出响应中的子结构，规范化后返回。失败时记录日志并返回扁平化的错误。

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::{debug, error};

use crate::{
    config::CatalogConfig,
    error::{Result, ShowcaseError},
    http::{CatalogTransport, HttpTransport},
    model::generic::{Album, Artist, Page, Track},
    providers::CatalogProvider,
};

pub mod de;
pub mod models;
pub mod normalize;

use models::RawApiError;
use normalize::{
    normalize_album, normalize_artist, normalize_list, normalize_page_info, normalize_track,
};

/// 本模块调用的 Last.fm API 方法。
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    strum_macros::Display,
    strum_macros::IntoStaticStr,
    strum_macros::EnumIter,
)]
pub enum Operation {
    /// 热门艺人排行
    #[strum(serialize = "chart.getTopArtists")]
    TopArtists,
    /// 热门曲目排行
    #[strum(serialize = "chart.getTopTracks")]
    TopTracks,
    /// 艺人详情
    #[strum(serialize = "artist.getinfo")]
    ArtistInfo,
    /// 艺人热门专辑
    #[strum(serialize = "artist.gettopalbums")]
    ArtistTopAlbums,
    /// 专辑详情
    #[strum(serialize = "album.getInfo")]
    AlbumInfo,
    /// 搜索曲目
    #[strum(serialize = "track.search")]
    SearchTracks,
    /// 搜索专辑
    #[strum(serialize = "album.search")]
    SearchAlbums,
}

impl Operation {
    /// API 方法名，例如 `"chart.getTopArtists"`。
    pub fn method(self) -> &'static str {
        self.into()
    }

    /// 用于错误信息的中文描述。
    pub fn description(self) -> &'static str {
        match self {
            Self::TopArtists => "获取热门艺人",
            Self::TopTracks => "获取热门曲目",
            Self::ArtistInfo => "获取艺人详情",
            Self::ArtistTopAlbums => "获取艺人专辑",
            Self::AlbumInfo => "获取专辑详情",
            Self::SearchTracks => "搜索曲目",
            Self::SearchAlbums => "搜索专辑",
        }
    }
}

/// Last.fm 的客户端实现。
#[derive(Clone)]
pub struct LastFmClient {
    transport: Arc<dyn CatalogTransport>,
}

impl std::fmt::Debug for LastFmClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LastFmClient").finish_non_exhaustive()
    }
}

impl LastFmClient {
    /// 使用基于 `reqwest` 的传输层创建客户端。
    pub fn new(config: &CatalogConfig) -> Result<Self> {
        Ok(Self::with_transport(Arc::new(HttpTransport::new(config)?)))
    }

    /// 使用自定义的传输层创建客户端，主要用于测试。
    pub fn with_transport(transport: Arc<dyn CatalogTransport>) -> Self {
        Self { transport }
    }

    /// 发出请求并检查状态码与 200 响应中的错误对象，返回原始响应体。
    async fn fetch(&self, op: Operation, params: &[(&str, String)]) -> Result<Value> {
        debug!("[LastFM] 请求 {}", op);
        let response = self.transport.get(op.method(), params).await?;
        let api_error = parse_api_error(&response.body);

        if response.status != 200 {
            return Err(ShowcaseError::UnexpectedStatus {
                status: response.status,
                api_code: api_error.as_ref().and_then(|e| e.error),
                api_message: api_error.and_then(|e| e.message).or_else(|| {
                    response
                        .body
                        .as_str()
                        .map(str::trim)
                        .filter(|text| !text.is_empty())
                        .map(ToString::to_string)
                }),
            });
        }

        if let Some(RawApiError {
            error: Some(code),
            message,
        }) = api_error
        {
            return Err(ShowcaseError::Api {
                code,
                message: message.unwrap_or_default(),
            });
        }

        Ok(response.body)
    }

    async fn top_artists(&self) -> Result<Vec<Artist>> {
        let mut body = self.fetch(Operation::TopArtists, &[]).await?;
        let list = take_list(&mut body, "/artists/artist")?;
        normalize_list(list, normalize_artist)
    }

    async fn top_tracks(&self) -> Result<Vec<Track>> {
        let mut body = self.fetch(Operation::TopTracks, &[]).await?;
        let list = take_list(&mut body, "/tracks/track")?;
        normalize_list(list, normalize_track)
    }

    async fn artist_info(&self, mbid: &str) -> Result<Artist> {
        let mut body = self
            .fetch(Operation::ArtistInfo, &[("mbid", mbid.to_string())])
            .await?;
        normalize_artist(take_object(&mut body, "/artist")?)
    }

    async fn artist_albums(&self, mbid: &str, page: u32, limit: u32) -> Result<Page<Album>> {
        let params = [
            ("mbid", mbid.to_string()),
            ("page", page.to_string()),
            ("limit", limit.to_string()),
        ];
        let mut body = self.fetch(Operation::ArtistTopAlbums, &params).await?;
        let list = take_list(&mut body, "/topalbums/album")?;
        let info = normalize_page_info(&take_object(&mut body, "/topalbums/@attr")?)?;
        Ok(Page {
            items: normalize_list(list, normalize_album)?,
            info,
        })
    }

    async fn album_info(&self, mbid: &str) -> Result<Album> {
        let mut body = self
            .fetch(Operation::AlbumInfo, &[("mbid", mbid.to_string())])
            .await?;
        normalize_album(take_object(&mut body, "/album")?)
    }

    async fn find_tracks(&self, query: &str) -> Result<Vec<Track>> {
        let mut body = self
            .fetch(Operation::SearchTracks, &[("track", query.to_string())])
            .await?;
        let list = take_list(&mut body, "/results/trackmatches/track")?;
        normalize_list(list, normalize_track)
    }

    async fn find_albums(&self, query: &str) -> Result<Vec<Album>> {
        let mut body = self
            .fetch(Operation::SearchAlbums, &[("album", query.to_string())])
            .await?;
        let list = take_list(&mut body, "/results/albummatches/album")?;
        normalize_list(list, normalize_album)
    }
}

/// 从响应体中读取 Last.fm 的 `{error, message}` 对象。
fn parse_api_error(body: &Value) -> Option<RawApiError> {
    let object = body.as_object()?;
    if !object.contains_key("error") && !object.contains_key("message") {
        return None;
    }
    serde_json::from_value(body.clone()).ok()
}

/// 取出一个列表子结构。单个对象也接受，由规范化步骤视为只有一个元素的列表。
fn take_list(body: &mut Value, pointer: &str) -> Result<Value> {
    match body.pointer_mut(pointer).map(Value::take) {
        Some(value @ (Value::Array(_) | Value::Object(_))) => Ok(value),
        _ => Err(ShowcaseError::ResponseShape(format!(
            "未找到结果 (缺少 {pointer})"
        ))),
    }
}

/// 取出一个对象子结构。
fn take_object(body: &mut Value, pointer: &str) -> Result<Value> {
    match body.pointer_mut(pointer).map(Value::take) {
        Some(value @ Value::Object(_)) => Ok(value),
        _ => Err(ShowcaseError::ResponseShape(format!(
            "未找到结果 (缺少 {pointer})"
        ))),
    }
}

/// 记录失败并把错误扁平化为 [`ShowcaseError::Service`]。
fn flatten(op: Operation, err: ShowcaseError) -> ShowcaseError {
    let kind = err.kind();
    error!(
        operation = op.method(),
        %kind,
        "[LastFM] {}失败: {}",
        op.description(),
        err
    );
    ShowcaseError::Service {
        operation: op.method(),
        kind,
        message: format!("{}失败: {}", op.description(), err.cause_message()),
    }
}

#[async_trait]
impl CatalogProvider for LastFmClient {
    async fn get_top_artists(&self) -> Result<Vec<Artist>> {
        self.top_artists()
            .await
            .map_err(|e| flatten(Operation::TopArtists, e))
    }

    async fn get_top_tracks(&self) -> Result<Vec<Track>> {
        self.top_tracks()
            .await
            .map_err(|e| flatten(Operation::TopTracks, e))
    }

    async fn get_artist_info(&self, mbid: &str) -> Result<Artist> {
        self.artist_info(mbid)
            .await
            .map_err(|e| flatten(Operation::ArtistInfo, e))
    }

    async fn get_artist_albums(&self, mbid: &str, page: u32, limit: u32) -> Result<Page<Album>> {
        self.artist_albums(mbid, page, limit)
            .await
            .map_err(|e| flatten(Operation::ArtistTopAlbums, e))
    }

    async fn get_album_info(&self, mbid: &str) -> Result<Album> {
        self.album_info(mbid)
            .await
            .map_err(|e| flatten(Operation::AlbumInfo, e))
    }

    async fn search_tracks(&self, query: &str) -> Result<Vec<Track>> {
        self.find_tracks(query)
            .await
            .map_err(|e| flatten(Operation::SearchTracks, e))
    }

    async fn search_albums(&self, query: &str) -> Result<Vec<Album>> {
        self.find_albums(query)
            .await
            .map_err(|e| flatten(Operation::SearchAlbums, e))
    }
}
