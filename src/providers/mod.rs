//! 提供商模块
//!
//! 该模块定义了与音乐目录服务进行交互的核心抽象。

use async_trait::async_trait;

use crate::{
    error::Result,
    model::generic::{Album, Artist, Page, Track},
};

pub mod lastfm;

/// 定义了音乐目录提供商需要实现的通用接口。
///
/// 所有方法在失败时都返回已经扁平化的 [`ShowcaseError::Service`](crate::error::ShowcaseError::Service)。
#[async_trait]
pub trait CatalogProvider: Send + Sync {
    ///
    /// 获取全站热门艺人排行。
    ///
    async fn get_top_artists(&self) -> Result<Vec<Artist>>;

    ///
    /// 获取全站热门曲目排行。
    ///
    async fn get_top_tracks(&self) -> Result<Vec<Track>>;

    ///
    /// 根据 MusicBrainz ID 获取艺人详情，包括简介、标签和相似艺人。
    ///
    /// # 参数
    /// * `mbid` - 艺人的 MusicBrainz ID。
    ///
    async fn get_artist_info(&self, mbid: &str) -> Result<Artist>;

    ///
    /// 分页获取艺人的热门专辑。
    ///
    /// # 参数
    /// * `mbid` - 艺人的 MusicBrainz ID。
    /// * `page` - 页码，从 1 开始。
    /// * `limit` - 每页的专辑数量。
    ///
    /// # 返回
    /// 一个 `Result`，成功时包含本页专辑和已转换为数值的分页信息。
    ///
    async fn get_artist_albums(&self, mbid: &str, page: u32, limit: u32) -> Result<Page<Album>>;

    ///
    /// 根据 MusicBrainz ID 获取专辑详情，包括曲目列表和百科。
    ///
    async fn get_album_info(&self, mbid: &str) -> Result<Album>;

    ///
    /// 按名称搜索曲目。
    ///
    async fn search_tracks(&self, query: &str) -> Result<Vec<Track>>;

    ///
    /// 按名称搜索专辑。
    ///
    async fn search_albums(&self, query: &str) -> Result<Vec<Album>>;
}
