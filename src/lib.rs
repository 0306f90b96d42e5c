#![warn(missing_docs)]

//! # Artist Showcase RS
//!
//! 一个用于浏览 Last.fm 音乐目录的异步 Rust 库，负责调用 API、修复响应的形状，
//! 并把搜索结果合并为一致的界面状态。
//!
//! ## 主要功能
//!
//! - **目录数据**: 获取热门艺人、热门曲目、艺人详情、艺人专辑（分页）和专辑详情。
//! - **规范化**: 把 Last.fm 不稳定的 JSON（字符串形式的数字、单个对象代替数组、空字符串代替对象）
//!   转换为严格的模型。
//! - **搜索**: 防抖后同时搜索曲目和专辑，丢弃过期的结果。
//! - **状态容器**: 基于 `tokio::sync::watch` 的列表、详情和分页状态。
//!
//! ## 加载首页
//!
//! ```rust,no_run
//! use artist_showcase_rs::ArtistShowcase;
//! use artist_showcase_rs::store::ListStore;
//!
//! async {
//!     let showcase = ArtistShowcase::from_env().unwrap();
//!     let artists = ListStore::new();
//!     let tracks = ListStore::new();
//!     showcase.load_home(&artists, &tracks).await;
//!
//!     for artist in artists.snapshot().items.iter().take(5) {
//!         println!("{}", artist.name);
//!     }
//!     if let Some(error) = tracks.snapshot().error {
//!         eprintln!("加载热门曲目失败: {}", error);
//!     }
//! };
//! ```
//!
//! ## 搜索
//!
//! ```rust,no_run
//! use artist_showcase_rs::ArtistShowcase;
//! use artist_showcase_rs::search::SearchPhase;
//!
//! async {
//!     let showcase = ArtistShowcase::from_env().unwrap();
//!     let search = showcase.search();
//!     let mut state = search.subscribe();
//!
//!     search.on_input("believe");
//!     let state = state
//!         .wait_for(|s| s.phase == SearchPhase::Displaying)
//!         .await
//!         .unwrap();
//!     for track in state.visible_tracks() {
//!         println!("{} - {}", track.name, track.artist.name);
//!     }
//! };
//! ```
pub mod config;
pub mod error;
pub mod http;
pub mod model;
pub mod providers;
pub mod search;
pub mod store;
pub mod utils;

use std::sync::Arc;

pub use crate::{
    config::CatalogConfig,
    error::{ErrorKind, Result, ShowcaseError},
    model::{
        generic::{Album, Artist, Page, PageInfo, Track},
        image::{ImageSet, ImageSize},
    },
    providers::{CatalogProvider, lastfm::LastFmClient},
};

use crate::{
    search::SearchAggregator,
    store::{ArtistAlbumsPager, ListStore},
};

// ==========================================================
//  顶层 API
// ==========================================================

/// 顶层客户端，持有一个目录提供商，并为页面创建搜索聚合器和状态容器。
///
/// 这是与本库交互的主要入口点。
#[derive(Clone)]
pub struct ArtistShowcase {
    provider: Arc<dyn CatalogProvider>,
}

impl std::fmt::Debug for ArtistShowcase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArtistShowcase").finish_non_exhaustive()
    }
}

impl ArtistShowcase {
    /// 从 `LASTFM_API_KEY` 和 `LASTFM_API_BASE_URL` 环境变量创建客户端。
    pub fn from_env() -> Result<Self> {
        let config = CatalogConfig::from_env()?;
        Self::from_config(&config)
    }

    /// 使用给定配置创建基于 Last.fm 的客户端。
    pub fn from_config(config: &CatalogConfig) -> Result<Self> {
        let client = LastFmClient::new(config)?;
        tracing::info!("[Main] Last.fm 客户端初始化成功，地址: {}", config.base_url);
        Ok(Self::with_provider(Arc::new(client)))
    }

    /// 使用任意提供商创建客户端。
    pub fn with_provider(provider: Arc<dyn CatalogProvider>) -> Self {
        Self { provider }
    }

    /// 底层的目录提供商。
    pub fn catalog(&self) -> &dyn CatalogProvider {
        self.provider.as_ref()
    }

    /// 创建一个新的搜索聚合器。每个搜索框应持有自己的聚合器。
    pub fn search(&self) -> SearchAggregator {
        SearchAggregator::new(self.provider.clone())
    }

    /// 为指定艺人创建专辑分页器。
    pub fn artist_albums(&self, artist_mbid: impl Into<String>) -> ArtistAlbumsPager {
        ArtistAlbumsPager::new(self.provider.clone(), artist_mbid)
    }

    /// 同时加载首页的热门艺人和热门曲目。
    ///
    /// 两个列表各自记录成功或失败，返回值表示两者是否都成功。
    pub async fn load_home(&self, artists: &ListStore<Artist>, tracks: &ListStore<Track>) -> bool {
        let provider = self.catalog();
        let (artists_ok, tracks_ok) = futures::join!(
            artists.load_top_artists(provider),
            tracks.load_top_tracks(provider)
        );
        if !(artists_ok && tracks_ok) {
            tracing::warn!(
                "[Main] 首页加载未完全成功 (艺人: {}, 曲目: {})",
                artists_ok,
                tracks_ok
            );
        }
        artists_ok && tracks_ok
    }
}
