//! 页面使用的状态容器。
//!
//! 每个容器都是显式持有的对象，内部用 `tokio::sync::watch` 发布状态，
//! 界面通过 `subscribe()` 观察变化。加载失败时保留旧数据，只记录错误信息。

use std::{future::Future, sync::Arc};

use tokio::sync::watch;
use tracing::warn;

use crate::{
    error::Result,
    model::generic::{Album, Artist, PageInfo, Track},
    providers::CatalogProvider,
};

/// 艺人专辑列表每页的条数。
pub const ALBUMS_PAGE_SIZE: u32 = 12;

/// 列表页面的状态。
#[derive(Debug, Clone, PartialEq)]
pub struct ListState<T> {
    /// 列表条目。
    pub items: Vec<T>,
    /// 是否正在加载。
    pub loading: bool,
    /// 最近一次加载失败的信息。
    pub error: Option<String>,
}

impl<T> Default for ListState<T> {
    fn default() -> Self {
        Self {
            items: Vec::new(),
            loading: false,
            error: None,
        }
    }
}

/// 列表状态容器，例如首页的热门艺人和热门曲目。
#[derive(Debug)]
pub struct ListStore<T> {
    state: watch::Sender<ListState<T>>,
}

impl<T> Default for ListStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> ListStore<T> {
    /// 创建一个空的容器。
    pub fn new() -> Self {
        Self {
            state: watch::Sender::new(ListState::default()),
        }
    }

    /// 订阅状态变化。
    pub fn subscribe(&self) -> watch::Receiver<ListState<T>> {
        self.state.subscribe()
    }

    /// 清空条目，加载状态和错误保持不变。
    pub fn clear(&self) {
        self.state.send_modify(|state| state.items.clear());
    }

    /// 等待 `fut` 完成并更新状态，返回是否成功。
    ///
    /// 开始时置 `loading` 并清除错误；成功时替换条目，失败时记录错误并保留旧条目。
    pub async fn load<F>(&self, fut: F) -> bool
    where
        F: Future<Output = Result<Vec<T>>>,
    {
        self.state.send_modify(|state| {
            state.loading = true;
            state.error = None;
        });

        match fut.await {
            Ok(items) => {
                self.state.send_modify(|state| {
                    state.items = items;
                    state.loading = false;
                });
                true
            }
            Err(e) => {
                warn!("[Store] 列表加载失败: {}", e);
                self.state.send_modify(|state| {
                    state.error = Some(e.to_string());
                    state.loading = false;
                });
                false
            }
        }
    }
}

impl<T: Clone> ListStore<T> {
    /// 当前状态的快照。
    pub fn snapshot(&self) -> ListState<T> {
        self.state.borrow().clone()
    }
}

impl ListStore<Artist> {
    /// 加载热门艺人排行。
    pub async fn load_top_artists(&self, provider: &dyn CatalogProvider) -> bool {
        self.load(provider.get_top_artists()).await
    }
}

impl ListStore<Track> {
    /// 加载热门曲目排行。
    pub async fn load_top_tracks(&self, provider: &dyn CatalogProvider) -> bool {
        self.load(provider.get_top_tracks()).await
    }
}

/// 详情页面的状态。
#[derive(Debug, Clone, PartialEq)]
pub struct DetailState<T> {
    /// 已加载的记录。
    pub record: Option<T>,
    /// 是否正在加载。
    pub loading: bool,
    /// 最近一次加载失败的信息。
    pub error: Option<String>,
}

impl<T> Default for DetailState<T> {
    fn default() -> Self {
        Self {
            record: None,
            loading: false,
            error: None,
        }
    }
}

impl<T> DetailState<T> {
    /// 加载已结束但没有记录，页面应显示 “未找到”。
    pub fn is_not_found(&self) -> bool {
        !self.loading && self.record.is_none() && self.error.is_some()
    }
}

/// 详情状态容器，用于专辑页和艺人页。
#[derive(Debug)]
pub struct DetailStore<T> {
    state: watch::Sender<DetailState<T>>,
}

impl<T> Default for DetailStore<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> DetailStore<T> {
    /// 创建一个空的容器。
    pub fn new() -> Self {
        Self {
            state: watch::Sender::new(DetailState::default()),
        }
    }

    /// 订阅状态变化。
    pub fn subscribe(&self) -> watch::Receiver<DetailState<T>> {
        self.state.subscribe()
    }

    /// 清除记录与错误。
    pub fn clear(&self) {
        self.state.send_modify(|state| {
            state.record = None;
            state.error = None;
        });
    }

    /// 是否应显示 “未找到”。
    pub fn is_not_found(&self) -> bool {
        self.state.borrow().is_not_found()
    }

    /// 等待 `fut` 完成并更新状态，返回是否成功。
    ///
    /// 切换到另一条记录时，失败会清除旧记录，以免显示错误的页面。
    pub async fn load<F>(&self, fut: F) -> bool
    where
        F: Future<Output = Result<T>>,
    {
        self.state.send_modify(|state| {
            state.loading = true;
            state.error = None;
        });

        match fut.await {
            Ok(record) => {
                self.state.send_modify(|state| {
                    state.record = Some(record);
                    state.loading = false;
                });
                true
            }
            Err(e) => {
                warn!("[Store] 详情加载失败: {}", e);
                self.state.send_modify(|state| {
                    state.record = None;
                    state.error = Some(e.to_string());
                    state.loading = false;
                });
                false
            }
        }
    }
}

impl<T: Clone> DetailStore<T> {
    /// 当前状态的快照。
    pub fn snapshot(&self) -> DetailState<T> {
        self.state.borrow().clone()
    }
}

impl DetailStore<Artist> {
    /// 加载艺人详情。
    pub async fn load_artist(&self, provider: &dyn CatalogProvider, mbid: &str) -> bool {
        self.load(provider.get_artist_info(mbid)).await
    }
}

impl DetailStore<Album> {
    /// 加载专辑详情。
    pub async fn load_album(&self, provider: &dyn CatalogProvider, mbid: &str) -> bool {
        self.load(provider.get_album_info(mbid)).await
    }

    /// 修改专辑中同名曲目的收藏标记，返回是否有曲目被修改。
    pub fn toggle_track_favorite(&self, track_name: &str, loved: bool) -> bool {
        if track_name.trim().is_empty() {
            return false;
        }
        self.state.send_if_modified(|state| {
            let Some(tracks) = state.record.as_mut().and_then(|a| a.tracks.as_mut()) else {
                return false;
            };
            let mut changed = false;
            for track in tracks.iter_mut().filter(|t| t.name == track_name) {
                if track.loved != loved {
                    track.loved = loved;
                    changed = true;
                }
            }
            changed
        })
    }
}

/// 艺人专辑列表的分页状态。
#[derive(Debug, Clone, PartialEq)]
pub struct AlbumsPageState {
    /// 当前页，从 1 开始。
    pub page: u32,
    /// 本页专辑。
    pub albums: Vec<Album>,
    /// 最近一次成功加载的分页信息。
    pub info: Option<PageInfo>,
    /// 是否正在加载。
    pub loading: bool,
    /// 最近一次加载失败的信息。
    pub error: Option<String>,
}

impl Default for AlbumsPageState {
    fn default() -> Self {
        Self {
            page: 1,
            albums: Vec::new(),
            info: None,
            loading: false,
            error: None,
        }
    }
}

impl AlbumsPageState {
    /// 已知的总页数，尚未加载时为 `None`。
    pub fn total_pages(&self) -> Option<u32> {
        self.info.as_ref().map(|info| info.total_pages)
    }
}

/// 按页浏览一位艺人的热门专辑，每页固定 [`ALBUMS_PAGE_SIZE`] 条。
pub struct ArtistAlbumsPager {
    provider: Arc<dyn CatalogProvider>,
    mbid: String,
    state: watch::Sender<AlbumsPageState>,
}

impl std::fmt::Debug for ArtistAlbumsPager {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ArtistAlbumsPager")
            .field("mbid", &self.mbid)
            .field("state", &*self.state.borrow())
            .finish_non_exhaustive()
    }
}

impl ArtistAlbumsPager {
    /// 为指定艺人创建分页器，当前页为 1。
    pub fn new(provider: Arc<dyn CatalogProvider>, mbid: impl Into<String>) -> Self {
        Self {
            provider,
            mbid: mbid.into(),
            state: watch::Sender::new(AlbumsPageState::default()),
        }
    }

    /// 当前状态的快照。
    pub fn snapshot(&self) -> AlbumsPageState {
        self.state.borrow().clone()
    }

    /// 订阅状态变化。
    pub fn subscribe(&self) -> watch::Receiver<AlbumsPageState> {
        self.state.subscribe()
    }

    /// 当前页。
    pub fn page(&self) -> u32 {
        self.state.borrow().page
    }

    /// 重新加载当前页。
    pub async fn load(&self) -> bool {
        let page = self.page();
        self.fetch(page).await
    }

    /// 跳转到指定页。页码小于 1 或超出已知的总页数时不做任何事并返回 `false`。
    pub async fn go_to(&self, page: u32) -> bool {
        let in_range = {
            let state = self.state.borrow();
            page >= 1 && state.total_pages().is_none_or(|total| page <= total.max(1))
        };
        if !in_range {
            return false;
        }
        self.fetch(page).await
    }

    /// 跳转到下一页。
    pub async fn next(&self) -> bool {
        let page = self.page();
        self.go_to(page.saturating_add(1)).await
    }

    /// 跳转到上一页。
    pub async fn previous(&self) -> bool {
        let page = self.page();
        if page <= 1 {
            return false;
        }
        self.go_to(page - 1).await
    }

    async fn fetch(&self, page: u32) -> bool {
        self.state.send_modify(|state| {
            state.page = page;
            state.loading = true;
            state.error = None;
        });

        match self
            .provider
            .get_artist_albums(&self.mbid, page, ALBUMS_PAGE_SIZE)
            .await
        {
            Ok(result) => {
                self.state.send_modify(|state| {
                    state.albums = result.items;
                    state.info = Some(result.info);
                    state.loading = false;
                });
                true
            }
            Err(e) => {
                warn!("[Store] 第 {} 页专辑加载失败: {}", page, e);
                self.state.send_modify(|state| {
                    state.error = Some(e.to_string());
                    state.loading = false;
                });
                false
            }
        }
    }
}
