//! 搜索模块
//!
//! 把搜索框的输入防抖后，同时搜索曲目和专辑，并把两个结果合并为一个下拉框状态。
//! 状态通过 `tokio::sync::watch` 发布，界面只需订阅即可。

use std::{sync::Arc, time::Duration};

use futures::join;
use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::{
    model::generic::{Album, Track},
    providers::CatalogProvider,
};

mod debounce;
pub use debounce::Debouncer;

/// 最后一次输入之后等待多久才发起搜索。
pub const DEBOUNCE_DELAY: Duration = Duration::from_millis(500);

/// 下拉框中每类结果最多显示的条数。
pub const DROPDOWN_LIMIT: usize = 4;

/// 下拉框所处的阶段。
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SearchPhase {
    /// 还没有进行过搜索。
    #[default]
    Idle,
    /// 请求已发出，等待两个搜索都完成。
    Pending,
    /// 正在显示结果（可能为空）。
    Displaying,
    /// 下拉框已关闭。
    Closed,
}

/// 搜索下拉框的完整状态。
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SearchState {
    /// 当前阶段。
    pub phase: SearchPhase,
    /// 最近一次发出的查询。
    pub query: String,
    /// 曲目结果。
    pub tracks: Vec<Track>,
    /// 专辑结果。
    pub albums: Vec<Album>,
    /// 每次发起搜索或关闭下拉框都会递增，用来丢弃过期的结果。
    pub generation: u64,
}

impl SearchState {
    /// 下拉框是否可见。
    pub fn is_open(&self) -> bool {
        matches!(self.phase, SearchPhase::Pending | SearchPhase::Displaying)
    }

    /// 是否应显示 “无结果”。
    pub fn has_no_results(&self) -> bool {
        self.phase == SearchPhase::Displaying && self.tracks.is_empty() && self.albums.is_empty()
    }

    /// 下拉框中显示的曲目。
    pub fn visible_tracks(&self) -> &[Track] {
        &self.tracks[..self.tracks.len().min(DROPDOWN_LIMIT)]
    }

    /// 下拉框中显示的专辑。
    pub fn visible_albums(&self) -> &[Album] {
        &self.albums[..self.albums.len().min(DROPDOWN_LIMIT)]
    }

    fn close(&mut self) {
        self.generation += 1;
        self.phase = SearchPhase::Closed;
        self.tracks.clear();
        self.albums.clear();
    }
}

/// 屏幕上的一个点。
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Point {
    /// 横坐标。
    pub x: f64,
    /// 纵坐标。
    pub y: f64,
}

/// 下拉框所占的矩形区域。
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bounds {
    /// 左上角横坐标。
    pub x: f64,
    /// 左上角纵坐标。
    pub y: f64,
    /// 宽度。
    pub width: f64,
    /// 高度。
    pub height: f64,
}

impl Bounds {
    /// 点是否落在区域内（含边界）。
    pub fn contains(&self, point: Point) -> bool {
        point.x >= self.x
            && point.x <= self.x + self.width
            && point.y >= self.y
            && point.y <= self.y + self.height
    }
}

struct Inner {
    provider: Arc<dyn CatalogProvider>,
    state: watch::Sender<SearchState>,
    debouncer: Debouncer,
}

/// 搜索聚合器。克隆得到的句柄共享同一个状态。
#[derive(Clone)]
pub struct SearchAggregator {
    inner: Arc<Inner>,
}

impl std::fmt::Debug for SearchAggregator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchAggregator")
            .field("state", &*self.inner.state.borrow())
            .finish_non_exhaustive()
    }
}

impl SearchAggregator {
    /// 使用默认的 500ms 防抖创建聚合器。
    pub fn new(provider: Arc<dyn CatalogProvider>) -> Self {
        Self::with_delay(provider, DEBOUNCE_DELAY)
    }

    /// 使用自定义的防抖时长创建聚合器。
    pub fn with_delay(provider: Arc<dyn CatalogProvider>, delay: Duration) -> Self {
        let (state, _) = watch::channel(SearchState::default());
        Self {
            inner: Arc::new(Inner {
                provider,
                state,
                debouncer: Debouncer::new(delay),
            }),
        }
    }

    /// 当前状态的快照。
    pub fn state(&self) -> SearchState {
        self.inner.state.borrow().clone()
    }

    /// 订阅状态变化。
    pub fn subscribe(&self) -> watch::Receiver<SearchState> {
        self.inner.state.subscribe()
    }

    /// 处理搜索框的输入。必须在 tokio 运行时中调用。
    ///
    /// 空白输入会立即关闭下拉框并取消尚未发出的搜索，不产生任何请求。
    /// 其它输入会重新开始计时，只有最后一次输入会被搜索。
    pub fn on_input(&self, text: &str) {
        let query = text.trim();
        if query.is_empty() {
            self.inner.debouncer.cancel();
            self.inner.state.send_modify(|state| {
                state.close();
                state.query.clear();
            });
            debug!("[Search] 输入为空，关闭下拉框");
            return;
        }

        let inner = self.inner.clone();
        let query = query.to_string();
        self.inner.debouncer.schedule(move || {
            let generation = begin(&inner, &query);
            dispatch(inner, query, generation)
        });
    }

    /// 处理指针按下事件。点在下拉框之外时关闭它并返回 `true`。
    pub fn on_pointer_down(&self, point: Point, dropdown: Bounds) -> bool {
        if dropdown.contains(point) {
            return false;
        }
        self.close();
        true
    }

    /// 关闭下拉框并清空结果。尚未发出的搜索被取消，已发出的搜索结果会被丢弃。
    pub fn close(&self) {
        self.inner.debouncer.cancel();
        self.inner.state.send_modify(SearchState::close);
    }

    /// 修改当前显示的曲目中与 `mbid` 匹配的收藏标记。
    ///
    /// 只影响本地状态。`mbid` 为空白时忽略，返回是否有曲目被修改。
    pub fn toggle_favorite(&self, mbid: &str, loved: bool) -> bool {
        if mbid.trim().is_empty() {
            return false;
        }
        self.inner.state.send_if_modified(|state| {
            let mut changed = false;
            for track in state
                .tracks
                .iter_mut()
                .filter(|track| track.mbid.as_deref() == Some(mbid))
            {
                if track.loved != loved {
                    track.loved = loved;
                    changed = true;
                }
            }
            changed
        })
    }
}

/// 防抖结束时同步调用：领取新的代数并进入等待状态。
///
/// 之后的关闭或新搜索都会再次递增代数，使这次搜索的结果失效。
fn begin(inner: &Inner, query: &str) -> u64 {
    let mut generation = 0;
    inner.state.send_modify(|state| {
        state.generation += 1;
        generation = state.generation;
        state.phase = SearchPhase::Pending;
        state.query = query.to_string();
    });
    generation
}

/// 发起一次搜索，两个结果都返回后再更新状态。
async fn dispatch(inner: Arc<Inner>, query: String, generation: u64) {
    info!("[Search] 开始搜索 '{}' (第 {} 代)", query, generation);

    let (tracks, albums) = join!(
        inner.provider.search_tracks(&query),
        inner.provider.search_albums(&query)
    );

    let tracks = tracks.unwrap_or_else(|e| {
        warn!("[Search] 曲目搜索失败，按空结果处理: {}", e);
        Vec::new()
    });
    let albums = albums.unwrap_or_else(|e| {
        warn!("[Search] 专辑搜索失败，按空结果处理: {}", e);
        Vec::new()
    });

    let applied = inner.state.send_if_modified(|state| {
        if state.generation != generation {
            return false;
        }
        state.tracks = tracks;
        state.albums = albums;
        state.phase = SearchPhase::Displaying;
        true
    });

    if applied {
        debug!("[Search] 已显示 '{}' 的结果", query);
    } else {
        debug!("[Search] 丢弃过期的搜索结果 '{}' (第 {} 代)", query, generation);
    }
}
