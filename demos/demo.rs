//! 用于演示 `artist-showcase` 库的核心功能。
//!
//! ## 如何运行
//!
//! ```bash
//! LASTFM_API_KEY=<你的密钥> cargo run --package artist_showcase_rs --example demo
//! ```

use std::io::{self, Write};

use artist_showcase_rs::{
    Album, Artist, ArtistShowcase, ImageSize, Track,
    model::image::image_url,
    search::SearchPhase,
    store::{DetailStore, ListStore},
};

use tracing::{error, info, warn};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("info,artist_showcase_rs=debug")),
        )
        .init();

    info!("正在初始化...");
    let showcase = ArtistShowcase::from_env()?;

    // 首页：热门艺人与热门曲目
    let artists: ListStore<Artist> = ListStore::new();
    let tracks: ListStore<Track> = ListStore::new();
    if !showcase.load_home(&artists, &tracks).await {
        warn!("首页数据没有全部加载成功。");
    }

    println!("\n== 热门艺人 ==");
    for artist in artists.snapshot().items.iter().take(5) {
        let cover = image_url(ImageSize::Large, Some(&artist.images)).unwrap_or("N/A");
        println!("  {} | 封面: {}", artist.name, cover);
    }

    println!("\n== 热门曲目 ==");
    for track in tracks.snapshot().items.iter().take(10) {
        println!(
            "  {} - {} ({})",
            track.name,
            track.artist.name,
            track.formatted_duration().as_deref().unwrap_or("--:--")
        );
    }

    // 搜索
    let query = prompt("\n请输入要搜索的曲目或专辑名: ")?;
    let search = showcase.search();
    let mut rx = search.subscribe();
    search.on_input(&query);

    let state = rx
        .wait_for(|s| matches!(s.phase, SearchPhase::Displaying | SearchPhase::Closed))
        .await?
        .clone();

    if state.phase == SearchPhase::Closed || state.has_no_results() {
        error!("没有找到与 '{}' 相关的结果。", query);
        return Ok(());
    }

    println!("\n== 曲目 ==");
    for track in state.visible_tracks() {
        println!("  {} - {}", track.name, track.artist.name);
    }
    println!("\n== 专辑 ==");
    for album in state.visible_albums() {
        println!(
            "  {} - {}",
            album.name,
            album.artist.as_deref().unwrap_or("未知艺人")
        );
    }

    // 专辑详情需要 MusicBrainz ID，跳过没有 ID 的专辑
    let Some(first_album) = state.visible_albums().iter().find(|a| !a.mbid.is_empty()) else {
        warn!("搜索结果中没有带 MusicBrainz ID 的专辑。");
        return Ok(());
    };
    show_album(&showcase, first_album).await;

    Ok(())
}

async fn show_album(showcase: &ArtistShowcase, album: &Album) {
    let detail: DetailStore<Album> = DetailStore::new();
    if !detail.load_album(showcase.catalog(), &album.mbid).await {
        if detail.is_not_found() {
            error!("专辑未找到: {}", album.name);
        }
        return;
    }

    let Some(album) = detail.snapshot().record else {
        return;
    };
    println!("\n== 专辑: {} ==", album.name);
    if let Some(wiki) = &album.wiki {
        println!("{}\n", wiki.summary_text());
    }
    for (index, track) in album.tracks.iter().flatten().enumerate() {
        println!(
            "  [{:2}] {} {}",
            index + 1,
            track.name,
            track.formatted_duration().unwrap_or_default()
        );
    }
}

fn prompt(message: &str) -> io::Result<String> {
    print!("{message}");
    io::stdout().flush()?;
    let mut input = String::new();
    io::stdin().read_line(&mut input)?;
    Ok(input.trim().to_string())
}
