use std::{
    collections::HashMap,
    path::Path,
    sync::{Arc, Mutex},
};

use async_trait::async_trait;
use serde_json::Value;

use artist_showcase_rs::{
    Album, ArtistShowcase, CatalogProvider, ErrorKind, LastFmClient, ShowcaseError,
    http::{CatalogTransport, RawResponse},
    model::image::{ImageSize, resolve_image_url},
    providers::lastfm::normalize::{normalize_album, normalize_artist, normalize_images},
    store::{DetailStore, ListStore},
};

fn load_test_data(filename: &str) -> Value {
    let path = Path::new("tests/test_data").join(filename);
    let text = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("读取测试文件 '{:?}' 失败: {}", path, e));
    serde_json::from_str(&text).unwrap_or_else(|e| panic!("解析测试文件 '{:?}' 失败: {}", path, e))
}

/// 按 API 方法名返回测试文件内容的传输层。
#[derive(Default)]
struct FixtureTransport {
    routes: HashMap<&'static str, (u16, &'static str)>,
    calls: Mutex<Vec<(String, Vec<(String, String)>)>>,
}

impl FixtureTransport {
    fn route(mut self, method: &'static str, status: u16, fixture: &'static str) -> Self {
        self.routes.insert(method, (status, fixture));
        self
    }

    fn standard() -> Self {
        Self::default()
            .route("chart.getTopArtists", 200, "top_artists.json")
            .route("chart.getTopTracks", 200, "top_tracks.json")
            .route("artist.getinfo", 200, "artist_info.json")
            .route("artist.gettopalbums", 200, "artist_top_albums.json")
            .route("album.getInfo", 200, "album_info.json")
            .route("track.search", 200, "track_search.json")
            .route("album.search", 200, "album_search.json")
    }

    fn calls(&self) -> Vec<(String, Vec<(String, String)>)> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl CatalogTransport for FixtureTransport {
    async fn get(
        &self,
        method: &str,
        params: &[(&str, String)],
    ) -> artist_showcase_rs::Result<RawResponse> {
        self.calls.lock().unwrap().push((
            method.to_string(),
            params
                .iter()
                .map(|(k, v)| (k.to_string(), v.clone()))
                .collect(),
        ));
        let (status, fixture) = self
            .routes
            .get(method)
            .copied()
            .unwrap_or_else(|| panic!("没有为 {method} 配置测试文件"));
        Ok(RawResponse {
            status,
            body: load_test_data(fixture),
        })
    }
}

fn client(transport: FixtureTransport) -> (LastFmClient, Arc<FixtureTransport>) {
    let transport = Arc::new(transport);
    (LastFmClient::with_transport(transport.clone()), transport)
}

#[test_log::test(tokio::test)]
async fn test_top_artists_from_fixture() {
    let (client, _) = client(FixtureTransport::standard());
    let artists = client.get_top_artists().await.unwrap();

    assert_eq!(artists.len(), 3);
    let weeknd = &artists[0];
    assert_eq!(weeknd.name, "The Weeknd");
    assert_eq!(
        weeknd.mbid.as_deref(),
        Some("c8b03190-306c-4120-bb0b-6f2ebfc06ea9")
    );
    assert_eq!(weeknd.stats.as_ref().and_then(|s| s.playcount), Some(258_871_465));
    assert_eq!(weeknd.images.len(), 5);
    assert_eq!(
        weeknd.images.url(ImageSize::Large),
        Some("https://lastfm.freetls.fastly.net/i/u/174s/2a96cbd8b46e442fc41c2b86b821562f.png")
    );

    // 空字符串的 mbid 视为缺失
    assert!(artists[2].mbid.is_none());
    assert!(artists[2].images.is_empty());
}

#[test_log::test(tokio::test)]
async fn test_top_tracks_from_fixture() {
    let (client, _) = client(FixtureTransport::standard());
    let tracks = client.get_top_tracks().await.unwrap();

    assert_eq!(tracks.len(), 2);
    assert_eq!(tracks[0].artist.name, "Lady Gaga");
    assert_eq!(tracks[0].formatted_duration().as_deref(), Some("4:11"));
    assert_eq!(tracks[0].listeners, Some(1_432_342));
    assert_eq!(tracks[1].artist.name, "ROSÉ");
    assert_eq!(tracks[1].formatted_duration(), None);
}

#[test_log::test(tokio::test)]
async fn test_artist_info_from_fixture() {
    let (client, transport) = client(FixtureTransport::standard());
    let artist = client
        .get_artist_info("bfcc6d75-a6a5-4bc6-8282-47aec8531818")
        .await
        .unwrap();

    assert_eq!(artist.name, "Cher");
    assert_eq!(artist.on_tour, Some(false));
    assert_eq!(artist.stats.as_ref().and_then(|s| s.listeners), Some(1_372_583));

    let similar = artist.similar.as_ref().unwrap();
    assert_eq!(
        similar.iter().map(|a| a.name.as_str()).collect::<Vec<_>>(),
        vec!["Sonny & Cher", "Madonna"]
    );
    assert_eq!(artist.tags.as_ref().unwrap().len(), 2);

    let bio = artist.bio.as_ref().unwrap();
    assert_eq!(bio.link.as_deref(), Some("https://last.fm/music/Cher/+wiki"));
    assert_eq!(
        bio.summary_text(),
        "Cher (born Cherilyn Sarkisian; May 20, 1946) is an American singer and actress."
    );

    // 最大的可用图片跳过了空地址的 mega
    assert_eq!(
        artist.images.largest().map(|v| v.size),
        Some(ImageSize::Large)
    );

    assert_eq!(
        transport.calls()[0],
        (
            "artist.getinfo".to_string(),
            vec![(
                "mbid".to_string(),
                "bfcc6d75-a6a5-4bc6-8282-47aec8531818".to_string()
            )]
        )
    );
}

#[test_log::test(tokio::test)]
async fn test_artist_albums_page_two() {
    let (client, transport) = client(FixtureTransport::standard());
    let page = client
        .get_artist_albums("bfcc6d75-a6a5-4bc6-8282-47aec8531818", 2, 12)
        .await
        .unwrap();

    assert_eq!(page.info.page, 2);
    assert_eq!(page.info.per_page, 12);
    assert_eq!(page.info.total, 50);
    assert_eq!(page.info.total_pages, 5);
    assert_eq!(page.info.artist.as_deref(), Some("Cher"));
    assert!(page.info.has_next());
    assert!(page.info.has_previous());

    assert_eq!(page.items.len(), 3);
    assert_eq!(page.items[0].rank, Some(13));
    assert_eq!(page.items[0].artist.as_deref(), Some("Cher"));
    assert_eq!(page.items[1].mbid, "");
    // 没有 mbid 键的专辑与空 mbid 相同，不会让整页失败
    assert_eq!(page.items[2].name, "The Very Best of Cher");
    assert_eq!(page.items[2].mbid, "");
    assert_eq!(page.items[2].rank, Some(15));

    let (_, params) = &transport.calls()[0];
    assert!(params.contains(&("page".to_string(), "2".to_string())));
    assert!(params.contains(&("limit".to_string(), "12".to_string())));
}

#[test_log::test(tokio::test)]
async fn test_album_info_from_fixture() {
    let (client, _) = client(FixtureTransport::standard());
    let album = client
        .get_album_info("63b3a8ca-26f2-4e2b-b867-647a6ec2bebd")
        .await
        .unwrap();

    assert_eq!(album.name, "Believe");
    assert_eq!(album.artist.as_deref(), Some("Cher"));
    assert_eq!(album.stats.as_ref().and_then(|s| s.playcount), Some(2_790_374));

    let tracks = album.tracks.as_ref().unwrap();
    assert_eq!(
        tracks.iter().map(|t| t.rank).collect::<Vec<_>>(),
        vec![Some(1), Some(2), Some(3)]
    );
    assert_eq!(tracks[0].formatted_duration().as_deref(), Some("3:59"));
    assert_eq!(tracks[2].duration, None);

    let wiki = album.wiki.as_ref().unwrap();
    assert_eq!(
        wiki.summary_text(),
        "Believe is the twenty-second studio album by American singer-actress Cher."
    );
}

#[test_log::test(tokio::test)]
async fn test_album_without_wiki_and_single_track() {
    let transport =
        FixtureTransport::standard().route("album.getInfo", 200, "album_info_minimal.json");
    let (client, _) = client(transport);
    let album = client.get_album_info("0c022aa0").await.unwrap();

    assert!(album.wiki.is_none());
    assert!(album.tags.is_none());
    assert!(album.images.is_empty());
    let tracks = album.tracks.unwrap();
    assert_eq!(tracks.len(), 1);
    assert_eq!(tracks[0].name, "Woman's World");
}

#[test_log::test(tokio::test)]
async fn test_search_from_fixtures() {
    let (client, transport) = client(FixtureTransport::standard());

    let tracks = client.search_tracks("believe").await.unwrap();
    assert_eq!(tracks.len(), 2);
    assert_eq!(tracks[0].artist.name, "Cher");
    assert!(tracks[0].artist.mbid.is_none());
    assert!(tracks[0].streamable.is_none());
    assert!(tracks[1].mbid.is_none());

    let albums = client.search_albums("believe").await.unwrap();
    assert_eq!(albums.len(), 2);
    assert_eq!(albums[1].artist.as_deref(), Some("Justin Bieber"));
    assert_eq!(albums[0].streamable, Some(false));

    let methods: Vec<String> = transport.calls().into_iter().map(|(m, _)| m).collect();
    assert_eq!(methods, vec!["track.search", "album.search"]);
}

#[test_log::test(tokio::test)]
async fn test_invalid_key_with_success_status() {
    let transport =
        FixtureTransport::standard().route("chart.getTopArtists", 200, "error_invalid_key.json");
    let (client, _) = client(transport);

    match client.get_top_artists().await.unwrap_err() {
        ShowcaseError::Service {
            operation,
            kind,
            message,
        } => {
            assert_eq!(operation, "chart.getTopArtists");
            assert_eq!(kind, ErrorKind::Api);
            assert!(message.contains("Invalid API key"), "{message}");
        }
        other => panic!("期望 Service 错误，实际为 {other:?}"),
    }
}

#[test_log::test(tokio::test)]
async fn test_not_found_status_feeds_detail_store() {
    let transport = FixtureTransport::standard().route("album.getInfo", 404, "error_not_found.json");
    let showcase = ArtistShowcase::with_provider(Arc::new(client(transport).0));

    let store: DetailStore<Album> = DetailStore::new();
    assert!(!store.load_album(showcase.catalog(), "missing").await);
    assert!(store.is_not_found());
    let error = store.snapshot().error.unwrap();
    assert!(error.contains("Album not found"), "{error}");
}

#[test_log::test(tokio::test)]
async fn test_load_home_fills_both_lists() {
    let showcase = ArtistShowcase::with_provider(Arc::new(client(FixtureTransport::standard()).0));
    let artists = ListStore::new();
    let tracks = ListStore::new();

    assert!(showcase.load_home(&artists, &tracks).await);
    assert_eq!(artists.snapshot().items.len(), 3);
    assert_eq!(tracks.snapshot().items.len(), 2);
    assert!(!artists.snapshot().loading);
}

#[test_log::test(tokio::test)]
async fn test_load_home_partial_failure() {
    let transport = FixtureTransport::standard().route("chart.getTopTracks", 500, "error_invalid_key.json");
    let showcase = ArtistShowcase::with_provider(Arc::new(client(transport).0));
    let artists = ListStore::new();
    let tracks = ListStore::new();

    assert!(!showcase.load_home(&artists, &tracks).await);
    assert_eq!(artists.snapshot().items.len(), 3);
    let tracks = tracks.snapshot();
    assert!(tracks.items.is_empty());
    assert!(tracks.error.unwrap().contains("Invalid API key"));
}

#[test_log::test(tokio::test)]
async fn test_service_calls_are_idempotent() {
    let (client, transport) = client(FixtureTransport::standard());

    let first = client.get_album_info("m").await.unwrap();
    let second = client.get_album_info("m").await.unwrap();
    assert_eq!(first, second);

    let first = client.get_artist_albums("bfcc", 2, 12).await.unwrap();
    let second = client.get_artist_albums("bfcc", 2, 12).await.unwrap();
    assert_eq!(first, second);

    assert_eq!(transport.calls().len(), 4);
}

#[test]
fn test_normalization_is_idempotent() {
    let raw = load_test_data("album_info.json")["album"].clone();
    let first = normalize_album(raw.clone()).unwrap();
    let second = normalize_album(raw).unwrap();
    assert_eq!(first, second);

    let raw = load_test_data("artist_info.json")["artist"].clone();
    assert_eq!(
        normalize_artist(raw.clone()).unwrap(),
        normalize_artist(raw).unwrap()
    );
}

#[test]
fn test_image_resolution_matches_raw_lookup() {
    let data = load_test_data("top_artists.json");
    for raw_artist in data["artists"]["artist"].as_array().unwrap() {
        let images = normalize_images(&raw_artist["image"]);
        for size in [
            ImageSize::Small,
            ImageSize::Medium,
            ImageSize::Large,
            ImageSize::ExtraLarge,
            ImageSize::Mega,
        ] {
            assert_eq!(
                images.url(size).map(str::to_string),
                resolve_image_url(size, &raw_artist["image"])
            );
        }
    }
}
