use crate::api::NasaClient;
use crate::models::{
    AiInsights, ItemData, ItemLink, LibraryPhoto, LibraryVideo, PhotoPage, SearchItem,
    SearchResponse,
};
use futures::future::join_all;
use rand::seq::SliceRandom;
use rand::Rng;
use tracing::{debug, error, info};

/// Stand-in used when a video has no thumbnail or its manifest can't be read.
pub const PLACEHOLDER_VIDEO: &str = "/placeholder-video.jpg";

/// Searches run when the caller gives no query.
pub const DEFAULT_PHOTO_QUERY: &str = "apollo";
pub const DEFAULT_VIDEO_QUERY: &str = "space exploration";

/// Picks the image to show for a library item.
///
/// Preference: a link rendered as an image or marked as a preview, then a
/// `self` link to a `.jpg`, then a `self` link to a `.png`.
pub fn thumbnail_url(links: &[ItemLink]) -> Option<&str> {
    let is_self_with = |link: &&ItemLink, ext: &str| {
        link.rel.as_deref() == Some("self") && link.href.ends_with(ext)
    };

    links
        .iter()
        .find(|l| l.render.as_deref() == Some("image") || l.rel.as_deref() == Some("preview"))
        .or_else(|| links.iter().find(|l| is_self_with(l, ".jpg")))
        .or_else(|| links.iter().find(|l| is_self_with(l, ".png")))
        .map(|l| l.href.as_str())
}

fn photo_from_item(item: &SearchItem) -> Option<LibraryPhoto> {
    let thumbnail = thumbnail_url(&item.links)?;
    let data = item.data.first().cloned().unwrap_or_default();

    Some(LibraryPhoto {
        nasa_id: data.nasa_id.unwrap_or_else(|| "unknown".to_string()),
        title: data.title.unwrap_or_else(|| "Untitled".to_string()),
        description: data
            .description
            .unwrap_or_else(|| "No description available".to_string()),
        date_created: data.date_created.unwrap_or_default(),
        center: data.center.unwrap_or_else(|| "Unknown".to_string()),
        photographer: data.photographer.unwrap_or_default(),
        keywords: data.keywords.unwrap_or_default(),
        thumbnail_url: thumbnail.to_string(),
        ai_insights: AiInsights::default(),
    })
}

/// Flattens an image search into the `/api/nasa-photos` body. Items without a
/// usable image are dropped.
pub fn library_photos(response: &SearchResponse) -> PhotoPage {
    let photos: Vec<LibraryPhoto> = response.items().iter().filter_map(photo_from_item).collect();
    debug!(
        "Returning {} valid photos out of {} items",
        photos.len(),
        response.items().len()
    );

    PhotoPage {
        photos,
        total_hits: response.total_hits(),
    }
}

/// Chooses the playable file from an asset manifest: the first `.mp4` that is
/// not a thumbnail rendition, else the first `.mov` or `.webm`.
pub fn pick_manifest_video(files: &[String]) -> Option<&str> {
    files
        .iter()
        .find(|f| f.ends_with(".mp4") && !f.contains("~thumb"))
        .or_else(|| {
            files
                .iter()
                .find(|f| f.ends_with(".mov") || f.ends_with(".webm"))
        })
        .map(String::as_str)
}

fn video_from_item(data: ItemData, links: &[ItemLink], video_url: String) -> LibraryVideo {
    let thumbnail = links
        .iter()
        .find(|l| l.render.as_deref() == Some("image"))
        .map(|l| l.href.clone())
        .unwrap_or_else(|| PLACEHOLDER_VIDEO.to_string());

    LibraryVideo {
        id: data.nasa_id.unwrap_or_default(),
        title: data.title.unwrap_or_default(),
        description: data
            .description
            .filter(|d| !d.is_empty())
            .unwrap_or_else(|| "No description available".to_string()),
        date_created: data.date_created.unwrap_or_default(),
        keywords: data.keywords.unwrap_or_default(),
        thumbnail,
        video_url,
        duration: data.duration.unwrap_or_else(|| "Unknown".to_string()),
        center: data.center.unwrap_or_else(|| "NASA".to_string()),
        photographer: data.photographer.unwrap_or_else(|| "NASA".to_string()),
        location: data.location.unwrap_or_else(|| "Space".to_string()),
    }
}

/// Resolves the direct video URL of one item through its asset manifest.
///
/// No manifest link gives an empty URL; a failed fetch gives the placeholder.
async fn resolve_video_url(client: &NasaClient, item: &SearchItem) -> String {
    let Some(manifest_url) = item.href.as_deref() else {
        return String::new();
    };

    match client.get_asset_manifest(manifest_url).await {
        Ok(files) => pick_manifest_video(&files).unwrap_or_default().to_string(),
        Err(e) => {
            let nasa_id = item
                .data
                .first()
                .and_then(|d| d.nasa_id.as_deref())
                .unwrap_or("unknown");
            error!("Error fetching video manifest for {}: {}", nasa_id, e);
            PLACEHOLDER_VIDEO.to_string()
        },
    }
}

/// Maps a video search to playable entries, fetching every manifest concurrently.
pub async fn resolve_videos(client: &NasaClient, response: SearchResponse) -> Vec<LibraryVideo> {
    let items = response.into_items();
    let urls = join_all(items.iter().map(|item| resolve_video_url(client, item))).await;

    let videos: Vec<LibraryVideo> = items
        .into_iter()
        .zip(urls)
        .map(|(item, url)| {
            let data = item.data.into_iter().next().unwrap_or_default();
            video_from_item(data, &item.links, url)
        })
        .collect();

    if let Some(first) = videos.first() {
        info!("Sample video URL: {}", first.video_url);
    }
    videos
}

/// One photo chosen uniformly from a page, for "surprise me" style features.
pub fn random_photo<R: Rng + ?Sized>(page: &PhotoPage, rng: &mut R) -> Option<LibraryPhoto> {
    page.photos.choose(rng).cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Collection, CollectionMetadata};
    use mockito::Server;
    use rand::{rngs::StdRng, SeedableRng};
    use rstest::rstest;
    use std::time::Duration;

    fn link(href: &str, rel: Option<&str>, render: Option<&str>) -> ItemLink {
        ItemLink {
            href: href.to_string(),
            rel: rel.map(str::to_string),
            render: render.map(str::to_string),
        }
    }

    fn item(nasa_id: &str, links: Vec<ItemLink>, href: Option<String>) -> SearchItem {
        SearchItem {
            href,
            data: vec![ItemData {
                nasa_id: Some(nasa_id.to_string()),
                title: Some(format!("Title {nasa_id}")),
                ..ItemData::default()
            }],
            links,
        }
    }

    fn response(items: Vec<SearchItem>, total_hits: u64) -> SearchResponse {
        SearchResponse {
            collection: Some(Collection {
                items,
                metadata: Some(CollectionMetadata { total_hits }),
            }),
        }
    }

    #[rstest]
    #[case(vec![link("a.jpg", Some("self"), None), link("p.jpg", Some("preview"), None)], Some("p.jpg"))]
    #[case(vec![link("r.jpg", None, Some("image"))], Some("r.jpg"))]
    #[case(vec![link("b.png", Some("self"), None), link("a.jpg", Some("self"), None)], Some("a.jpg"))]
    #[case(vec![link("b.png", Some("self"), None)], Some("b.png"))]
    #[case(vec![link("c.tif", Some("self"), None), link("d.jpg", Some("alternate"), None)], None)]
    #[case(vec![], None)]
    fn thumbnail_preference(#[case] links: Vec<ItemLink>, #[case] expected: Option<&str>) {
        assert_eq!(thumbnail_url(&links), expected);
    }

    #[test]
    fn photos_without_thumbnail_are_dropped() {
        let page = library_photos(&response(
            vec![
                item("keep", vec![link("k.jpg", Some("preview"), None)], None),
                item("drop", vec![], None),
            ],
            120,
        ));

        assert_eq!(page.total_hits, 120);
        assert_eq!(page.photos.len(), 1);
        assert_eq!(page.photos[0].nasa_id, "keep");
        assert_eq!(page.photos[0].thumbnail_url, "k.jpg");
    }

    #[test]
    fn missing_photo_fields_get_defaults() {
        let bare = SearchItem {
            href: None,
            data: Vec::new(),
            links: vec![link("x.jpg", Some("preview"), None)],
        };
        let page = library_photos(&response(vec![bare], 1));
        let photo = &page.photos[0];

        assert_eq!(photo.nasa_id, "unknown");
        assert_eq!(photo.title, "Untitled");
        assert_eq!(photo.description, "No description available");
        assert_eq!(photo.center, "Unknown");
        assert!(photo.photographer.is_empty());
        assert!(photo.keywords.is_empty());
        assert_eq!(photo.ai_insights, AiInsights::default());
    }

    #[test]
    fn unexpected_shape_yields_empty_page() {
        let page = library_photos(&SearchResponse::default());
        assert_eq!(page, PhotoPage::default());
    }

    #[rstest]
    #[case(&["a~thumb.mp4", "a~orig.mp4", "a.mov"], Some("a~orig.mp4"))]
    #[case(&["a~thumb.mp4", "a.webm"], Some("a.webm"))]
    #[case(&["a.jpg", "a.mov"], Some("a.mov"))]
    #[case(&["a~thumb.mp4", "a.srt"], None)]
    #[case(&[], None)]
    fn manifest_video_choice(#[case] files: &[&str], #[case] expected: Option<&str>) {
        let files: Vec<String> = files.iter().map(|f| f.to_string()).collect();
        assert_eq!(pick_manifest_video(&files), expected);
    }

    #[test]
    fn random_photo_comes_from_the_page() {
        let page = library_photos(&response(
            vec![
                item("a", vec![link("a.jpg", Some("preview"), None)], None),
                item("b", vec![link("b.jpg", Some("preview"), None)], None),
            ],
            2,
        ));
        let mut rng = StdRng::seed_from_u64(7);
        let chosen = random_photo(&page, &mut rng).unwrap();
        assert!(["a", "b"].contains(&chosen.nasa_id.as_str()));
        assert!(random_photo(&PhotoPage::default(), &mut rng).is_none());
    }

    #[tokio::test]
    async fn videos_resolve_through_manifests() {
        let mut server = Server::new_async().await;
        let _ok = server
            .mock("GET", "/ok/collection.json")
            .with_status(200)
            .with_body(r#"["http://v/ok~thumb.mp4","http://v/ok~orig.mp4"]"#)
            .create_async()
            .await;
        let _broken = server
            .mock("GET", "/broken/collection.json")
            .with_status(500)
            .create_async()
            .await;

        let client = NasaClient::with_base_urls(
            "k".to_string(),
            &server.url(),
            &server.url(),
            Duration::from_secs(5),
        )
        .unwrap();

        let search = response(
            vec![
                item(
                    "ok",
                    vec![link("http://v/ok.jpg", None, Some("image"))],
                    Some(format!("{}/ok/collection.json", server.url())),
                ),
                item(
                    "broken",
                    vec![],
                    Some(format!("{}/broken/collection.json", server.url())),
                ),
                item("no-manifest", vec![], None),
            ],
            3,
        );

        let videos = resolve_videos(&client, search).await;

        assert_eq!(videos.len(), 3);
        assert_eq!(videos[0].id, "ok");
        assert_eq!(videos[0].video_url, "http://v/ok~orig.mp4");
        assert_eq!(videos[0].thumbnail, "http://v/ok.jpg");
        assert_eq!(videos[1].video_url, PLACEHOLDER_VIDEO);
        assert_eq!(videos[1].thumbnail, PLACEHOLDER_VIDEO);
        assert_eq!(videos[2].video_url, "");
        assert_eq!(videos[2].description, "No description available");
        assert_eq!(videos[2].center, "NASA");
        assert_eq!(videos[2].location, "Space");
        assert_eq!(videos[2].duration, "Unknown");
    }
}
