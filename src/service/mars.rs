use crate::models::{MarsPhoto, MarsPhotoPage, MarsPhotosResponse};
use std::collections::HashSet;
use tracing::debug;

/// Drops repeated photo ids, keeping the first occurrence and the original order.
pub fn dedup_photos(photos: Vec<MarsPhoto>) -> Vec<MarsPhoto> {
    let mut seen = HashSet::with_capacity(photos.len());
    photos.into_iter().filter(|p| seen.insert(p.id)).collect()
}

/// Builds the `/api/mars-photos` body from one upstream page.
///
/// `total` is NASA's `total_photos` when it is sent, otherwise the number of
/// unique photos on this page.
pub fn mars_photo_page(response: MarsPhotosResponse, page: u32, limit: u32) -> MarsPhotoPage {
    let received = response.photos.len();
    let photos = dedup_photos(response.photos);
    debug!(
        "Found {} unique photos out of {} total photos",
        photos.len(),
        received
    );

    let total = response.total_photos.unwrap_or(photos.len() as u64);
    MarsPhotoPage {
        photos,
        total,
        page,
        limit,
    }
}
