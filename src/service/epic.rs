use crate::models::{EpicImage, EPIC_ARCHIVE_URL};
use chrono::{Datelike, NaiveDate};

/// Archive URL of the full-resolution PNG for an EPIC image taken on `date`.
pub fn epic_image_url(date: NaiveDate, image: &str) -> String {
    format!(
        "{}/{:04}/{:02}/{:02}/png/{}.png",
        EPIC_ARCHIVE_URL,
        date.year(),
        date.month(),
        date.day(),
        image
    )
}

/// Attaches the archive URL to each image of one day.
pub fn epic_with_urls(images: Vec<EpicImage>, date: NaiveDate) -> Vec<EpicImage> {
    images
        .into_iter()
        .map(|mut img| {
            img.image_url = Some(epic_image_url(date, &img.image));
            img
        })
        .collect()
}
