//! Terminal rendering for command results.
//!
//! Every builder returns a `comfy_table::Table` (or a `String`) so the output
//! can be checked in tests; printing happens in `commands`.

use crate::models::{
    Apod, EpicImage, LibraryPhoto, LibraryVideo, MarsPhoto, NeoDaySummary, NeoFeed,
};
use colored::*;
use comfy_table::{presets::UTF8_FULL, Cell, Color, ContentArrangement, Table};

/// Longest text shown in a single table cell before it is cut.
const MAX_CELL_CHARS: usize = 60;

fn new_table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header.iter().map(|h| Cell::new(h).fg(Color::Cyan)));
    table
}

/// Cuts `text` to `max` characters, marking the cut with `...`.
pub fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let cut: String = text.chars().take(max.saturating_sub(3)).collect();
    format!("{}...", cut.trim_end())
}

fn hazard_cell(hazardous: bool) -> Cell {
    if hazardous {
        Cell::new("yes").fg(Color::Red)
    } else {
        Cell::new("no").fg(Color::Green)
    }
}

fn km(value: Option<f64>) -> String {
    value.map(|v| format!("{v:.3}")).unwrap_or_else(|| "-".to_string())
}

pub fn apod_view(apod: &Apod) -> String {
    let mut out = format!("{}\n{}\n", apod.title.bold().cyan(), apod.date.dimmed());
    if let Some(copyright) = &apod.copyright {
        out.push_str(&format!("(c) {}\n", copyright.trim()));
    }
    let kind = if apod.is_video() { "Video" } else { "Image" };
    if let Some(url) = apod.display_url() {
        out.push_str(&format!("{}: {}\n", kind.bold(), url));
    }
    out.push('\n');
    out.push_str(&apod.explanation);
    out
}

pub fn apod_table(entries: &[Apod]) -> Table {
    let mut table = new_table(&["Date", "Title", "Type", "URL"]);
    for apod in entries {
        table.add_row(vec![
            Cell::new(&apod.date),
            Cell::new(truncate(&apod.title, MAX_CELL_CHARS)),
            Cell::new(&apod.media_type),
            Cell::new(apod.display_url().unwrap_or("-")),
        ]);
    }
    table
}

pub fn mars_table(photos: &[MarsPhoto]) -> Table {
    let mut table = new_table(&["ID", "Sol", "Earth date", "Camera", "Image"]);
    for photo in photos {
        table.add_row(vec![
            Cell::new(photo.id),
            Cell::new(photo.sol),
            Cell::new(&photo.earth_date),
            Cell::new(&photo.camera.name),
            Cell::new(&photo.img_src),
        ]);
    }
    table
}

/// One row per object, grouped by close-approach date.
pub fn neo_table(feed: &NeoFeed) -> Table {
    let mut table = new_table(&[
        "Date",
        "Name",
        "Hazardous",
        "Diameter (km)",
        "Miss distance (km)",
    ]);
    for (date, objects) in &feed.near_earth_objects {
        for neo in objects {
            table.add_row(vec![
                Cell::new(date),
                Cell::new(&neo.name),
                hazard_cell(neo.is_potentially_hazardous_asteroid),
                Cell::new(km(neo.mean_diameter_km())),
                Cell::new(
                    neo.miss_distance_km()
                        .map(|d| format!("{d:.0}"))
                        .unwrap_or_else(|| "-".to_string()),
                ),
            ]);
        }
    }
    table
}

pub fn neo_summary_table(days: &[NeoDaySummary]) -> Table {
    let mut table = new_table(&["Date", "Total", "Hazardous", "Non-hazardous"]);
    for day in days {
        let hazardous = Cell::new(day.hazardous);
        table.add_row(vec![
            Cell::new(&day.date),
            Cell::new(day.total),
            if day.hazardous > 0 {
                hazardous.fg(Color::Red)
            } else {
                hazardous
            },
            Cell::new(day.non_hazardous),
        ]);
    }
    table
}

pub fn epic_table(images: &[EpicImage]) -> Table {
    let mut table = new_table(&["Taken", "Centroid (lat, lon)", "Image"]);
    for image in images {
        let centroid = image
            .centroid_coordinates
            .as_ref()
            .map(|c| format!("{:.2}, {:.2}", c.lat, c.lon))
            .unwrap_or_else(|| "-".to_string());
        table.add_row(vec![
            Cell::new(&image.date),
            Cell::new(centroid),
            Cell::new(image.image_url.as_deref().unwrap_or(&image.image)),
        ]);
    }
    table
}

pub fn photo_table(photos: &[LibraryPhoto]) -> Table {
    let mut table = new_table(&["NASA ID", "Title", "Center", "Created", "Thumbnail"]);
    for photo in photos {
        table.add_row(vec![
            Cell::new(&photo.nasa_id),
            Cell::new(truncate(&photo.title, MAX_CELL_CHARS)),
            Cell::new(&photo.center),
            Cell::new(photo.date_created.get(..10).unwrap_or(&photo.date_created)),
            Cell::new(&photo.thumbnail_url),
        ]);
    }
    table
}

pub fn photo_view(photo: &LibraryPhoto) -> String {
    let mut out = format!("{}\n", photo.title.bold().cyan());
    out.push_str(&format!("{} {}\n", "NASA ID:".bold(), photo.nasa_id));
    out.push_str(&format!("{} {}\n", "Center:".bold(), photo.center));
    if !photo.photographer.is_empty() {
        out.push_str(&format!("{} {}\n", "Photographer:".bold(), photo.photographer));
    }
    out.push_str(&format!("{} {}\n", "Image:".bold(), photo.thumbnail_url));
    if !photo.keywords.is_empty() {
        out.push_str(&format!("{} {}\n", "Keywords:".bold(), photo.keywords.join(", ")));
    }
    out.push('\n');
    out.push_str(&photo.description);
    out
}

pub fn video_table(videos: &[LibraryVideo]) -> Table {
    let mut table = new_table(&["NASA ID", "Title", "Center", "Video"]);
    for video in videos {
        let url = if video.video_url.is_empty() {
            Cell::new("unavailable").fg(Color::DarkGrey)
        } else {
            Cell::new(&video.video_url)
        };
        table.add_row(vec![
            Cell::new(&video.id),
            Cell::new(truncate(&video.title, MAX_CELL_CHARS)),
            Cell::new(&video.center),
            url,
        ]);
    }
    table
}
