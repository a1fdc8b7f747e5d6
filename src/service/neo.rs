use crate::models::{NeoDaySummary, NeoFeed};

/// Hazardous vs. non-hazardous counts for each day of the feed, oldest first.
pub fn neo_daily_summary(feed: &NeoFeed) -> Vec<NeoDaySummary> {
    feed.near_earth_objects
        .iter()
        .map(|(date, objects)| {
            let hazardous = objects
                .iter()
                .filter(|o| o.is_potentially_hazardous_asteroid)
                .count();
            NeoDaySummary {
                date: date.clone(),
                total: objects.len(),
                hazardous,
                non_hazardous: objects.len() - hazardous,
            }
        })
        .collect()
}
