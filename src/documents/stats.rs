//! Figures derived from a document for the summary: category and season
//! distributions, the next upcoming events and transportation item counts.

use chrono::NaiveDate;
use serde_json::Value;

use super::lookup::{at, display_or, items, text_or};

/// Transportation collections counted in the summary, in display order
pub const TRANSPORTATION_COLLECTIONS: [&str; 6] = [
    "transportation_options",
    "parking_options",
    "walking_paths",
    "taxi_car_services",
    "rental_options",
    "recommended_itineraries",
];

/// One row of an upcoming-events listing
#[derive(Debug, Clone, PartialEq)]
pub struct UpcomingEvent {
    pub name: String,
    pub date: String,
    pub category: String,
    pub is_free: bool,
}

/// Count `items` by the string at `path`, most frequent first.
///
/// Missing values count as `Unknown`. Ties keep first-seen order.
#[must_use]
pub fn distribution(items: &[Value], path: &[&str]) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for item in items {
        let key = text_or(item, path, "Unknown");
        match counts.iter_mut().find(|(existing, _)| *existing == key) {
            Some((_, count)) => *count += 1,
            None => counts.push((key, 1)),
        }
    }
    // stable sort keeps insertion order for equal counts
    counts.sort_by(|a, b| b.1.cmp(&a.1));
    counts
}

/// Distribution of `category.primary` across a document's main list
#[must_use]
pub fn category_distribution(document: &Value, list_key: &str) -> Vec<(String, usize)> {
    distribution(items(document, &[list_key]), &["category", "primary"])
}

/// Distribution of events by `schedule.typical_schedule.season`
#[must_use]
pub fn season_distribution(document: &Value) -> Vec<(String, usize)> {
    distribution(
        items(document, &["events"]),
        &["schedule", "typical_schedule", "season"],
    )
}

/// Events whose next occurrence starts on or after `today`, soonest first.
///
/// Dates are compared as ISO strings, the way the model writes them.
#[must_use]
pub fn upcoming_events(document: &Value, today: NaiveDate, limit: usize) -> Vec<UpcomingEvent> {
    let today = today.format("%Y-%m-%d").to_string();

    let mut upcoming: Vec<UpcomingEvent> = items(document, &["events"])
        .iter()
        .filter_map(|event| {
            let date = at(event, &["schedule", "next_occurrence", "start_date"])?
                .as_str()
                .filter(|date| !date.is_empty())?;
            if date < today.as_str() {
                return None;
            }
            Some(UpcomingEvent {
                name: display_or(event.get("name"), "None"),
                date: date.to_string(),
                category: display_or(at(event, &["category", "primary"]), "None"),
                is_free: at(event, &["tickets_pricing", "is_free"])
                    .and_then(Value::as_bool)
                    .unwrap_or(false),
            })
        })
        .collect();

    upcoming.sort_by(|a, b| a.date.cmp(&b.date));
    upcoming.truncate(limit);
    upcoming
}

/// Sizes of the transportation collections; missing ones count as zero
#[must_use]
pub fn item_counts(document: &Value) -> Vec<(&'static str, usize)> {
    TRANSPORTATION_COLLECTIONS
        .iter()
        .map(|key| (*key, items(document, &[*key]).len()))
        .collect()
}
