//! Human-readable summaries of fetched documents.
//!
//! Each kind has its own layout. All lookups are defensive: a document that
//! passed validation can still be missing any nested field, and the printer
//! must not fail on that.

use std::io::{self, Write};

use chrono::{Local, NaiveDate};
use serde_json::Value;

use crate::documents::DocumentKind;
use crate::documents::lookup::items;
use crate::documents::stats::item_counts;

mod listings;
mod transportation;
mod weather;

/// Write the summary for `kind`, using today's local date for "upcoming"
pub fn write_summary(kind: DocumentKind, document: &Value, out: &mut dyn Write) -> io::Result<()> {
    write_summary_on(kind, document, Local::now().date_naive(), out)
}

/// Write the summary for `kind` as of `today`
pub fn write_summary_on(
    kind: DocumentKind,
    document: &Value,
    today: NaiveDate,
    out: &mut dyn Write,
) -> io::Result<()> {
    match kind {
        DocumentKind::Accommodations => listings::accommodations(document, out),
        DocumentKind::Events => listings::events(document, today, out),
        DocumentKind::Pois => listings::pois(document, out),
        DocumentKind::Restaurants => listings::restaurants(document, out),
        DocumentKind::Transportation => transportation::write(document, out),
        DocumentKind::Weather => weather::write(document, out),
    }
}

/// Summary as a string, mostly for tests and logging
#[must_use]
pub fn render_summary(kind: DocumentKind, document: &Value, today: NaiveDate) -> String {
    let mut buffer = Vec::new();
    // writing into a Vec cannot fail
    let _ = write_summary_on(kind, document, today, &mut buffer);
    String::from_utf8_lossy(&buffer).into_owned()
}

/// Number of records reported in the final success line
#[must_use]
pub fn record_count(kind: DocumentKind, document: &Value) -> usize {
    match kind.list_requirement() {
        Some(list) => items(document, &[list.key]).len(),
        None if kind == DocumentKind::Transportation => {
            item_counts(document).iter().map(|(_, count)| count).sum()
        }
        None => 1,
    }
}

/// Noun used for `record_count` in the success line
#[must_use]
pub fn record_noun(kind: DocumentKind) -> &'static str {
    match kind {
        DocumentKind::Accommodations => "accommodations",
        DocumentKind::Events => "events",
        DocumentKind::Pois => "POIs",
        DocumentKind::Restaurants => "restaurants",
        DocumentKind::Transportation => "transportation items",
        DocumentKind::Weather => "weather report",
    }
}

pub(crate) fn rule(ch: char, width: usize) -> String {
    std::iter::repeat_n(ch, width).collect()
}

pub(crate) fn banner(out: &mut dyn Write, title: &str, width: usize) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", rule('=', width))?;
    writeln!(out, "{title}")?;
    writeln!(out, "{}", rule('=', width))
}

pub(crate) fn section(out: &mut dyn Write, title: &str) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", rule('-', 50))?;
    writeln!(out, "{title}")?;
    writeln!(out, "{}", rule('-', 50))
}

/// "walking_paths" -> "Walking Paths"
pub(crate) fn title_case(key: &str) -> String {
    key.split('_')
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars.flat_map(char::to_lowercase)).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<String>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("taxi_car_services"), "Taxi Car Services");
        assert_eq!(title_case("walking_paths"), "Walking Paths");
    }

    #[test]
    fn test_no_kind_fails_on_minimal_documents() {
        let minimal = json!({
            "metadata": {},
            "accommodations": [{}],
            "events": [{}],
            "points_of_interest": [{}],
            "restaurants": [{}],
            "transportation_options": [{}],
            "current_conditions": {}
        });
        for kind in DocumentKind::ALL {
            let rendered = render_summary(kind, &minimal, today());
            assert!(!rendered.is_empty(), "{kind} rendered nothing");
        }
    }

    #[test]
    fn test_no_kind_fails_on_wrongly_typed_fields() {
        let odd = json!({
            "metadata": "yesterday",
            "accommodations": [{"type": 3, "ratings": [], "pricing": "cheap"}],
            "events": [{"category": "Music", "schedule": null}],
            "points_of_interest": [{"popularity": "high"}],
            "restaurants": [{"ratings": 4}],
            "transportation_options": [{"pricing": {"passes": "see website"}}],
            "parking_options": [{"capacity": null}],
            "current_conditions": {"temperature": "warm"},
            "daily_forecast": {"days": [{"summary": 12}]},
            "weather_alerts": {"active_alerts": [{"severity": null}]}
        });
        for kind in DocumentKind::ALL {
            render_summary(kind, &odd, today());
        }
    }

    #[test]
    fn test_record_count() {
        let doc = json!({
            "events": [{}, {}, {}],
            "transportation_options": [{}, {}],
            "parking_options": [{}]
        });
        assert_eq!(record_count(DocumentKind::Events, &doc), 3);
        assert_eq!(record_count(DocumentKind::Transportation, &doc), 3);
        assert_eq!(record_count(DocumentKind::Weather, &doc), 1);
        assert_eq!(record_count(DocumentKind::Pois, &doc), 0);
    }
}
