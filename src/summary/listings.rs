//! Layouts for the ranked-list documents: accommodations, events, POIs
//! and restaurants.

use std::io::{self, Write};

use chrono::NaiveDate;
use serde_json::Value;

use super::{banner, rule};
use crate::documents::lookup::{at, items, text, text_or};
use crate::documents::stats::{category_distribution, season_distribution, upcoming_events};

fn totals(document: &Value, out: &mut dyn Write) -> io::Result<()> {
    writeln!(out, "Total results: {}", text(document, &["metadata", "total_results"]))?;
    writeln!(out, "Generated at: {}", text(document, &["metadata", "generated_at"]))
}

fn distribution_block(out: &mut dyn Write, title: &str, rows: &[(String, usize)]) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{title}:")?;
    for (name, count) in rows {
        writeln!(out, "  {name}: {count}")?;
    }
    Ok(())
}

fn heading(out: &mut dyn Write, title: &str) -> io::Result<()> {
    writeln!(out)?;
    writeln!(out, "{}", rule('-', 70))?;
    writeln!(out, "{title}")?;
    writeln!(out, "{}", rule('-', 70))
}

fn rank(item: &Value) -> String {
    text_or(item, &["rank"], "?")
}

pub(super) fn accommodations(document: &Value, out: &mut dyn Write) -> io::Result<()> {
    banner(out, "RIOMAGGIORE ACCOMMODATIONS SUMMARY", 60)?;
    totals(document, out)?;
    writeln!(out, "{}", rule('-', 60))?;

    for acc in items(document, &["accommodations"]) {
        writeln!(out, "#{}: {}", rank(acc), text_or(acc, &["name"], "Unknown"))?;
        writeln!(
            out,
            "    Type: {} | Rating: {}/5 | Avg Price: €{}/night",
            text_or(acc, &["type", "category"], "Unknown"),
            text(acc, &["ratings", "average_rating"]),
            text(acc, &["pricing", "average_nightly_rate"]),
        )?;
        writeln!(out)?;
    }
    Ok(())
}

pub(super) fn events(document: &Value, today: NaiveDate, out: &mut dyn Write) -> io::Result<()> {
    banner(out, "RIOMAGGIORE EVENTS SUMMARY", 70)?;
    totals(document, out)?;

    distribution_block(out, "Category Distribution", &category_distribution(document, "events"))?;
    distribution_block(out, "Season Distribution", &season_distribution(document))?;

    heading(out, "NEXT 5 UPCOMING EVENTS:")?;
    for event in upcoming_events(document, today, 5) {
        let free_label = if event.is_free { "FREE" } else { "TICKETED" };
        writeln!(
            out,
            "  {}: {} ({}) [{free_label}]",
            event.date, event.name, event.category
        )?;
    }

    heading(out, "ALL EVENTS:")?;
    for event in items(document, &["events"]) {
        // an event without pricing info is assumed free
        let is_free = at(event, &["tickets_pricing", "is_free"])
            .and_then(Value::as_bool)
            .unwrap_or(true);
        let free_label = if is_free { "Free" } else { "Ticketed" };

        writeln!(out, "#{:>2}: {}", rank(event), text_or(event, &["name"], "Unknown"))?;
        writeln!(
            out,
            "     Date: {} | Type: {} | {}",
            text_or(event, &["schedule", "next_occurrence", "start_date"], "TBD"),
            text_or(event, &["schedule", "event_type"], "Unknown"),
            text_or(event, &["category", "primary"], "Unknown"),
        )?;
        writeln!(
            out,
            "     {free_label} | Expected: {} attendees",
            text(event, &["attendance", "expected_attendance"])
        )?;
        writeln!(out)?;
    }
    Ok(())
}

pub(super) fn pois(document: &Value, out: &mut dyn Write) -> io::Result<()> {
    banner(out, "RIOMAGGIORE POINTS OF INTEREST SUMMARY", 70)?;
    totals(document, out)?;

    distribution_block(
        out,
        "Category Distribution",
        &category_distribution(document, "points_of_interest"),
    )?;

    heading(out, "TOP 20 POIs (by Popularity Score):")?;
    for poi in items(document, &["points_of_interest"]) {
        writeln!(out, "#{:>2}: {}", rank(poi), text_or(poi, &["name"], "Unknown"))?;
        writeln!(
            out,
            "     Category: {} | Score: {} | Reviews: {} | Rating: {}/5",
            text_or(poi, &["category", "primary"], "Unknown"),
            text(poi, &["popularity", "popularity_score"]),
            text_or(poi, &["popularity", "total_reviews"], "0"),
            text(poi, &["ratings", "average_rating"]),
        )?;
        writeln!(out)?;
    }
    Ok(())
}

pub(super) fn restaurants(document: &Value, out: &mut dyn Write) -> io::Result<()> {
    banner(out, "RIOMAGGIORE RESTAURANTS SUMMARY", 60)?;
    writeln!(
        out,
        "Found {} restaurants",
        text_or(document, &["metadata", "total_results"], "0")
    )?;
    writeln!(out, "Generated at: {}", text(document, &["metadata", "generated_at"]))?;
    writeln!(out, "{}", rule('-', 60))?;

    for restaurant in items(document, &["restaurants"]) {
        writeln!(
            out,
            "#{}: {} - {}/5",
            rank(restaurant),
            text_or(restaurant, &["name"], "Unknown"),
            text(restaurant, &["ratings", "average_rating"]),
        )?;
    }
    Ok(())
}
