use std::io::{self, Write};

use serde_json::Value;

use super::{banner, section, title_case};
use crate::documents::lookup::{at, flag, items, present, strings, text, text_or, truncate_chars};
use crate::documents::stats::item_counts;

pub(super) fn write(document: &Value, out: &mut dyn Write) -> io::Result<()> {
    banner(out, "TRANSPORTATION DATA SUMMARY", 60)?;
    writeln!(out, "Generated at: {}", text(document, &["metadata", "generated_at"]))?;
    writeln!(out, "Currency: {}", text_or(document, &["metadata", "currency"], "EUR"))?;

    writeln!(out)?;
    writeln!(out, "Data Retrieved:")?;
    for (key, count) in item_counts(document) {
        if count > 0 {
            writeln!(out, "  {}: {count}", title_case(key))?;
        }
    }

    if present(document, &["hub_information", "primary_hub"]) {
        let hub = &document["hub_information"]["primary_hub"];
        writeln!(out)?;
        writeln!(out, "Primary Hub:")?;
        writeln!(out, "  Name: {}", text(hub, &["name"]))?;
        writeln!(out, "  Type: {}", text(hub, &["type"]))?;
    }

    let options = items(document, &["transportation_options"]);
    if !options.is_empty() {
        section(out, "TRANSPORTATION OPTIONS:")?;
        for opt in options {
            writeln!(
                out,
                "  #{}: {} ({})",
                text_or(opt, &["rank"], "?"),
                text_or(opt, &["name"], "Unknown"),
                text(opt, &["category", "primary"]),
            )?;
            let rating = text(opt, &["ratings_reviews", "average_rating"]);
            if rating != "N/A" {
                writeln!(out, "       Rating: {rating}/5")?;
            }
            let best_for = strings(opt, &["best_for"], 3);
            if !best_for.is_empty() {
                writeln!(out, "       Best for: {}", best_for.join(", "))?;
            }
        }
    }

    if let Some(card) = cinque_terre_card(options) {
        section(out, "CINQUE TERRE CARD:")?;
        writeln!(out, "  Name: {}", text(card, &["name"]))?;
        for validity in items(card, &["validity_options"]) {
            writeln!(
                out,
                "  {}: €{} adult, €{} child",
                text(validity, &["duration"]),
                text(validity, &["adult_eur"]),
                text(validity, &["child_eur"]),
            )?;
        }
        writeln!(out, "  Includes: {}...", strings(card, &["includes"], 4).join(", "))?;
    }

    let parking = items(document, &["parking_options"]);
    if !parking.is_empty() {
        section(out, "PARKING OPTIONS:")?;
        for lot in parking {
            let recommended = if flag(lot, &["recommended"]) { " ★ RECOMMENDED" } else { "" };
            writeln!(
                out,
                "  {}: {} spaces, €{}/day{recommended}",
                text_or(lot, &["name"], "Unknown"),
                text(lot, &["capacity", "total_spaces"]),
                text(lot, &["pricing", "rates", "per_day_max"]),
            )?;
        }
    }

    let paths = items(document, &["walking_paths"]);
    if !paths.is_empty() {
        section(out, "WALKING PATHS:")?;
        for path in paths {
            let status = if flag(path, &["current_status", "open"]) { "OPEN" } else { "CHECK STATUS" };
            writeln!(out, "  {}", text_or(path, &["name"], "Unknown"))?;
            writeln!(
                out,
                "       {}km, {}min, {} [{status}]",
                text(path, &["route", "distance_km"]),
                text(path, &["route", "duration_minutes"]),
                text(path, &["route", "difficulty"]),
            )?;
        }
    }

    if present(document, &["accessibility_summary"]) {
        section(out, "ACCESSIBILITY:")?;
        writeln!(
            out,
            "  Overall Rating: {}",
            text(document, &["accessibility_summary", "overall_rating"])
        )?;
        if let Some(summary) = at(document, &["accessibility_summary", "summary"])
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
        {
            writeln!(out, "  {}...", truncate_chars(summary, 100))?;
        }
    }

    let tips = strings(document, &["tips_and_recommendations", "general_tips"], 5);
    if !tips.is_empty() {
        section(out, "TOP TIPS:")?;
        for tip in tips {
            writeln!(out, "  • {tip}")?;
        }
    }

    Ok(())
}

/// First pass whose name mentions the Cinque Terre Card, across all options
fn cinque_terre_card(options: &[Value]) -> Option<&Value> {
    options
        .iter()
        .flat_map(|opt| items(opt, &["pricing", "passes"]))
        .find(|pass| {
            at(pass, &["name"])
                .and_then(Value::as_str)
                .is_some_and(|name| name.contains("Cinque Terre"))
        })
}
