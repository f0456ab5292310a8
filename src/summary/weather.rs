use std::io::{self, Write};

use serde_json::Value;

use super::{banner, section};
use crate::documents::lookup::{at, flag, items, present, strings, text, text_or, truncate_chars};

pub(super) fn write(document: &Value, out: &mut dyn Write) -> io::Result<()> {
    banner(out, "WEATHER & ACTIVITY RECOMMENDATIONS SUMMARY", 60)?;
    writeln!(out, "Generated at: {}", text(document, &["metadata", "generated_at"]))?;
    writeln!(out, "Location: {}", text(document, &["metadata", "query_location"]))?;

    if present(document, &["current_conditions"]) {
        current_conditions(&document["current_conditions"], out)?;
    }

    let days = items(document, &["daily_forecast", "days"]);
    if !days.is_empty() {
        section(out, "7-DAY FORECAST:")?;
        for day in days.iter().take(7) {
            let today = if flag(day, &["is_today"]) { " (TODAY)" } else { "" };
            let weekday = text_or(day, &["day_of_week"], "");
            let summary = text_or(day, &["summary"], "");
            writeln!(
                out,
                "  {} {}{today}: {}°-{}°C, {}% rain - {}",
                truncate_chars(&weekday, 3),
                text(day, &["date"]),
                text(day, &["temperature", "low_c"]),
                text(day, &["temperature", "high_c"]),
                text_or(day, &["precipitation", "probability_percent"], "0"),
                truncate_chars(&summary, 40),
            )?;
        }
    }

    if present(document, &["marine_conditions"]) {
        let marine = &document["marine_conditions"];
        section(out, "MARINE CONDITIONS:")?;
        writeln!(out, "  Sea State: {}", text(marine, &["sea_state", "description"]))?;
        writeln!(out, "  Wave Height: {}m", text(marine, &["sea_state", "wave_height_m"]))?;
        writeln!(
            out,
            "  Water Temp: {}°C ({})",
            text(marine, &["water_temperature", "surface_c"]),
            text(marine, &["water_temperature", "swimming_comfort"]),
        )?;
        writeln!(
            out,
            "  Ferry Status: {}",
            text(marine, &["ferry_boat_conditions", "overall_status"])
        )?;
    }

    let recommendations = items(
        document,
        &["activity_recommendations", "todays_top_recommendations"],
    );
    if !recommendations.is_empty() {
        section(out, "TODAY'S TOP ACTIVITY RECOMMENDATIONS:")?;
        for rec in recommendations.iter().take(5) {
            writeln!(
                out,
                "  #{}: {}",
                text_or(rec, &["rank"], "?"),
                text_or(rec, &["activity"], "Unknown"),
            )?;
            writeln!(
                out,
                "       Score: {}/10 | Best Time: {}",
                text(rec, &["weather_suitability_score"]),
                best_time(rec),
            )?;
            let reason = text_or(rec, &["reason"], "");
            if !reason.is_empty() {
                writeln!(out, "       {}...", truncate_chars(&reason, 70))?;
            }
        }
    }

    if present(document, &["activity_recommendations", "hiking_recommendations"]) {
        let hiking = &document["activity_recommendations"]["hiking_recommendations"];
        section(out, "HIKING CONDITIONS:")?;
        writeln!(out, "  Overall: {}", text(hiking, &["overall_hiking_conditions"]))?;
        for (label, key) in [
            ("Via dell'Amore", "via_dell_amore"),
            ("Sentiero Azzurro", "sentiero_azzurro"),
        ] {
            if present(hiking, &["trail_conditions", key]) {
                writeln!(
                    out,
                    "  {label}: {} - {}",
                    text(hiking, &["trail_conditions", key, "status"]),
                    text(hiking, &["trail_conditions", key, "weather_suitability"]),
                )?;
            }
        }
    }

    let alerts = items(document, &["weather_alerts", "active_alerts"]);
    if !alerts.is_empty() {
        section(out, "⚠️  WEATHER ALERTS:")?;
        for alert in alerts {
            writeln!(
                out,
                "  [{}] {}",
                text(alert, &["severity"]).to_uppercase(),
                text(alert, &["headline"]),
            )?;
        }
    } else if flag(document, &["weather_alerts", "no_alerts"]) {
        writeln!(out)?;
        writeln!(out, "  ✓ No active weather alerts")?;
    }

    let packing = &document["packing_and_preparation"];
    let always = strings(packing, &["essential_items", "always_bring"], 6);
    if !always.is_empty() {
        section(out, "PACKING ESSENTIALS:")?;
        writeln!(out, "  {}", always.join(", "))?;
    }
    let clothing = strings(packing, &["clothing_guide", "daytime", "recommendations"], 4);
    if !clothing.is_empty() {
        writeln!(out)?;
        writeln!(out, "  Daytime Clothing: {}", clothing.join(", "))?;
    }

    Ok(())
}

fn current_conditions(current: &Value, out: &mut dyn Write) -> io::Result<()> {
    section(out, "CURRENT CONDITIONS:")?;
    writeln!(out, "  Summary: {}", text(current, &["summary"]))?;
    writeln!(
        out,
        "  Temperature: {}°C ({}°F)",
        text(current, &["temperature", "current_c"]),
        text(current, &["temperature", "current_f"]),
    )?;
    writeln!(out, "  Feels like: {}°C", text(current, &["temperature", "feels_like_c"]))?;
    writeln!(
        out,
        "  Wind: {} km/h {}",
        text(current, &["wind", "speed_kmh"]),
        text_or(current, &["wind", "direction_cardinal"], ""),
    )?;
    writeln!(out, "  Humidity: {}%", text(current, &["humidity", "relative_percent"]))?;
    writeln!(
        out,
        "  UV Index: {} ({})",
        text(current, &["uv_index", "value"]),
        text(current, &["uv_index", "level"]),
    )?;
    writeln!(
        out,
        "  Sunrise/Sunset: {} / {}",
        text(current, &["sun_moon", "sunrise"]),
        text(current, &["sun_moon", "sunset"]),
    )
}

/// "09:00 - 12:00", or N/A without a start time
fn best_time(rec: &Value) -> String {
    match at(rec, &["best_time_window", "start"]).and_then(Value::as_str) {
        Some(start) if !start.is_empty() => {
            format!("{start} - {}", text(rec, &["best_time_window", "end"]))
        }
        _ => "N/A".to_string(),
    }
}
