//! Document kinds
//!
//! Every fetch produces one of six documents about the village. They share
//! the same pipeline and differ only in the data tabled here: prompt,
//! token budget, output file and the fields checked after parsing.

use std::fmt;

pub mod lookup;
pub mod prompts;
pub mod stats;
pub mod validation;

pub use prompts::render_prompt;
pub use validation::{is_valid, validate};

/// The record kinds requested from the model
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum DocumentKind {
    Accommodations,
    Events,
    Pois,
    Restaurants,
    Transportation,
    Weather,
}

/// Shape requirements for a document's main list
#[derive(Debug, Clone, Copy)]
pub struct ListRequirement {
    /// Top-level key holding the array
    pub key: &'static str,
    /// Singular label used in messages ("Event 3 missing field: ...")
    pub item_label: &'static str,
    /// Plural label used for the empty-list message
    pub plural_label: &'static str,
    /// Keys every item must carry
    pub item_fields: &'static [&'static str],
}

impl DocumentKind {
    pub const ALL: [DocumentKind; 6] = [
        DocumentKind::Accommodations,
        DocumentKind::Events,
        DocumentKind::Pois,
        DocumentKind::Restaurants,
        DocumentKind::Transportation,
        DocumentKind::Weather,
    ];

    /// Lowercase identifier used on the command line
    #[must_use]
    pub fn slug(self) -> &'static str {
        match self {
            DocumentKind::Accommodations => "accommodations",
            DocumentKind::Events => "events",
            DocumentKind::Pois => "pois",
            DocumentKind::Restaurants => "restaurants",
            DocumentKind::Transportation => "transportation",
            DocumentKind::Weather => "weather",
        }
    }

    /// Human label for progress and error lines
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            DocumentKind::Accommodations => "accommodation",
            DocumentKind::Events => "event",
            DocumentKind::Pois => "POI",
            DocumentKind::Restaurants => "restaurant",
            DocumentKind::Transportation => "transportation",
            DocumentKind::Weather => "weather",
        }
    }

    /// File name the document is written to inside the output directory
    #[must_use]
    pub fn file_name(self) -> String {
        format!("riomaggiore_{}.json", self.slug())
    }

    /// Output token budget; the larger documents need more room
    #[must_use]
    pub fn max_tokens(self) -> u32 {
        match self {
            DocumentKind::Accommodations => 20_000,
            DocumentKind::Events => 35_000,
            DocumentKind::Pois => 30_000,
            DocumentKind::Restaurants => 16_000,
            DocumentKind::Transportation => 40_000,
            DocumentKind::Weather => 35_000,
        }
    }

    /// Keys that must exist at the top level of the document
    #[must_use]
    pub fn required_fields(self) -> &'static [&'static str] {
        match self {
            DocumentKind::Accommodations => &["metadata", "accommodations"],
            DocumentKind::Events => &["metadata", "events"],
            DocumentKind::Pois => &["metadata", "points_of_interest"],
            DocumentKind::Restaurants => &["metadata", "restaurants"],
            DocumentKind::Transportation => &["metadata", "transportation_options"],
            DocumentKind::Weather => &["metadata", "current_conditions"],
        }
    }

    /// The ranked list the document is built around, if any
    #[must_use]
    pub fn list_requirement(self) -> Option<ListRequirement> {
        match self {
            DocumentKind::Accommodations => Some(ListRequirement {
                key: "accommodations",
                item_label: "Accommodation",
                plural_label: "accommodations",
                item_fields: &["rank", "name", "location", "ratings"],
            }),
            DocumentKind::Events => Some(ListRequirement {
                key: "events",
                item_label: "Event",
                plural_label: "events",
                item_fields: &["rank", "name", "category", "schedule", "location", "details"],
            }),
            DocumentKind::Pois => Some(ListRequirement {
                key: "points_of_interest",
                item_label: "POI",
                plural_label: "POIs",
                item_fields: &["rank", "name", "category", "location", "ratings", "popularity"],
            }),
            DocumentKind::Restaurants => Some(ListRequirement {
                key: "restaurants",
                item_label: "Restaurant",
                plural_label: "restaurants",
                item_fields: &["rank", "name", "ratings"],
            }),
            DocumentKind::Transportation | DocumentKind::Weather => None,
        }
    }
}

impl fmt::Display for DocumentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}
