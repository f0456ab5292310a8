//! `cinqueterre` - Structured travel data for Riomaggiore via a web-searching
//! language model
//!
//! Each document kind (accommodations, events, points of interest,
//! restaurants, transportation, weather) is requested with its own prompt,
//! pulled out of the model's reply as JSON, checked for its required fields
//! and written to disk.

pub mod anthropic;
pub mod config;
pub mod documents;
pub mod error;
pub mod extract;
pub mod fetcher;
pub mod logging;
pub mod storage;
pub mod summary;

// Re-export core types for public API
pub use anthropic::{AnthropicClient, MessageClient, MessageReply, MessageRequest};
pub use config::CinqueTerreConfig;
pub use documents::DocumentKind;
pub use error::CinqueTerreError;
pub use fetcher::{FetchOutcome, Fetcher};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Core result type used throughout the library
pub type Result<T> = std::result::Result<T, CinqueTerreError>;
