//! DogTable - searchable table of dog images
//!
//! Fetches one page of breed-tagged images from The Dog API and shows them in a table
//! that filters by breed as you type. The same [`DogView`] drives the egui window, the
//! terminal UI and the plain `list` command.
//!
//! # Example
//!
//! ```no_run
//! use dogtable::{AppConfig, DogApiClient, DogView};
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! fn main() -> dogtable::Result<()> {
//!     let config = AppConfig::default().with_api_key(std::env::var("DOG_API_KEY").ok());
//!     let client = DogApiClient::new(config)?;
//!
//!     let mut view = DogView::new(Arc::new(client));
//!     view.mount();
//!     view.wait_for_load(Duration::from_secs(30));
//!
//!     view.set_query("retriever");
//!     for row in view.rows() {
//!         println!("{}: {}", row.breed, row.image_url);
//!     }
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod catalog;
pub mod config;
pub mod error;
pub mod gui;
pub mod loader;
pub mod logging;
pub mod tui;
pub mod view;

// Re-export main types
pub use api::{parse_records, Breed, DogApiClient, DogRecord, DogSource};
pub use catalog::{filter_records, DEFAULT_ALT, UNKNOWN_BREED};
pub use config::{AppConfig, SearchParams, DEFAULT_ENDPOINT};
pub use error::{DogTableError, Result};
pub use view::{DogRow, DogView, LoadState};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Title shown above the table
pub const TITLE: &str = "Dogs Images";

/// Label of the search input
pub const SEARCH_LABEL: &str = "Search by Breed";

/// Table column headers
pub const COLUMN_HEADERS: [&str; 2] = ["Breed", "Image"];
