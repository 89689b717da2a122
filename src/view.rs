//! The dog table view state, shared by every front-end
//!
//! Owns the fetched records and the search query. Rendering code asks for
//! [`DogView::rows`] each frame; nothing derived is stored.

use crate::api::{DogRecord, DogSource};
use crate::catalog;
use crate::loader::{spawn_fetch, FetchHandle, LoadMessage};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Where the single load stands.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LoadState {
    #[default]
    NotLoaded,
    Loading,
    Loaded,
    /// Load failed; the table stays empty.
    Failed(String),
}

/// One table row, borrowed from the record it renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DogRow<'a> {
    /// Position of the record in the full list
    pub index: usize,
    pub breed: &'a str,
    pub image_url: &'a str,
    pub alt: &'a str,
}

pub struct DogView {
    records: Vec<DogRecord>,
    query: String,
    state: LoadState,
    source: Arc<dyn DogSource>,
    fetch: Option<FetchHandle>,
    mounted: bool,
}

impl DogView {
    pub fn new(source: Arc<dyn DogSource>) -> Self {
        Self {
            records: Vec::new(),
            query: String::new(),
            state: LoadState::NotLoaded,
            source,
            fetch: None,
            mounted: false,
        }
    }

    /// Issue the initial load. Only the first call per view does anything.
    pub fn mount(&mut self) -> bool {
        if self.mounted {
            return false;
        }
        self.mounted = true;
        self.state = LoadState::Loading;
        self.fetch = Some(spawn_fetch(Arc::clone(&self.source)));
        debug!("dog view mounted; fetch started");
        true
    }

    /// Tear down: any fetch still in flight is discarded when it completes.
    pub fn unmount(&mut self) {
        if let Some(fetch) = self.fetch.take() {
            fetch.cancel();
            if self.state == LoadState::Loading {
                self.state = LoadState::NotLoaded;
            }
        }
    }

    /// Apply a finished fetch, if one is waiting. Returns true when state changed.
    pub fn poll(&mut self) -> bool {
        let msg = match self.fetch.as_ref().and_then(FetchHandle::try_recv) {
            Some(msg) => msg,
            None => return false,
        };
        self.apply(msg);
        true
    }

    /// Block until the initial load settles or `timeout` passes. Returns whether it settled.
    pub fn wait_for_load(&mut self, timeout: Duration) -> bool {
        let msg = match self.fetch.as_ref().and_then(|f| f.recv_timeout(timeout)) {
            Some(msg) => msg,
            None => return !self.is_loading(),
        };
        self.apply(msg);
        true
    }

    fn apply(&mut self, msg: LoadMessage) {
        self.fetch = None;
        match msg {
            LoadMessage::Loaded(records) => {
                self.replace_records(records);
                self.state = LoadState::Loaded;
            }
            LoadMessage::Failed(reason) => {
                warn!(%reason, "showing empty table");
                self.state = LoadState::Failed(reason);
            }
        }
    }

    /// Swap in a new record list wholesale.
    pub fn replace_records(&mut self, records: Vec<DogRecord>) {
        self.records = records;
    }

    pub fn set_query(&mut self, query: impl Into<String>) {
        self.query = query.into();
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn records(&self) -> &[DogRecord] {
        &self.records
    }

    pub fn state(&self) -> &LoadState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        self.state == LoadState::Loading
    }

    /// Records matching the current query, in fetch order.
    pub fn filtered(&self) -> Vec<&DogRecord> {
        catalog::filter_records(&self.records, &self.query)
    }

    /// Display rows for the current query.
    pub fn rows(&self) -> Vec<DogRow<'_>> {
        catalog::filter_indices(&self.records, &self.query)
            .into_iter()
            .map(|index| {
                let record = &self.records[index];
                DogRow {
                    index,
                    breed: catalog::display_name(record),
                    image_url: &record.url,
                    alt: catalog::alt_text(record),
                }
            })
            .collect()
    }
}

impl Drop for DogView {
    fn drop(&mut self) {
        self.unmount();
    }
}
