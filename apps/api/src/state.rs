use std::sync::Arc;

use chrono::FixedOffset;

use crate::engine::YearMonth;
use crate::records::RecordStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Pluggable record store. Default: PgRecordStore; MemoryRecordStore when
    /// no DATABASE_URL is configured.
    pub store: Arc<dyn RecordStore>,
    /// Source of "now" for ongoing entries. Tests pin it to a fixed month.
    pub clock: Arc<dyn Fn() -> YearMonth + Send + Sync>,
}

impl AppState {
    /// `utc_offset` is the owners' wall-clock offset; it decides which month
    /// "now" falls in.
    pub fn new(store: Arc<dyn RecordStore>, utc_offset: FixedOffset) -> Self {
        Self {
            store,
            clock: Arc::new(move || YearMonth::current_at(utc_offset)),
        }
    }

    pub fn now(&self) -> YearMonth {
        (self.clock)()
    }
}
