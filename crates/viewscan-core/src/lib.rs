pub mod catalogs;
pub mod error;
pub mod fetcher;
pub mod ffi;
pub mod listing;
pub mod markup;
pub mod scanner;
pub mod snapshot;
pub mod trigger;
pub mod types;

pub use error::{ListError, MarkupError, RemoteFetchError, ScanError, SnapshotError};
pub use fetcher::{Criterion, Domain, ObjectService, Record, RecordId, RemoteViewFetcher, ViewFetcher};
pub use ffi::{list_triggers_multi_to_json, list_triggers_to_json};
pub use listing::{list_triggers, list_triggers_into};
pub use scanner::scan_view;
pub use snapshot::{Snapshot, SnapshotView};
pub use trigger::{parse_trigger, TriggerCall};
pub use types::*;
