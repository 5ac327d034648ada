//! DocSync Backend Client
//!
//! This library provides the protocol layer of the DocSync dashboard:
//! the wire types spoken by the sync service, a typed HTTP client for its
//! REST endpoints, a decoder for its server-sent event stream, and the two
//! stateful cores the UI is built on — the card reconciler and the remote
//! directory browser. Nothing in here depends on a UI toolkit.

pub mod browser;
pub mod client;
pub mod document;
pub mod mapping;
pub mod reconciler;
pub mod stream;

mod error;

pub use browser::{
    BrowserState, DirectoryBrowser, DirectoryEntry, DriveItem, LoadRequest, NavigationFrame,
    SelectedFolder,
};
pub use client::{
    ApiClient, DriveItemsRequest, FileNamingLogEntry, FileNamingLogs, LogFilter, OllamaModel,
    OllamaProbe, OllamaSettingsForm,
};
pub use document::{
    contrast_yiq, progress_segments, Badge, CardUpdate, Contrast, DashboardStats, DocumentCard,
    SegmentState, StatusKind, PROGRESS_SEGMENT_COUNT,
};
pub use error::{ApiError, Result};
pub use mapping::{validate_share_name, PathMapping, PathMappingDetails, PathMappingForm};
pub use reconciler::{CardReconciler, UpdateOutcome};
pub use stream::{EventStream, SseDecoder};
