//! Stable re-exports for consumers (`cli`, `plugins`, and external crates).
//!
//! Prefer importing from `trajview_core::api` instead of reaching into internal modules.

pub use crate::config::{
    AppConfig, FsSourceConfig, HttpServerConfig, HttpSourceConfig, LoggingConfig, SourceConfig,
};
pub use crate::error::{CliError, ConfigError, LoadError};
pub use crate::join::{build_join, compare_task_ids, JoinRow, JoinSummary, OutcomeFilter};
pub use crate::loader::{sanitize_task_id, DataSource, Loader, ResourcePath};
pub use crate::model::{Outcome, Run, RunList, TaskIndex, TaskRecord, TaskSummary};
pub use crate::render::{compare_page, index_page, render_panel, viewer_page};
pub use crate::view::{
    compare_view, drive, index_view, viewer_view, CompareQuery, IndexQuery, Side, ViewEvent,
    ViewState, ViewerQuery,
};
