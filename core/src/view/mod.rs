//! Page state as an owned value driven by a pure reducer.

pub mod driver;
pub mod event;
pub mod pages;
pub mod state;

pub use driver::{drive, execute};
pub use event::{Effect, ViewEvent};
pub use pages::{compare_view, index_view, viewer_view, CompareQuery, IndexQuery, ViewerQuery};
pub use state::{Content, PanelSlot, RequestKind, RequestTag, Side, ViewState};
