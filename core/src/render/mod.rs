pub mod page;
pub mod panel;
pub mod reasoning;
pub mod tables;

pub use page::{compare_page, index_page, panel_body, viewer_page};
pub use panel::{mismatch_reason, render_panel, MismatchReason};
pub use reasoning::extract_reasoning;
