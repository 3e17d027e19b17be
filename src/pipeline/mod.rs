//! Pipeline entry points for viewer operations.
//!
//! - `run_viewer`: Fetch, parse, order and render members into a sink
//! - `fetch_members`: Fetch and order members without rendering
//! - `run_validate`: Check a configuration

pub mod validate;
pub mod view;

pub use validate::run_validate;
pub use view::{ViewSummary, fetch_members, run_viewer};
