pub mod store;
pub mod query;

pub use store::{ResultStore, DEFAULT_ARTIFACT};
pub use query::{render_record, QueryService};
