mod labels;
mod models;
mod query;
mod stats;
mod text;

pub use labels::*;
pub use models::*;
pub use query::*;
pub use stats::*;
pub use text::non_blank;
