//! Score computation and the write paths that keep cached aggregates in sync.

pub mod aggregate;
pub mod calculator;
pub mod ranking;
pub mod ratings;
pub mod scripts;

pub use aggregate::{Aggregate, refresh_aggregate, refresh_all};
pub use calculator::compute_total;
pub use ranking::top_ranked;
pub use ratings::{RatingSubmission, create_rating, lock_rating, update_rating};
