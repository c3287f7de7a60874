mod server;

pub use server::{DB_FILE_NAME, ListingConfig, RankingConfig, ServerConfig};
