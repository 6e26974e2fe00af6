//! Minecraft server query, player statistics and Mojang API client.

pub mod config;
pub mod display;
pub mod error;
pub mod models;
pub mod mojang;
pub mod query;
pub mod stats;
pub mod storage;
pub mod utils;

pub use config::Config;
pub use error::{ApiError, QueryError, QueryErrorKind, StatsError};
pub use models::server::ServerStatus;
pub use mojang::MojangClient;
pub use query::QueryClient;
pub use stats::PlayerStats;
