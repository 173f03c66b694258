pub mod manager;
pub mod models;
pub mod rewards;

pub use manager::{DatabaseError, DatabaseManager};
pub use rewards::{NewRewardRecord, PgRewardsRepository, RewardsRepository};
