pub mod account_service;
pub mod rewards_service;

pub use account_service::{AccountError, AccountService, AuthenticatedUser};
pub use rewards_service::{RewardsError, RewardsService};
