pub mod rewards;
pub mod config;
pub mod error;
pub mod utils;

pub use error::{Result, RewardError};
pub use config::Config;
pub use rewards::{Allocation, Mentor, Project, RewardReport};
