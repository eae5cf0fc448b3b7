pub mod types;
pub mod calculator;
pub mod report;

pub use types::{Mentor, Project, ProjectStatus};
pub use calculator::{Allocation, MentorReward};
pub use report::RewardReport;
