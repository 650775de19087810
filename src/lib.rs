//! Analytics for a job-search tracking dashboard: application streaks, career
//! health scoring, company engagement signals and coaching insights.
//!
//! Every engine function is pure and takes the reference instant explicitly.

pub mod activity;
pub mod age;
pub mod clock;
pub mod config;
pub mod health;
pub mod input;
pub mod insights;
pub mod models;
pub mod report;
pub mod signals;
pub mod status;
pub mod streak;

pub use activity::{peak_apply_day, weekday_name};
pub use age::age_badge;
pub use clock::{Clock, FixedClock, SystemClock};
pub use health::{career_health, coaching_tip};
pub use insights::generate_insights;
pub use signals::{company_signal, rank_companies};
pub use status::{is_applied_stage, StageCounts};
pub use streak::calculate_streak;
