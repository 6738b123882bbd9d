//! Fee models: pure mappings from account balance to an effective periodic rate

mod loader;
mod schedule;
mod tiers;

pub use loader::load_tier_schedule;
pub use schedule::FeeSchedule;
pub use tiers::{Tier, TierSchedule};
