pub mod engine;

pub use engine::{SchedulerState, ScrapeScheduler, ScrapeStats};
