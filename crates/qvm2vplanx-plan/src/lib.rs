//! Builds vPlanx verification-plan documents from extracted plan records.

pub mod builder;
pub mod error;
pub mod ids;
pub mod save;
pub mod schema;

pub use builder::{BuildConfig, PlanBuilder};
pub use error::{PlanError, PlanErrorReport};
pub use ids::{Clock, FixedClock, IdGenerator, SequentialIds, SystemClock, UuidGenerator};
pub use save::{OutputFormat, PLAN_EXTENSION, save_plan, write_plan};
pub use schema::Plan;
