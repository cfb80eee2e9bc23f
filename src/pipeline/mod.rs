//! The one-way `search → analyze → report` pipeline.

pub mod coordinator;
pub mod messages;

pub use coordinator::Pipeline;
pub use messages::{PipelineOutcome, PipelineOutput};
