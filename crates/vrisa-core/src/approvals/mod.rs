//! Registration and integration approval workflow
//!
//! Pending requests sit in ordered queues until an admin accepts or
//! rejects them through a two-step confirm/cancel interaction.

mod queue;
pub mod seed;

pub use queue::{ApprovalQueue, PendingDecision};
