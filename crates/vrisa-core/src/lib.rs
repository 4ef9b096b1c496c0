//! # VrISA
//!
//! Administrative console core for the VrISA environmental-monitoring
//! platform.
//!
//! The console's domain logic lives here: the alert rule store, the
//! registration/integration approval queues, and the HTTP API the UI
//! drives them through. Both collections are process-local and reset on
//! restart; the UI layer stays a thin adapter issuing commands and
//! rendering results.
//!
//! ## Architecture
//!
//! - **Alerting**: user-defined threshold rules per (station, pollutant)
//! - **Approvals**: pending-request queues with confirm/cancel decisions
//! - **API**: REST API for the console UI
//!
//! ## Quick Start
//!
//! ```bash
//! # Start the console API with the demo snapshot
//! vrisa serve
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]

pub mod alerting;
pub mod api;
pub mod approvals;
pub mod config;
pub mod error;
pub mod models;

pub use config::Config;
pub use error::{Error, Result};

/// Re-exports for convenience
pub mod prelude {
    pub use crate::alerting::{evaluate, AlertRuleStore};
    pub use crate::api::AppState;
    pub use crate::approvals::{ApprovalQueue, PendingDecision};
    pub use crate::config::Config;
    pub use crate::error::{Error, Result};
    pub use crate::models::*;
}
