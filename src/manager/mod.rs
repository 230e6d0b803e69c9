//! Governance state machines operating on a [`WeightedPool`](crate::pools::WeightedPool).
//!
//! | Item | Role |
//! |------|------|
//! | [`WeightScheduler`] | Gradual, block-indexed weight interpolation |
//! | [`TokenLifecycle`] | Commit → timelock → apply for new assets, immediate removal |
//! | [`reweight_single`] | Immediate single-asset weight change |
//!
//! None of them touch the ledger or check rights; that is the
//! [`SmartPool`](crate::pools::SmartPool)'s job.  Each function validates
//! fully before mutating and leaves the pool unchanged on error.

mod lifecycle;
mod reweight;
mod scheduler;

pub use lifecycle::{AppliedToken, PendingTokenCommit, RemovedToken, TokenLifecycle};
pub use reweight::{reweight_single, ReweightOutcome};
pub use scheduler::{AdvanceOutcome, GradualUpdatePlan, WeightScheduler};
