//! Gradual, block-indexed weight updates.
//!
//! A [`WeightScheduler`] is either idle or holds one [`GradualUpdatePlan`].
//! Hosts call [`advance`](WeightScheduler::advance) with the current block
//! whenever they like; each call evaluates the plan at that block, so gaps
//! and late calls are fine.
//!
//! # Interpolation
//!
//! For an asset moving from `s` to `e` over `period = end - start` blocks,
//! at `elapsed = min(block, end) - start`:
//!
//! ```text
//! e >= s:  w = s + floor((e - s) * elapsed / period)
//! e <  s:  w = s - ceil ((s - e) * elapsed / period)
//! ```
//!
//! Both round toward the lower weight, so the total weight never exceeds
//! the linear interpolation of the start and end totals, both of which are
//! at most `max_total_weight`.  At `block >= end` every weight is exactly
//! its target.

use crate::domain::{AssetId, BlockNumber, Fixed, Rounding};
use crate::error::PoolError;
use crate::math::{div_round, CheckedArithmetic, U256};
use crate::pools::WeightedPool;

use super::TokenLifecycle;

/// An active linear weight transition.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GradualUpdatePlan {
    assets: Vec<AssetId>,
    start_block: BlockNumber,
    end_block: BlockNumber,
    start_weights: Vec<Fixed>,
    end_weights: Vec<Fixed>,
}

impl GradualUpdatePlan {
    /// Assets covered by the plan, in pool binding order.
    #[must_use]
    pub fn assets(&self) -> &[AssetId] {
        &self.assets
    }

    /// Effective start block.
    #[must_use]
    pub const fn start_block(&self) -> BlockNumber {
        self.start_block
    }

    /// Block at which the targets are reached.
    #[must_use]
    pub const fn end_block(&self) -> BlockNumber {
        self.end_block
    }

    /// Weights captured at scheduling time.
    #[must_use]
    pub fn start_weights(&self) -> &[Fixed] {
        &self.start_weights
    }

    /// Target weights.
    #[must_use]
    pub fn end_weights(&self) -> &[Fixed] {
        &self.end_weights
    }

    /// Interpolated weights at `block`, clamped to `[start_block, end_block]`.
    ///
    /// # Errors
    ///
    /// - [`PoolError::NotYetStarted`] if `block < start_block`.
    /// - [`PoolError::Overflow`] if an intermediate product overflows.
    pub fn weights_at(&self, block: BlockNumber) -> Result<Vec<Fixed>, PoolError> {
        if block < self.start_block {
            return Err(PoolError::NotYetStarted);
        }
        if block >= self.end_block {
            return Ok(self.end_weights.clone());
        }
        let elapsed = U256::from(block - self.start_block);
        let period = U256::from(self.end_block - self.start_block);

        self.start_weights
            .iter()
            .zip(&self.end_weights)
            .map(|(start, end)| interpolate(*start, *end, elapsed, period))
            .collect()
    }
}

fn interpolate(start: Fixed, end: Fixed, elapsed: U256, period: U256) -> Result<Fixed, PoolError> {
    let rising = end >= start;
    let delta = start.abs_diff(&end);
    let scaled = delta
        .raw()
        .checked_mul(elapsed)
        .ok_or(PoolError::Overflow("weight delta * elapsed"))?;
    let rounding = if rising { Rounding::Down } else { Rounding::Up };
    let step = div_round(scaled, period, rounding).ok_or(PoolError::DivisionByZero)?;
    let step = Fixed::from_raw(step);
    if rising {
        start.safe_add(&step)
    } else {
        start.safe_sub(&step)
    }
}

/// What an [`advance`](WeightScheduler::advance) call did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AdvanceOutcome {
    /// No plan was active.
    Idle,
    /// Weights moved; the plan is still active.
    Progressed,
    /// Final weights applied; the plan was cleared.
    Finished,
}

/// Idle/active state machine driving gradual weight updates.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WeightScheduler {
    plan: Option<GradualUpdatePlan>,
}

impl WeightScheduler {
    /// Creates an idle scheduler.
    #[must_use]
    pub const fn new() -> Self {
        Self { plan: None }
    }

    /// Returns `true` while a plan is in progress.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.plan.is_some()
    }

    /// The active plan, if any.
    #[must_use]
    pub const fn plan(&self) -> Option<&GradualUpdatePlan> {
        self.plan.as_ref()
    }

    /// Schedules a transition of every pool weight to `new_weights`,
    /// replacing any active plan.
    ///
    /// If `current_block > start_block` the plan starts at `current_block`.
    ///
    /// # Errors
    ///
    /// - [`PoolError::CommitPending`] if a token commit is pending.
    /// - [`PoolError::InvalidBlockRange`] if `current_block >= end_block`
    ///   or the effective period is shorter than `min_weight_change_period`.
    /// - [`PoolError::LengthMismatch`] if `new_weights` does not match the
    ///   asset count.
    /// - [`PoolError::InvalidWeight`] if a target is out of bounds or the
    ///   targets sum above `max_total_weight`.
    pub fn schedule(
        &mut self,
        pool: &WeightedPool,
        lifecycle: &TokenLifecycle,
        new_weights: &[Fixed],
        start_block: BlockNumber,
        end_block: BlockNumber,
        current_block: BlockNumber,
    ) -> Result<&GradualUpdatePlan, PoolError> {
        if lifecycle.is_pending() {
            return Err(PoolError::CommitPending);
        }
        if current_block >= end_block {
            return Err(PoolError::InvalidBlockRange(
                "end block must lie after the current block",
            ));
        }
        let start_block = start_block.max(current_block);
        if end_block < start_block
            || end_block - start_block < pool.params().min_weight_change_period
        {
            return Err(PoolError::InvalidBlockRange(
                "period is shorter than min_weight_change_period",
            ));
        }
        if new_weights.len() != pool.len() {
            return Err(PoolError::LengthMismatch(
                "new weights must match the asset count",
            ));
        }

        let params = pool.params();
        let mut total = Fixed::ZERO;
        for weight in new_weights {
            if !params.weight_ok(*weight) {
                return Err(PoolError::InvalidWeight(
                    "target weight must lie within [min_weight, max_weight]",
                ));
            }
            total = total.safe_add(weight)?;
        }
        if total > params.max_total_weight {
            return Err(PoolError::InvalidWeight(
                "target weights exceed max_total_weight",
            ));
        }

        tracing::debug!(start_block, end_block, current_block, "gradual update accepted");
        Ok(&*self.plan.insert(GradualUpdatePlan {
            assets: pool.asset_ids().collect(),
            start_block,
            end_block,
            start_weights: pool.weights(),
            end_weights: new_weights.to_vec(),
        }))
    }

    /// Moves pool weights to their interpolated values at `current_block`.
    ///
    /// Clears the plan once `current_block >= end_block`.  A no-op when idle.
    ///
    /// # Errors
    ///
    /// - [`PoolError::NotYetStarted`] if `current_block < start_block`.
    /// - Propagates [`WeightedPool::rebind`] failures; the pool and the
    ///   plan are unchanged on error.
    pub fn advance(
        &mut self,
        pool: &mut WeightedPool,
        current_block: BlockNumber,
    ) -> Result<AdvanceOutcome, PoolError> {
        let Some(plan) = &self.plan else {
            return Ok(AdvanceOutcome::Idle);
        };
        let targets = plan.weights_at(current_block)?;

        let mut next = pool.clone();
        let mut changes = Vec::with_capacity(targets.len());
        for (asset, weight) in plan.assets.iter().zip(targets) {
            let current = next.asset(*asset)?;
            if current.weight() != weight {
                changes.push((*asset, current.balance(), current.weight(), weight));
            }
        }
        // decreases first so the running total never overshoots
        changes.sort_by_key(|(_, _, old, new)| new > old);
        for (asset, balance, _, weight) in changes {
            next.rebind(asset, balance, weight)?;
        }
        *pool = next;

        if current_block >= plan.end_block {
            tracing::debug!(block = current_block, "gradual update finished");
            self.plan = None;
            Ok(AdvanceOutcome::Finished)
        } else {
            Ok(AdvanceOutcome::Progressed)
        }
    }
}
