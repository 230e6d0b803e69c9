//! Unified error types for the smart pool engine.
//!
//! All fallible operations across the crate return [`PoolError`], ensuring a
//! consistent error handling experience for hosts.  Every variant belongs to
//! exactly one [`ErrorKind`], so a host can decide how to surface a failure
//! (bad input, wrong state, missing capability, numeric edge case) without
//! matching every variant.
//!
//! Errors are raised at the point of the violated precondition.  No
//! operation mutates pool state before returning an error.

use thiserror::Error;

use crate::rights::Capability;

/// Broad classification of a [`PoolError`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Out-of-bounds arguments, mismatched lengths, asset-count limits.
    Validation,
    /// Operation not valid in the current pool state.
    State,
    /// Capability missing from the pool's rights, or caller not allowed.
    Permission,
    /// Overflow, underflow, division by zero, or `pow` outside its domain.
    Arithmetic,
}

/// Every failure the engine can report.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PoolError {
    // -- validation ---------------------------------------------------------
    /// A weight is outside `[min_weight, max_weight]` or would push the
    /// total weight above `max_total_weight`.
    #[error("invalid weight: {0}")]
    InvalidWeight(&'static str),

    /// A balance is below `min_balance` or otherwise unusable.
    #[error("invalid balance: {0}")]
    InvalidBalance(&'static str),

    /// A swap fee is outside `[min_fee, max_fee]`.
    #[error("invalid fee: {0}")]
    InvalidFee(&'static str),

    /// A block range violates the scheduling rules.
    #[error("invalid block range: {0}")]
    InvalidBlockRange(&'static str),

    /// The asset is unknown to the pool, or already bound.
    #[error("invalid asset: {0}")]
    InvalidAsset(&'static str),

    /// Adding or removing an asset would leave the pool outside
    /// `[min_assets, max_assets]`.
    #[error("asset count out of bounds: {0}")]
    AssetCount(&'static str),

    /// Parallel argument arrays have different lengths.
    #[error("length mismatch: {0}")]
    LengthMismatch(&'static str),

    /// A pool or parameter configuration is internally inconsistent.
    #[error("invalid configuration: {0}")]
    InvalidConfiguration(&'static str),

    /// A computed or requested quantity is zero or otherwise unusable.
    #[error("invalid quantity: {0}")]
    InvalidQuantity(&'static str),

    /// A caller-supplied slippage or ratio limit was exceeded.
    #[error("limit exceeded: {0}")]
    LimitExceeded(&'static str),

    /// Minting would push the pool-share supply above the cap.
    #[error("pool share cap reached")]
    CapExceeded,

    /// The ledger cannot cover a pull or burn.
    #[error("insufficient balance: {0}")]
    InsufficientBalance(&'static str),

    // -- state --------------------------------------------------------------
    /// A weight-mutating operation was attempted during an active
    /// gradual update.
    #[error("a gradual weight update is in progress")]
    UpdateInProgress,

    /// `advance` was called before the plan's start block.
    #[error("gradual update has not started yet")]
    NotYetStarted,

    /// A structural change was attempted while a token commit is pending.
    #[error("a token commit is pending")]
    CommitPending,

    /// `apply` was called with no pending commit.
    #[error("no pending token commit")]
    NoPendingCommit,

    /// `apply` was called before the timelock elapsed.
    #[error("timelock not elapsed: {remaining} block(s) remaining")]
    TimelockNotElapsed {
        /// Blocks left until the commit may be applied.
        remaining: u64,
    },

    /// Swaps and single-asset joins/exits are paused.
    #[error("public swapping is paused")]
    SwapsPaused,

    /// An operation was entered while another one still holds the lock.
    #[error("reentrant call")]
    Reentrancy,

    // -- permission ---------------------------------------------------------
    /// The pool was created without the capability this operation needs.
    #[error("permission denied: pool lacks {0}")]
    PermissionDenied(Capability),

    /// The caller is not a whitelisted liquidity provider.
    #[error("liquidity provider is not whitelisted")]
    NotWhitelisted,

    // -- arithmetic ---------------------------------------------------------
    /// Arithmetic overflow.
    #[error("arithmetic overflow: {0}")]
    Overflow(&'static str),

    /// Arithmetic underflow.
    #[error("arithmetic underflow: {0}")]
    Underflow(&'static str),

    /// Division by zero.
    #[error("division by zero")]
    DivisionByZero,

    /// `pow` base outside `[min_pow_base, max_pow_base]`.
    #[error("domain error: {0}")]
    DomainError(&'static str),
}

impl PoolError {
    /// Returns the taxonomy bucket this error belongs to.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::InvalidWeight(_)
            | Self::InvalidBalance(_)
            | Self::InvalidFee(_)
            | Self::InvalidBlockRange(_)
            | Self::InvalidAsset(_)
            | Self::AssetCount(_)
            | Self::LengthMismatch(_)
            | Self::InvalidConfiguration(_)
            | Self::InvalidQuantity(_)
            | Self::LimitExceeded(_)
            | Self::CapExceeded
            | Self::InsufficientBalance(_) => ErrorKind::Validation,
            Self::UpdateInProgress
            | Self::NotYetStarted
            | Self::CommitPending
            | Self::NoPendingCommit
            | Self::TimelockNotElapsed { .. }
            | Self::SwapsPaused
            | Self::Reentrancy => ErrorKind::State,
            Self::PermissionDenied(_) | Self::NotWhitelisted => ErrorKind::Permission,
            Self::Overflow(_) | Self::Underflow(_) | Self::DivisionByZero | Self::DomainError(_) => {
                ErrorKind::Arithmetic
            }
        }
    }

    /// Returns `true` if this is a [`ErrorKind::Validation`] error.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self.kind(), ErrorKind::Validation)
    }

    /// Returns `true` if this is a [`ErrorKind::State`] error.
    #[must_use]
    pub const fn is_state(&self) -> bool {
        matches!(self.kind(), ErrorKind::State)
    }

    /// Returns `true` if this is a [`ErrorKind::Permission`] error.
    #[must_use]
    pub const fn is_permission(&self) -> bool {
        matches!(self.kind(), ErrorKind::Permission)
    }

    /// Returns `true` if this is a [`ErrorKind::Arithmetic`] error.
    #[must_use]
    pub const fn is_arithmetic(&self) -> bool {
        matches!(self.kind(), ErrorKind::Arithmetic)
    }
}

/// Crate-wide result alias.
pub type Result<T> = core::result::Result<T, PoolError>;
