//! Immutable capability set of a smart pool.
//!
//! A pool is created with a fixed [`Rights`] value; nothing can change it
//! afterwards.  Every gated entry point calls [`Rights::require`] with the
//! [`Capability`] it needs before touching any state, so a denied call
//! fails with [`PoolError::PermissionDenied`] and leaves the pool unchanged.
//! A pool that needs different rights is recreated, not reconfigured.

use core::fmt;

use crate::error::PoolError;

/// One gated family of operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Capability {
    /// Toggle public swapping on and off.
    PauseSwapping,
    /// Change the swap fee.
    ChangeSwapFee,
    /// Reweight a single asset or schedule a gradual update.
    ChangeWeights,
    /// Commit, apply and remove constituent assets.
    AddRemoveTokens,
    /// Restrict joins to whitelisted liquidity providers.
    WhitelistLps,
    /// Change the pool-share supply cap.
    ChangeCap,
}

impl Capability {
    /// All capabilities, in declaration order.
    pub const ALL: [Self; 6] = [
        Self::PauseSwapping,
        Self::ChangeSwapFee,
        Self::ChangeWeights,
        Self::AddRemoveTokens,
        Self::WhitelistLps,
        Self::ChangeCap,
    ];

    /// Human-readable name.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::PauseSwapping => "pause swapping",
            Self::ChangeSwapFee => "change swap fee",
            Self::ChangeWeights => "change weights",
            Self::AddRemoveTokens => "add/remove tokens",
            Self::WhitelistLps => "whitelist LPs",
            Self::ChangeCap => "change cap",
        }
    }
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// The capability flags of one pool.
///
/// All flags default to `false`; [`Rights::all`] enables everything.
///
/// # Examples
///
/// ```
/// use smart_pool::rights::{Capability, Rights};
///
/// let rights = Rights {
///     can_change_weights: true,
///     ..Rights::default()
/// };
/// assert!(rights.has_permission(Capability::ChangeWeights));
/// assert!(rights.require(Capability::ChangeCap).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[allow(clippy::struct_excessive_bools)]
pub struct Rights {
    /// Gates [`Capability::PauseSwapping`].
    pub can_pause_swapping: bool,
    /// Gates [`Capability::ChangeSwapFee`].
    pub can_change_swap_fee: bool,
    /// Gates [`Capability::ChangeWeights`].
    pub can_change_weights: bool,
    /// Gates [`Capability::AddRemoveTokens`].
    pub can_add_remove_tokens: bool,
    /// Gates [`Capability::WhitelistLps`].
    pub can_whitelist_lps: bool,
    /// Gates [`Capability::ChangeCap`].
    pub can_change_cap: bool,
}

impl Rights {
    /// Every capability enabled.
    pub const fn all() -> Self {
        Self {
            can_pause_swapping: true,
            can_change_swap_fee: true,
            can_change_weights: true,
            can_add_remove_tokens: true,
            can_whitelist_lps: true,
            can_change_cap: true,
        }
    }

    /// No capability enabled: a fixed pool.
    pub const fn none() -> Self {
        Self {
            can_pause_swapping: false,
            can_change_swap_fee: false,
            can_change_weights: false,
            can_add_remove_tokens: false,
            can_whitelist_lps: false,
            can_change_cap: false,
        }
    }

    /// Returns `true` if `capability` is granted.
    #[must_use]
    pub const fn has_permission(&self, capability: Capability) -> bool {
        match capability {
            Capability::PauseSwapping => self.can_pause_swapping,
            Capability::ChangeSwapFee => self.can_change_swap_fee,
            Capability::ChangeWeights => self.can_change_weights,
            Capability::AddRemoveTokens => self.can_add_remove_tokens,
            Capability::WhitelistLps => self.can_whitelist_lps,
            Capability::ChangeCap => self.can_change_cap,
        }
    }

    /// Fails unless `capability` is granted.
    ///
    /// # Errors
    ///
    /// [`PoolError::PermissionDenied`] carrying the missing capability.
    pub const fn require(&self, capability: Capability) -> Result<(), PoolError> {
        if self.has_permission(capability) {
            Ok(())
        } else {
            Err(PoolError::PermissionDenied(capability))
        }
    }

    /// Iterator over the granted capabilities.
    pub fn granted(&self) -> impl Iterator<Item = Capability> + '_ {
        Capability::ALL
            .into_iter()
            .filter(|c| self.has_permission(*c))
    }
}
