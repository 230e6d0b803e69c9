//! Collaborator seams.
//!
//! [`Ledger`] is the external token ledger every smart pool settles
//! against, and [`FromConfig`] is the configuration-driven construction
//! used by the factory.

mod from_config;
mod ledger;

pub use from_config::FromConfig;
pub use ledger::Ledger;
