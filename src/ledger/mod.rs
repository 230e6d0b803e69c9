//! In-memory ledger for simulations and tests.

mod in_memory;
#[cfg(test)]
mod refusing;

pub use in_memory::InMemoryLedger;
#[cfg(test)]
pub(crate) use refusing::RefusingLedger;
