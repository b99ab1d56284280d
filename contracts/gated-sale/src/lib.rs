pub mod allowlist;
pub mod contract;
pub mod error;
pub mod execute;
pub mod merkle;
pub mod msg;
pub mod payment;
pub mod query;
pub mod state;

#[cfg(test)]
pub mod testing;
