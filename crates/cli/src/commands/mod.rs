//! CLI command implementations.

pub mod branches;
pub mod browse;
pub mod checkout;
pub mod seed;
