//! Voucher Service Library
//!
//! Creates percentage discount vouchers and applies them, once, to purchase amounts.

pub mod config;
pub mod core;
pub mod middleware;
pub mod modules;

// Re-export commonly used types
pub use modules::health;
pub use modules::vouchers;
