// Vouchers module

pub mod controllers;
pub mod models;
pub mod repositories;
pub mod services;

pub use controllers::configure;
pub use models::{ApplyVoucherResult, Voucher};
pub use repositories::{InMemoryVoucherRepository, MySqlVoucherRepository, VoucherRepository};
pub use services::VoucherService;
