pub mod voucher_service;

pub use voucher_service::VoucherService;
