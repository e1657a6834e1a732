pub mod in_memory;
pub mod voucher_repository;

pub use in_memory::InMemoryVoucherRepository;
pub use voucher_repository::{MySqlVoucherRepository, VoucherRepository};
