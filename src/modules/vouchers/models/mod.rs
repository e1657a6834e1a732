mod voucher;

pub use voucher::{
    ApplyVoucherRequest, ApplyVoucherResult, CreateVoucherRequest, Voucher, DISCOUNT_SCALE,
    MIN_APPLY_AMOUNT,
};
