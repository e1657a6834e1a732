use std::sync::Arc;

use rust_decimal::Decimal;

use crate::core::{AppError, Result};
use crate::modules::vouchers::models::{ApplyVoucherResult, Voucher};
use crate::modules::vouchers::repositories::voucher_repository::{
    VoucherRepository, VOUCHER_ALREADY_EXISTS,
};

/// Message returned when applying an unknown code
pub const VOUCHER_DOES_NOT_EXIST: &str = "Voucher does not exist.";

/// Service for voucher business rules
pub struct VoucherService {
    voucher_repo: Arc<dyn VoucherRepository>,
}

impl VoucherService {
    pub fn new(voucher_repo: Arc<dyn VoucherRepository>) -> Self {
        Self { voucher_repo }
    }

    /// Create a voucher with a code no other voucher uses.
    ///
    /// Fails with `AppError::Conflict` if the code is taken; nothing is written then.
    pub async fn create_voucher(&self, code: &str, discount: Decimal) -> Result<Voucher> {
        if self.voucher_repo.get_voucher_by_code(code).await?.is_some() {
            tracing::warn!(code = %code, "Voucher code already in use");
            return Err(AppError::conflict(VOUCHER_ALREADY_EXISTS));
        }

        let voucher = self.voucher_repo.create_voucher(code, discount).await?;

        tracing::info!(
            voucher_id = voucher.id,
            code = %voucher.code,
            discount = %voucher.discount,
            "Voucher created"
        );

        Ok(voucher)
    }

    /// Apply a voucher to a purchase amount.
    ///
    /// Unknown codes are a `Conflict` error. Amounts below 100 and used
    /// vouchers are not errors: they yield `applied = false` and write nothing.
    pub async fn apply_voucher(&self, code: &str, amount: Decimal) -> Result<ApplyVoucherResult> {
        let voucher = self
            .voucher_repo
            .get_voucher_by_code(code)
            .await?
            .ok_or_else(|| {
                tracing::warn!(code = %code, "Voucher not found");
                AppError::conflict(VOUCHER_DOES_NOT_EXIST)
            })?;

        if !voucher.is_eligible(amount) {
            tracing::debug!(
                voucher_id = voucher.id,
                used = voucher.used,
                amount = %amount,
                "Voucher not applicable"
            );
            return Ok(ApplyVoucherResult::not_applied());
        }

        // Conditional update: only one caller wins the unused -> used transition
        if !self.voucher_repo.use_voucher(voucher.id).await? {
            tracing::warn!(
                voucher_id = voucher.id,
                "Voucher was consumed concurrently"
            );
            return Ok(ApplyVoucherResult::not_applied());
        }

        let final_amount = voucher.discounted_amount(amount);

        tracing::info!(
            voucher_id = voucher.id,
            amount = %amount,
            discount = %voucher.discount,
            final_amount = %final_amount,
            "Voucher applied"
        );

        Ok(ApplyVoucherResult::applied(
            amount,
            voucher.discount,
            final_amount,
        ))
    }
}
