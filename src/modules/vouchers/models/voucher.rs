// Voucher model and request/response DTOs
//
// A voucher is a single-use percentage discount identified by a unique code.
// `used` only ever moves from false to true.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use crate::core::{AppError, Result};

/// Purchases below this amount never consume a voucher
pub const MIN_APPLY_AMOUNT: Decimal = Decimal::ONE_HUNDRED;

/// Decimal places stored for a discount (DECIMAL(5,2))
pub const DISCOUNT_SCALE: u32 = 2;

/// Voucher entity as stored
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, FromRow)]
pub struct Voucher {
    pub id: i64,
    pub code: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub discount: Decimal,
    pub used: bool,
}

impl Voucher {
    /// A voucher may be applied only while unused and only to amounts of at least 100
    pub fn is_eligible(&self, amount: Decimal) -> bool {
        !self.used && amount >= MIN_APPLY_AMOUNT
    }

    /// amount - amount * (discount / 100)
    pub fn discounted_amount(&self, amount: Decimal) -> Decimal {
        (amount - amount * (self.discount / Decimal::ONE_HUNDRED)).normalize()
    }
}

/// Outcome of applying a voucher.
///
/// Ineligible applications are a normal result with `applied = false` and
/// no amounts; they serialize as `{"applied": false}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplyVoucherResult {
    pub applied: bool,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::arbitrary_precision_option"
    )]
    pub amount: Option<Decimal>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::arbitrary_precision_option"
    )]
    pub discount: Option<Decimal>,
    #[serde(
        default,
        skip_serializing_if = "Option::is_none",
        with = "rust_decimal::serde::arbitrary_precision_option"
    )]
    pub final_amount: Option<Decimal>,
}

impl ApplyVoucherResult {
    pub fn not_applied() -> Self {
        Self {
            applied: false,
            amount: None,
            discount: None,
            final_amount: None,
        }
    }

    pub fn applied(amount: Decimal, discount: Decimal, final_amount: Decimal) -> Self {
        Self {
            applied: true,
            amount: Some(amount),
            discount: Some(discount),
            final_amount: Some(final_amount),
        }
    }
}

/// Request body for POST /vouchers
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateVoucherRequest {
    pub code: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub discount: Decimal,
}

impl CreateVoucherRequest {
    pub fn validate(&self) -> Result<()> {
        if self.code.trim().is_empty() {
            return Err(AppError::validation("Voucher code cannot be empty"));
        }

        if self.discount < Decimal::ONE || self.discount > Decimal::ONE_HUNDRED {
            return Err(AppError::validation(
                "Discount must be between 1 and 100",
            ));
        }

        // The store would silently round anything finer
        if self.discount.normalize().scale() > DISCOUNT_SCALE {
            return Err(AppError::validation(
                "Discount cannot have more than 2 decimal places",
            ));
        }

        Ok(())
    }
}

/// Request body for POST /vouchers/apply
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplyVoucherRequest {
    pub code: String,
    #[serde(with = "rust_decimal::serde::arbitrary_precision")]
    pub amount: Decimal,
}

impl ApplyVoucherRequest {
    pub fn validate(&self) -> Result<()> {
        if self.code.trim().is_empty() {
            return Err(AppError::validation("Voucher code cannot be empty"));
        }

        if self.amount < Decimal::ZERO {
            return Err(AppError::validation("Amount cannot be negative"));
        }

        Ok(())
    }
}
