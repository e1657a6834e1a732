use async_trait::async_trait;
use rust_decimal::{Decimal, RoundingStrategy};
use sqlx::MySqlPool;

use crate::core::{AppError, Result};
use crate::modules::vouchers::models::{Voucher, DISCOUNT_SCALE};

/// Message returned when a code is already taken
pub const VOUCHER_ALREADY_EXISTS: &str = "Voucher already exist.";

/// Storage contract for vouchers
#[async_trait]
pub trait VoucherRepository: Send + Sync {
    /// Find a voucher by its unique code
    async fn get_voucher_by_code(&self, code: &str) -> Result<Option<Voucher>>;

    /// Persist a new, unused voucher and return it with its assigned id
    async fn create_voucher(&self, code: &str, discount: Decimal) -> Result<Voucher>;

    /// Mark a voucher as used.
    ///
    /// Returns `true` only for the call that moved the voucher from unused to
    /// used; `false` if it was already used or does not exist.
    async fn use_voucher(&self, id: i64) -> Result<bool>;
}

/// Round like MySQL does for the DECIMAL(5,2) column, so a created record
/// equals the row that was stored
pub(crate) fn round_to_column(discount: Decimal) -> Decimal {
    discount.round_dp_with_strategy(DISCOUNT_SCALE, RoundingStrategy::MidpointAwayFromZero)
}

/// MySQL-backed voucher repository
#[derive(Clone)]
pub struct MySqlVoucherRepository {
    pool: MySqlPool,
}

impl MySqlVoucherRepository {
    pub fn new(pool: MySqlPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VoucherRepository for MySqlVoucherRepository {
    async fn get_voucher_by_code(&self, code: &str) -> Result<Option<Voucher>> {
        let voucher = sqlx::query_as::<_, Voucher>(
            r#"
            SELECT id, code, discount, used
            FROM vouchers
            WHERE code = ?
            "#,
        )
        .bind(code)
        .fetch_optional(&self.pool)
        .await?;

        Ok(voucher)
    }

    async fn create_voucher(&self, code: &str, discount: Decimal) -> Result<Voucher> {
        let discount = round_to_column(discount);

        let result = sqlx::query(
            r#"
            INSERT INTO vouchers (code, discount, used)
            VALUES (?, ?, FALSE)
            "#,
        )
        .bind(code)
        .bind(discount)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            // A concurrent create for the same code loses on the unique key
            if let Some(db_err) = e.as_database_error() {
                if db_err.is_unique_violation() {
                    return AppError::conflict(VOUCHER_ALREADY_EXISTS);
                }
            }
            AppError::Database(e)
        })?;

        let id = i64::try_from(result.last_insert_id())
            .map_err(|_| AppError::internal("Voucher id out of range"))?;

        Ok(Voucher {
            id,
            code: code.to_string(),
            discount,
            used: false,
        })
    }

    async fn use_voucher(&self, id: i64) -> Result<bool> {
        let result = sqlx::query(
            r#"
            UPDATE vouchers
            SET used = TRUE
            WHERE id = ? AND used = FALSE
            "#,
        )
        .bind(id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }
}
