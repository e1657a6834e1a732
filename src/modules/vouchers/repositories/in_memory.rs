use std::collections::HashMap;

use async_trait::async_trait;
use rust_decimal::Decimal;
use tokio::sync::Mutex;

use super::voucher_repository::{VoucherRepository, VOUCHER_ALREADY_EXISTS};
use crate::core::{AppError, Result};
use crate::modules::vouchers::models::Voucher;

#[derive(Debug, Default)]
struct Inner {
    next_id: i64,
    by_code: HashMap<String, Voucher>,
}

/// Process-local voucher store.
///
/// Used for local runs without MySQL and as the store behind HTTP tests.
#[derive(Debug, Default)]
pub struct InMemoryVoucherRepository {
    inner: Mutex<Inner>,
}

impl InMemoryVoucherRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with existing vouchers, keeping their ids
    pub fn with_vouchers(vouchers: impl IntoIterator<Item = Voucher>) -> Self {
        let mut inner = Inner::default();
        for voucher in vouchers {
            inner.next_id = inner.next_id.max(voucher.id);
            inner.by_code.insert(voucher.code.clone(), voucher);
        }
        Self {
            inner: Mutex::new(inner),
        }
    }
}

#[async_trait]
impl VoucherRepository for InMemoryVoucherRepository {
    async fn get_voucher_by_code(&self, code: &str) -> Result<Option<Voucher>> {
        let inner = self.inner.lock().await;
        Ok(inner.by_code.get(code).cloned())
    }

    async fn create_voucher(&self, code: &str, discount: Decimal) -> Result<Voucher> {
        let mut inner = self.inner.lock().await;
        if inner.by_code.contains_key(code) {
            return Err(AppError::conflict(VOUCHER_ALREADY_EXISTS));
        }

        inner.next_id += 1;
        let voucher = Voucher {
            id: inner.next_id,
            code: code.to_string(),
            discount,
            used: false,
        };
        inner.by_code.insert(code.to_string(), voucher.clone());

        Ok(voucher)
    }

    async fn use_voucher(&self, id: i64) -> Result<bool> {
        let mut inner = self.inner.lock().await;
        match inner.by_code.values_mut().find(|v| v.id == id) {
            Some(voucher) if !voucher.used => {
                voucher.used = true;
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}
