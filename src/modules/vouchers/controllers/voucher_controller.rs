// HTTP handlers for voucher endpoints
//
// Endpoints:
// - POST /vouchers        - Create a voucher
// - POST /vouchers/apply  - Apply a voucher to a purchase amount

use std::sync::Arc;

use actix_web::{web, HttpResponse};

use crate::core::Result;
use crate::modules::vouchers::models::{ApplyVoucherRequest, CreateVoucherRequest};
use crate::modules::vouchers::services::VoucherService;

/// POST /vouchers
///
/// # Returns
/// - 201: Created voucher
/// - 409: Code already in use
/// - 422: Invalid code or discount
pub async fn create_voucher(
    service: web::Data<Arc<VoucherService>>,
    request: web::Json<CreateVoucherRequest>,
) -> Result<HttpResponse> {
    request.validate()?;

    let voucher = service
        .create_voucher(request.code.trim(), request.discount)
        .await?;

    Ok(HttpResponse::Created().json(voucher))
}

/// POST /vouchers/apply
///
/// # Returns
/// - 200: `{"applied": false}` or the applied amounts
/// - 409: Unknown code
/// - 422: Invalid code or amount
pub async fn apply_voucher(
    service: web::Data<Arc<VoucherService>>,
    request: web::Json<ApplyVoucherRequest>,
) -> Result<HttpResponse> {
    request.validate()?;

    let result = service
        .apply_voucher(request.code.trim(), request.amount)
        .await?;

    Ok(HttpResponse::Ok().json(result))
}

/// Configure voucher routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/vouchers")
            .route("", web::post().to(create_voucher))
            .route("/apply", web::post().to(apply_voucher)),
    );
}
