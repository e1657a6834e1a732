// Contract tests for the voucher HTTP API
//
// Runs the real routing, middleware and service against an in-memory store
// and checks status codes and JSON shapes for:
// - POST /vouchers
// - POST /vouchers/apply

#[path = "../helpers/mod.rs"]
mod helpers;

use actix_web::{http::StatusCode, test};
use helpers::*;
use rust_decimal_macros::dec;
use serde_json::{json, Value};
use vouchers::vouchers::{ApplyVoucherResult, Voucher};

#[actix_web::test]
async fn test_create_voucher_with_existing_code_is_rejected() {
    let app = test::init_service(test_app(seeded_service(vec![
        TestDataFactory::voucher(1, "a1a2a4", false),
    ])))
    .await;

    let req = test::TestRequest::post()
        .uri("/vouchers")
        .set_json(TestDataFactory::create_payload("a1a2a4", dec!(10)))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["message"], "Voucher already exist.");
    assert_eq!(body["error"]["type"], "conflict");
}

#[actix_web::test]
async fn test_create_voucher() {
    let app = test::init_service(test_app(seeded_service(vec![]))).await;

    let req = test::TestRequest::post()
        .uri("/vouchers")
        .set_json(TestDataFactory::create_payload("a1a2a4", dec!(10)))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::CREATED);

    let voucher: Voucher = test::read_body_json(resp).await;
    assert_eq!(voucher, TestDataFactory::voucher(1, "a1a2a4", false));
}

#[actix_web::test]
async fn test_apply_unknown_voucher_is_rejected() {
    let app = test::init_service(test_app(seeded_service(vec![]))).await;

    let req = test::TestRequest::post()
        .uri("/vouchers/apply")
        .set_json(TestDataFactory::apply_payload("a1a2a3", dec!(100)))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::CONFLICT);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["message"], "Voucher does not exist.");
    assert_eq!(body["error"]["type"], "conflict");
}

#[actix_web::test]
async fn test_apply_below_minimum_amount_is_not_applied() {
    let app = test::init_service(test_app(seeded_service(vec![
        TestDataFactory::voucher(1, "a1a2a4", false),
    ])))
    .await;

    let req = test::TestRequest::post()
        .uri("/vouchers/apply")
        .set_json(TestDataFactory::apply_payload("a1a2a4", dec!(99)))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body, serde_json::json!({ "applied": false }));
}

#[actix_web::test]
async fn test_apply_used_voucher_is_not_applied() {
    let app = test::init_service(test_app(seeded_service(vec![
        TestDataFactory::voucher(1, "a1a2a4", true),
    ])))
    .await;

    let req = test::TestRequest::post()
        .uri("/vouchers/apply")
        .set_json(TestDataFactory::apply_payload("a1a2a4", dec!(200)))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);

    let result: ApplyVoucherResult = test::read_body_json(resp).await;
    assert!(!result.applied);
}

#[actix_web::test]
async fn test_apply_valid_voucher() {
    let app = test::init_service(test_app(seeded_service(vec![
        TestDataFactory::voucher(1, "a1a2a4", false),
    ])))
    .await;

    let req = test::TestRequest::post()
        .uri("/vouchers/apply")
        .set_json(TestDataFactory::apply_payload("a1a2a4", dec!(200)))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);

    let result: ApplyVoucherResult = test::read_body_json(resp).await;
    assert!(result.applied);
    assert_eq!(result.amount, Some(dec!(200)));
    assert_eq!(result.discount, Some(dec!(10)));
    assert_eq!(result.final_amount, Some(dec!(180)));
}

#[actix_web::test]
async fn test_create_voucher_response_uses_json_numbers() {
    let app = test::init_service(test_app(seeded_service(vec![]))).await;

    let req = test::TestRequest::post()
        .uri("/vouchers")
        .set_json(json!({ "code": "a1a2a4", "discount": 10 }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::CREATED);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body,
        json!({ "id": 1, "code": "a1a2a4", "discount": 10, "used": false })
    );
}

#[actix_web::test]
async fn test_apply_voucher_response_uses_json_numbers() {
    let app = test::init_service(test_app(seeded_service(vec![
        TestDataFactory::voucher(1, "a1a2a4", false),
    ])))
    .await;

    let req = test::TestRequest::post()
        .uri("/vouchers/apply")
        .set_json(json!({ "code": "a1a2a4", "amount": 200 }))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(
        body,
        json!({ "applied": true, "amount": 200, "discount": 10, "finalAmount": 180 })
    );
}

#[actix_web::test]
async fn test_create_with_three_decimal_discount_is_unprocessable() {
    let app = test::init_service(test_app(seeded_service(vec![]))).await;

    let req = test::TestRequest::post()
        .uri("/vouchers")
        .set_json(TestDataFactory::create_payload("a1a2a4", dec!(12.345)))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["type"], "validation");
}

#[actix_web::test]
async fn test_voucher_is_single_use_across_requests() {
    let code = TestDataFactory::random_code();
    let app = test::init_service(test_app(seeded_service(vec![]))).await;

    let create = test::TestRequest::post()
        .uri("/vouchers")
        .set_json(TestDataFactory::create_payload(&code, dec!(25)))
        .to_request();
    assert_eq!(test::call_service(&app, create).await.status(), StatusCode::CREATED);

    let first = test::TestRequest::post()
        .uri("/vouchers/apply")
        .set_json(TestDataFactory::apply_payload(&code, dec!(400)))
        .to_request();
    let first: ApplyVoucherResult = test::call_and_read_body_json(&app, first).await;
    assert!(first.applied);
    assert_eq!(first.final_amount, Some(dec!(300)));

    let second = test::TestRequest::post()
        .uri("/vouchers/apply")
        .set_json(TestDataFactory::apply_payload(&code, dec!(400)))
        .to_request();
    let second: ApplyVoucherResult = test::call_and_read_body_json(&app, second).await;
    assert_eq!(second, ApplyVoucherResult::not_applied());
}

#[actix_web::test]
async fn test_concurrent_applications_apply_once() {
    let service = seeded_service(vec![TestDataFactory::voucher(1, "a1a2a4", false)]);

    let attempts = (0..8).map(|_| {
        let service = service.clone();
        async move { service.apply_voucher("a1a2a4", dec!(200)).await }
    });
    let results = futures_util::future::join_all(attempts).await;

    let applied = results
        .into_iter()
        .map(|r| r.expect("apply should not fail"))
        .filter(|r| r.applied)
        .count();
    assert_eq!(applied, 1);
}

#[actix_web::test]
async fn test_create_with_blank_code_is_unprocessable() {
    let app = test::init_service(test_app(seeded_service(vec![]))).await;

    let req = test::TestRequest::post()
        .uri("/vouchers")
        .set_json(TestDataFactory::create_payload("  ", dec!(10)))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

    let body: Value = test::read_body_json(resp).await;
    assert_eq!(body["error"]["type"], "validation");
}

#[actix_web::test]
async fn test_apply_with_negative_amount_is_unprocessable() {
    let app = test::init_service(test_app(seeded_service(vec![
        TestDataFactory::voucher(1, "a1a2a4", false),
    ])))
    .await;

    let req = test::TestRequest::post()
        .uri("/vouchers/apply")
        .set_json(TestDataFactory::apply_payload("a1a2a4", dec!(-5)))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[actix_web::test]
async fn test_response_carries_request_id() {
    let app = test::init_service(test_app(seeded_service(vec![]))).await;

    let req = test::TestRequest::get()
        .uri("/health")
        .insert_header(("X-Request-ID", "contract-1"))
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(resp.headers().get("x-request-id").unwrap(), "contract-1");
}
