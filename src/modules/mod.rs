use actix_web::web;

pub mod health;
pub mod vouchers;

/// Register all HTTP routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.configure(health::configure)
        .configure(vouchers::configure);
}
