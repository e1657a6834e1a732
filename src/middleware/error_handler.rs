use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    error::JsonPayloadError,
    web, Error, HttpRequest,
};
use futures_util::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::rc::Rc;

use super::request_id::request_id;
use crate::core::AppError;

/// Middleware that logs every request that ended in an error response
pub struct ErrorHandler;

impl<S, B> Transform<S, ServiceRequest> for ErrorHandler
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = ErrorHandlerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ErrorHandlerMiddleware {
            service: Rc::new(service),
        }))
    }
}

pub struct ErrorHandlerMiddleware<S> {
    service: Rc<S>,
}

impl<S, B> Service<ServiceRequest> for ErrorHandlerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error> + 'static,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let service = self.service.clone();

        Box::pin(async move {
            let result = service.call(req).await;

            match &result {
                Ok(res) => log_error(res),
                Err(err) => tracing::error!("Request error: {:?}", err),
            }

            result
        })
    }
}

/// Log the error attached to a response, if any
pub fn log_error<B>(res: &ServiceResponse<B>) {
    let Some(err) = res.response().error() else {
        return;
    };

    let status = res.status();
    let request_id = request_id(res.request()).unwrap_or_default();
    let path = res.request().path();
    if status.is_server_error() {
        tracing::error!(request_id = %request_id, status = %status, path = %path, "{}", err);
    } else {
        tracing::warn!(request_id = %request_id, status = %status, path = %path, "{}", err);
    }
}

/// Render malformed JSON bodies with the application error format
pub fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> Error {
    AppError::validation(err.to_string()).into()
}

/// JSON extractor configuration used by all routes
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(json_error_handler)
}
