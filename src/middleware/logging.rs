use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::time::Instant;
use tracing::{info, warn};

/// Failure description a handler attaches to its response for
/// `logging_middleware`.
#[derive(Clone, Debug)]
pub struct RequestFailure(pub String);

pub async fn logging_middleware(req: Request, next: Next) -> Response {
    let method = req.method().clone();
    let uri = req.uri().clone();
    let start = Instant::now();

    let response = next.run(req).await;

    let status = response.status();
    let elapsed = start.elapsed();
    match response.extensions().get::<RequestFailure>() {
        Some(RequestFailure(reason)) => warn!(
            method = %method,
            uri = %uri,
            status = %status,
            elapsed = ?elapsed,
            reason = %reason,
            "Failed to process request"
        ),
        None => info!(
            method = %method,
            uri = %uri,
            status = %status,
            elapsed = ?elapsed,
            "Processed request"
        ),
    }

    response
}

pub fn to_response<T: IntoResponse>(
    response: T,                   //The response that we are sending + StatusCode
    failure: Option<RequestFailure>, //What logging middleware should report
) -> Response {
    let mut response = response.into_response();

    if let Some(failure) = failure {
        response.extensions_mut().insert(failure);
    }

    response
}
