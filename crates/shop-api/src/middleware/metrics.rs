//! 요청 메트릭 수집 미들웨어.
//!
//! 모든 요청의 횟수, 응답 상태, 지속 시간을 기록합니다.

use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

use crate::metrics::{
    normalize_path, record_http_duration, record_http_request, record_http_response,
};

/// 요청/응답 메트릭을 기록하는 미들웨어.
pub async fn metrics_layer(request: Request, next: Next) -> Response {
    let method = request.method().to_string();
    let path = normalize_path(request.uri().path());
    let start = Instant::now();

    record_http_request(&method, &path);

    let response = next.run(request).await;

    record_http_duration(&method, &path, start.elapsed().as_secs_f64());
    record_http_response(&method, &path, response.status().as_u16());

    response
}
