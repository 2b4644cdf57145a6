use axum::http::StatusCode;

/// Service banner
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Service is running", content_type = "text/plain", body = String)
    ),
    tag = ""
)]
pub async fn root() -> (StatusCode, &'static str) {
    (StatusCode::OK, "Faculty schedule API")
}
