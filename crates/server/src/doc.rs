use utoipa::OpenApi;

/// API Documentation. Paths are registered by the router.
#[derive(OpenApi)]
#[openapi(
    tags(
        (name = "Sessions", description = "Teaching session scheduling and conflict checks"),
        (name = "Teachers", description = "Teacher and subject lookups for the session form"),
        (name = "Health", description = "Service health"),
    ),
    info(
        title = "Faculty Schedule API",
        version = "1.0.0",
        description = "Faculty teaching schedule API",
        license(
            name = "MIT OR Apache-2.0",
        )
    )
)]
pub struct ApiDoc;
