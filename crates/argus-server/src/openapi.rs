use utoipa::OpenApi;

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Argus API",
        version = "0.1.0",
        description = "Screens candidate websites for digital-agency eligibility with an LLM verdict."
    ),
    paths(
        crate::routes::screen,
        crate::routes::health,
    ),
    components(schemas(
        crate::dto::ScreenRequest,
        crate::dto::ScreenResponse,
        crate::dto::HealthResponse,
        crate::dto::ErrorResponse,
    )),
    tags(
        (name = "screen", description = "Website eligibility screening"),
        (name = "system", description = "Health and system status"),
    )
)]
pub struct ApiDoc;
