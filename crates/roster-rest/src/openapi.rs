//! OpenAPI documentation configuration.

use crate::controllers::health_controller::{CheckResult, HealthResponse, ReadinessResponse};
use roster_core::{ErrorResponse, FieldError, UserId};
use roster_service::{CreateUserRequest, UpdateUserRequest, UserResponse};
use utoipa::OpenApi;

/// OpenAPI documentation for the Roster API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Roster API",
        version = "1.0.0",
        description = "User CRUD with a cached user list",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        )
    ),
    paths(
        crate::controllers::user_controller::list_users,
        crate::controllers::user_controller::create_user,
        crate::controllers::user_controller::update_user,
        crate::controllers::user_controller::delete_user,
        crate::controllers::health_controller::health_check,
        crate::controllers::health_controller::readiness_check,
        crate::controllers::health_controller::liveness_check,
    ),
    components(
        schemas(
            UserId,
            ErrorResponse,
            FieldError,
            CreateUserRequest,
            UpdateUserRequest,
            UserResponse,
            HealthResponse,
            ReadinessResponse,
            CheckResult,
        )
    ),
    tags(
        (name = "users", description = "User management and caching"),
        (name = "health", description = "Health check endpoints")
    )
)]
pub struct ApiDoc;
