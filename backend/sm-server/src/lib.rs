pub mod activity_recorder;
pub mod api;
pub mod app_state;
pub mod cached_tenant_hierarchy;
pub mod error;
pub mod health;
pub mod logger;
pub mod maintenance;
pub mod middleware;
pub mod routes;

#[cfg(test)]
mod tests;

pub use activity_recorder::ActivityRecorder;
pub use api::{
    activity::{
        activity::list_activity, activity_dto::ActivityDto,
        activity_list_response::ActivityListResponse, list_activity_query::ListActivityQuery,
    },
    auth::{
        auth::{login, logout, me},
        login_request::LoginRequest,
        login_response::LoginResponse,
        me_response::MeResponse,
    },
    error::{ApiError, AuthRejection, Result as ApiResult},
    extractors::{authenticated::Authenticated, client_ip::ClientIp},
    success_response::SuccessResponse,
};
pub use app_state::AppState;
pub use cached_tenant_hierarchy::CachedTenantHierarchy;
pub use error::{Result as ServerErrorResult, ServerError};

pub use crate::routes::build_router;
