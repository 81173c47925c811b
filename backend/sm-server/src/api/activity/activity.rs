use crate::api::activity::list_activity_query::{DEFAULT_ACTIVITY_LIMIT, MAX_ACTIVITY_LIMIT};
use crate::{
    ActivityDto, ActivityListResponse, ApiError, ApiResult, AppState, Authenticated,
    ListActivityQuery,
};

use sm_core::Role;
use sm_db::ActivityLogRepository;

use std::panic::Location;

use axum::{
    Json,
    extract::{Query, State},
};
use error_location::ErrorLocation;

/// GET /api/v1/activity?limit=N
///
/// Recent audit entries for the caller's tenant. Staff administrators only.
pub async fn list_activity(
    State(state): State<AppState>,
    Authenticated(ctx): Authenticated,
    Query(query): Query<ListActivityQuery>,
) -> ApiResult<Json<ActivityListResponse>> {
    let limit = query.limit.unwrap_or(DEFAULT_ACTIVITY_LIMIT);
    if !(1..=MAX_ACTIVITY_LIMIT).contains(&limit) {
        return Err(ApiError::validation(
            format!("limit must be between 1 and {MAX_ACTIVITY_LIMIT}"),
            "limit",
        ));
    }

    let allowed = matches!(
        ctx.parsed_role(),
        Some(Role::Admin | Role::Principal | Role::SubAdmin | Role::SuperAdmin)
    );
    if !allowed {
        return Err(ApiError::Forbidden {
            message: "Activity log is restricted to administrators".to_string(),
            location: ErrorLocation::from(Location::caller()),
        });
    }

    let tenant_id = state.resolver.resolve_tenant_id(&ctx).await;
    let logs = ActivityLogRepository::find_by_tenant(&state.pool, tenant_id, limit).await?;

    Ok(Json(ActivityListResponse {
        success: true,
        tenant_id,
        activities: logs.into_iter().map(ActivityDto::from).collect(),
    }))
}
