use crate::ActivityDto;

use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ActivityListResponse {
    pub success: bool,
    pub tenant_id: i64,
    pub activities: Vec<ActivityDto>,
}
