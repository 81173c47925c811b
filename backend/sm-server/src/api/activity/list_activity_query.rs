use serde::Deserialize;

pub const DEFAULT_ACTIVITY_LIMIT: i64 = 20;
pub const MAX_ACTIVITY_LIMIT: i64 = 100;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListActivityQuery {
    pub limit: Option<i64>,
}
