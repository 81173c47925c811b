#[allow(clippy::module_inception)]
pub mod activity;
pub mod activity_dto;
pub mod activity_list_response;
pub mod list_activity_query;
