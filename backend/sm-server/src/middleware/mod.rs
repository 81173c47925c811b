pub mod auth_gate;

pub use auth_gate::require_auth;
