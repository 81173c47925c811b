mod activity_log;
mod role;
