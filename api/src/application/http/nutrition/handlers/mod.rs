pub mod delete_log;
pub mod delete_target;
pub mod get_overview;
pub mod log_recipe;
pub mod put_target;
pub mod quick_log;
