pub mod delete_meal;
pub mod get_week;
pub mod schedule_meal;
