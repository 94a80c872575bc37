pub mod extraction;
pub mod health;
pub mod mealplan;
pub mod nutrition;
pub mod pantry;
pub mod recipes;
pub mod server;
