pub mod common;
pub mod extraction;
pub mod health;
pub mod mealplan;
pub mod nutrition;
pub mod pantry;
pub mod recipes;
pub mod session;
pub mod storage;
pub mod user;
