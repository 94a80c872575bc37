pub mod db;
pub mod extraction;
pub mod llm;
pub mod mealplan;
pub mod nutrition;
pub mod object_storage;
pub mod ocr;
pub mod pantry;
pub mod recipes;
pub mod session;
pub mod user;
