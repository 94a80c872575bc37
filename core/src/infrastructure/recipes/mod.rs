pub mod mappers;
pub mod repositories;
pub mod spoonacular_client;
