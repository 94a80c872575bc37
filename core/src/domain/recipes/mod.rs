pub mod entities;
pub mod normalize;
pub mod ports;
pub mod services;
pub mod steps;
pub mod value_objects;
