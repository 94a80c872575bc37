pub mod entities;
pub mod parse;
pub mod ports;
pub mod services;
