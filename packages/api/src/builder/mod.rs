//! Fluent construction of API services

pub mod core;

pub use self::core::ApiBuilder;
