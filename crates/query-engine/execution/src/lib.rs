//! Query execution against a PostgreSQL database.

pub mod connection;
pub mod error;
pub mod params;
pub mod query;
