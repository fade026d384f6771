//! Translate a grid query description into a SQL fragment to be appended to a base statement.

pub mod query;
