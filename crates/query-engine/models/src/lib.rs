//! The grid request data model: filtering, sorting and paging as sent by grid components.

pub mod filter;
pub mod list_params;
pub mod query;
pub mod sort;

pub use filter::{Filter, FilterNode, GridFilter, Logic, MalformedFilterNode};
pub use list_params::{ListParams, ListParamsError};
pub use query::QueryDescription;
pub use sort::{SortDirection, SortSpec};
