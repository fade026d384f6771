mod paging;
mod secret;
pub mod uri;

pub use paging::PagingSettings;
pub use secret::Secret;
pub use uri::ConnectionUri;
