mod application;
mod config;
mod environment;

pub use self::application::{CatalogItem, KeyInfo, SubscribedApi, Timestamp};
pub use self::config::{DEFAULT_PAGE_SIZE, DiscoverConfig, RemoteConfig};
pub use self::environment::Environment;
