#[cfg(feature = "cli")]
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use config::cli::LocalStorage;
pub use config::toml_config::AppConfig;
pub use core::{
    catalog::CompanyCatalog, directory::DirectoryClient, favorites::FavoritesStore,
};
pub use utils::error::{FinderError, Result};
