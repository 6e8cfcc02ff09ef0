pub mod catalog;
pub mod directory;
pub mod favorites;

pub use crate::domain::model::{Company, FavoriteCompany, Review};
pub use crate::domain::ports::{CompanyDirectory, ConfigProvider, KeyValueStore};
pub use crate::utils::error::Result;
