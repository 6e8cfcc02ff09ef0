use crate::app::render;
use crate::config::Command;
use crate::core::catalog::CompanyCatalog;
use crate::core::favorites::FavoritesStore;
use crate::core::{CompanyDirectory, KeyValueStore};
use crate::domain::model::FavoriteCompany;
use crate::utils::error::{FinderError, Result};
use chrono::Utc;

/// Runs a command that only needs the favorites store.
pub async fn run_local<S: KeyValueStore>(
    favorites: &FavoritesStore<S>,
    command: &Command,
) -> Result<String> {
    match command {
        Command::Favorites => Ok(render::render_favorites(&favorites.get_favorites().await)),
        Command::Unfavorite { company_id } => {
            favorites.remove_favorite(company_id).await?;
            Ok(format!("Removed {} from favorites", company_id))
        }
        Command::Check { company_id } => {
            if favorites.is_favorite(company_id).await {
                Ok(format!("{} is a favorite", company_id))
            } else {
                Ok(format!("{} is not a favorite", company_id))
            }
        }
        other => Err(FinderError::ValidationError {
            message: format!("{:?} needs the review API", other),
        }),
    }
}

pub async fn run<D: CompanyDirectory, S: KeyValueStore>(
    catalog: &CompanyCatalog<D, S>,
    command: &Command,
) -> Result<String> {
    match command {
        Command::Search { query } => {
            let outcome = catalog.search(query).await?;
            Ok(render::render_search(query, &outcome))
        }
        Command::Show { domain } => match catalog.company_details(domain).await? {
            Some(details) => Ok(render::render_details(&details)),
            None => Ok(not_found(domain)),
        },
        Command::Reviews { domain, page } => {
            let data = catalog.reviews(domain, *page).await?;
            Ok(render::render_reviews(domain, *page, &data))
        }
        Command::Favorite { domain } => match catalog.company_by_domain(domain).await? {
            Some(company) => {
                catalog
                    .favorites()
                    .save_favorite(FavoriteCompany::from_company(&company, Utc::now()))
                    .await?;
                Ok(format!("♥ {} saved to favorites", company.name))
            }
            None => Ok(not_found(domain)),
        },
        Command::Toggle { domain } => match catalog.toggle_favorite(domain).await? {
            Some((company, true)) => Ok(format!("♥ {} saved to favorites", company.name)),
            Some((company, false)) => Ok(format!("{} removed from favorites", company.name)),
            None => Ok(not_found(domain)),
        },
        local => run_local(catalog.favorites(), local).await,
    }
}

fn not_found(domain: &str) -> String {
    format!("Company not found: {}", domain)
}
