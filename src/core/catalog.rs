use crate::core::directory::DEFAULT_REVIEW_PAGE;
use crate::core::favorites::FavoritesStore;
use crate::core::{CompanyDirectory, KeyValueStore};
use crate::domain::model::{
    Company, CompanyDetails, CompanyListing, CompanyReviewsData, SearchOutcome,
};
use crate::utils::error::Result;

/// Application service joining the remote directory with local favorites.
pub struct CompanyCatalog<D: CompanyDirectory, S: KeyValueStore> {
    directory: D,
    favorites: FavoritesStore<S>,
}

impl<D: CompanyDirectory, S: KeyValueStore> CompanyCatalog<D, S> {
    pub fn new(directory: D, favorites: FavoritesStore<S>) -> Self {
        Self {
            directory,
            favorites,
        }
    }

    pub fn favorites(&self) -> &FavoritesStore<S> {
        &self.favorites
    }

    /// Searches by name and marks every hit that is already a favorite.
    /// A blank query returns an empty outcome without calling the API.
    pub async fn search(&self, query: &str) -> Result<SearchOutcome> {
        let query = query.trim();
        if query.is_empty() {
            tracing::debug!("Empty query, skipping search");
            return Ok(SearchOutcome::default());
        }

        let data = self.directory.search_companies(query).await?.into_data()?;
        let favorite_ids = self.favorites.favorite_ids().await;

        let listings = data
            .companies
            .into_iter()
            .map(|company| CompanyListing {
                is_favorite: favorite_ids.contains(&company.company_id),
                company,
            })
            .collect::<Vec<_>>();

        tracing::info!(
            "Search '{}' returned {} of {} companies",
            query,
            listings.len(),
            data.total_companies
        );

        Ok(SearchOutcome {
            listings,
            total_companies: data.total_companies,
        })
    }

    /// Resolves a domain to a company through the search endpoint. An exact
    /// domain match wins, otherwise the first hit is used.
    pub async fn company_by_domain(&self, domain: &str) -> Result<Option<Company>> {
        let domain = domain.trim();
        if domain.is_empty() {
            return Ok(None);
        }

        let mut companies = self
            .directory
            .search_companies(domain)
            .await?
            .into_data()?
            .companies;

        let index = companies
            .iter()
            .position(|c| c.domain.eq_ignore_ascii_case(domain))
            .unwrap_or(0);

        if companies.is_empty() {
            Ok(None)
        } else {
            Ok(Some(companies.swap_remove(index)))
        }
    }

    pub async fn reviews(&self, domain: &str, page: u32) -> Result<CompanyReviewsData> {
        self.directory
            .fetch_company_reviews(domain, page)
            .await?
            .into_data()
    }

    /// Company, first page of reviews and favorite flag for the details view.
    pub async fn company_details(&self, domain: &str) -> Result<Option<CompanyDetails>> {
        let Some(company) = self.company_by_domain(domain).await? else {
            tracing::info!("No company found for domain '{}'", domain);
            return Ok(None);
        };

        let reviews = self.reviews(&company.domain, DEFAULT_REVIEW_PAGE).await?;
        let is_favorite = self.favorites.is_favorite(&company.company_id).await;

        Ok(Some(CompanyDetails {
            company,
            reviews: reviews.reviews,
            total_reviews: reviews.total_reviews,
            is_favorite,
        }))
    }

    /// Returns the new favorite state, or `None` when the domain is unknown.
    pub async fn toggle_favorite(&self, domain: &str) -> Result<Option<(Company, bool)>> {
        match self.company_by_domain(domain).await? {
            Some(company) => {
                let now_favorite = self.favorites.toggle_favorite(&company).await?;
                Ok(Some((company, now_favorite)))
            }
            None => Ok(None),
        }
    }
}
