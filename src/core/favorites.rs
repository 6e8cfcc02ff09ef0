use crate::core::KeyValueStore;
use crate::domain::model::{Company, FavoriteCompany};
use crate::utils::error::Result;
use chrono::Utc;
use std::collections::HashSet;
use tokio::sync::Mutex;

/// Storage slot holding the whole favorites collection as one JSON array.
pub const FAVORITES_KEY: &str = "favorite_companies";

/// User-local favorite companies, persisted under [`FAVORITES_KEY`].
///
/// Reads degrade to an empty list when the slot is unreadable; writes return
/// their errors. Every mutation is a read-modify-write of the full collection
/// performed while holding `write_lock`, so two mutations through the same
/// store never work from the same stale snapshot.
pub struct FavoritesStore<S: KeyValueStore> {
    storage: S,
    write_lock: Mutex<()>,
}

impl<S: KeyValueStore> FavoritesStore<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            write_lock: Mutex::new(()),
        }
    }

    pub fn storage(&self) -> &S {
        &self.storage
    }

    fn decode(raw: Option<String>) -> Result<Vec<FavoriteCompany>> {
        match raw {
            Some(raw) => Ok(serde_json::from_str(&raw)?),
            None => Ok(Vec::new()),
        }
    }

    /// 寫入路徑使用：讀取或解析失敗都往上拋，不覆寫無法解讀的資料
    async fn load_for_update(&self) -> Result<Vec<FavoriteCompany>> {
        let raw = self.storage.get_item(FAVORITES_KEY).await?;
        Self::decode(raw)
    }

    async fn persist(&self, favorites: &[FavoriteCompany]) -> Result<()> {
        let json = serde_json::to_string(favorites)?;
        self.storage.set_item(FAVORITES_KEY, &json).await
    }

    pub async fn get_favorites(&self) -> Vec<FavoriteCompany> {
        let raw = match self.storage.get_item(FAVORITES_KEY).await {
            Ok(raw) => raw,
            Err(e) => {
                tracing::error!("Error getting favorites: {}", e);
                return Vec::new();
            }
        };

        Self::decode(raw).unwrap_or_else(|e| {
            tracing::warn!("Stored favorites are unreadable, treating as empty: {}", e);
            Vec::new()
        })
    }

    /// Inserts `company` unless an entry with the same id already exists.
    /// Re-saving never refreshes the stored fields.
    pub async fn save_favorite(&self, company: FavoriteCompany) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        self.insert_locked(company)
            .await
            .inspect_err(|e| tracing::error!("Error saving favorite: {}", e))
    }

    async fn insert_locked(&self, company: FavoriteCompany) -> Result<()> {
        let mut favorites = self.load_for_update().await?;
        if favorites
            .iter()
            .any(|fav| fav.company_id == company.company_id)
        {
            tracing::debug!("Company {} is already a favorite", company.company_id);
            return Ok(());
        }

        tracing::debug!("Adding favorite {}", company.company_id);
        favorites.push(company);
        self.persist(&favorites).await
    }

    /// Drops every entry with `company_id` and writes the list back, even when
    /// nothing matched.
    pub async fn remove_favorite(&self, company_id: &str) -> Result<()> {
        let _guard = self.write_lock.lock().await;
        self.remove_locked(company_id)
            .await
            .inspect_err(|e| tracing::error!("Error removing favorite: {}", e))
    }

    async fn remove_locked(&self, company_id: &str) -> Result<()> {
        let mut favorites = self.load_for_update().await?;
        favorites.retain(|fav| fav.company_id != company_id);
        tracing::debug!("Removed favorite {}", company_id);
        self.persist(&favorites).await
    }

    pub async fn is_favorite(&self, company_id: &str) -> bool {
        self.get_favorites()
            .await
            .iter()
            .any(|fav| fav.company_id == company_id)
    }

    pub async fn favorite_ids(&self) -> HashSet<String> {
        self.get_favorites()
            .await
            .into_iter()
            .map(|fav| fav.company_id)
            .collect()
    }

    /// Flips the favorite state of `company` and returns the new state.
    pub async fn toggle_favorite(&self, company: &Company) -> Result<bool> {
        let _guard = self.write_lock.lock().await;
        let result: Result<bool> = async {
            let favorites = self.load_for_update().await?;
            if favorites
                .iter()
                .any(|fav| fav.company_id == company.company_id)
            {
                self.remove_locked(&company.company_id).await?;
                Ok(false)
            } else {
                self.insert_locked(FavoriteCompany::from_company(company, Utc::now()))
                    .await?;
                Ok(true)
            }
        }
        .await;

        result.inspect_err(|e| tracing::error!("Error toggling favorite: {}", e))
    }
}
