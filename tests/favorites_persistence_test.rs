use anyhow::Result;
use chrono::{TimeZone, Utc};
use company_finder::core::favorites::FAVORITES_KEY;
use company_finder::core::{FavoriteCompany, KeyValueStore};
use company_finder::{FavoritesStore, FinderError, LocalStorage};
use std::sync::Arc;
use tempfile::TempDir;

fn favorite(id: &str) -> FavoriteCompany {
    FavoriteCompany {
        company_id: id.to_string(),
        name: format!("Company {}", id),
        domain: format!("{}.example.com", id.to_lowercase()),
        rating: 4.2,
        review_count: 1500,
        trust_score: 4.1,
        website: format!("https://{}.example.com", id.to_lowercase()),
        categories: Vec::new(),
        date_added: Utc.with_ymd_and_hms(2024, 6, 1, 9, 30, 0).unwrap(),
    }
}

fn storage_in(temp_dir: &TempDir) -> LocalStorage {
    LocalStorage::new(temp_dir.path().to_string_lossy().into_owned())
}

/// 收藏在重新開啟 store 之後仍然存在
#[tokio::test]
async fn test_favorites_survive_restart() -> Result<()> {
    let temp_dir = TempDir::new()?;

    {
        let store = FavoritesStore::new(storage_in(&temp_dir));
        store.save_favorite(favorite("A")).await?;
        store.save_favorite(favorite("B")).await?;
        store.remove_favorite("A").await?;
    }

    let reopened = FavoritesStore::new(storage_in(&temp_dir));
    let favorites = reopened.get_favorites().await;

    assert_eq!(favorites, vec![favorite("B")]);
    assert!(temp_dir.path().join("favorite_companies.json").exists());
    Ok(())
}

#[tokio::test]
async fn test_reads_collection_written_by_mobile_client() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let storage = storage_in(&temp_dir);
    storage
        .set_item(
            FAVORITES_KEY,
            r#"[{"company_id":"5f1","name":"Acme","domain":"acme.com","rating":4.5,
                 "review_count":321,"trust_score":4.4,"website":"https://acme.com",
                 "categories":[{"id":"shop","name":"Shop"}],
                 "dateAdded":"2024-04-20T18:25:43.511Z"}]"#,
        )
        .await?;

    let store = FavoritesStore::new(storage);

    assert!(store.is_favorite("5f1").await);
    let favorites = store.get_favorites().await;
    assert_eq!(favorites[0].categories[0].id, "shop");
    assert_eq!(
        favorites[0].date_added.format("%Y-%m-%d").to_string(),
        "2024-04-20"
    );
    Ok(())
}

#[tokio::test]
async fn test_corrupt_file_reads_as_empty_and_is_left_untouched() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let slot = temp_dir.path().join("favorite_companies.json");
    std::fs::write(&slot, "\u{0}garbage")?;

    let store = FavoritesStore::new(storage_in(&temp_dir));

    assert!(store.get_favorites().await.is_empty());
    assert!(!store.is_favorite("A").await);

    assert!(matches!(
        store.save_favorite(favorite("A")).await,
        Err(FinderError::SerializationError(_))
    ));
    assert!(store.remove_favorite("never-favorited").await.is_err());
    assert_eq!(std::fs::read_to_string(&slot)?, "\u{0}garbage");
    Ok(())
}

#[tokio::test]
async fn test_unwritable_directory_fails_writes_but_not_reads() -> Result<()> {
    let temp_dir = TempDir::new()?;
    // data_dir 指向一個檔案，建立目錄會失敗
    let blocker = temp_dir.path().join("not-a-dir");
    std::fs::write(&blocker, "x")?;
    let store = FavoritesStore::new(LocalStorage::new(
        blocker.join("nested").to_string_lossy().into_owned(),
    ));

    assert!(store.get_favorites().await.is_empty());
    assert!(store.save_favorite(favorite("A")).await.is_err());
    Ok(())
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_rapid_toggles_are_serialized() -> Result<()> {
    let temp_dir = TempDir::new()?;
    let store = Arc::new(FavoritesStore::new(storage_in(&temp_dir)));
    store.save_favorite(favorite("Y")).await?;

    let mut handles = Vec::new();
    for id in ["X1", "X2", "X3", "X4"] {
        let store = Arc::clone(&store);
        handles.push(tokio::spawn(
            async move { store.save_favorite(favorite(id)).await },
        ));
    }
    {
        let store = Arc::clone(&store);
        handles.push(tokio::spawn(async move { store.remove_favorite("Y").await }));
    }
    for handle in handles {
        handle.await??;
    }

    let mut ids: Vec<String> = store
        .get_favorites()
        .await
        .into_iter()
        .map(|f| f.company_id)
        .collect();
    ids.sort();
    assert_eq!(ids, vec!["X1", "X2", "X3", "X4"]);
    Ok(())
}
