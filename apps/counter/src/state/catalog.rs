//! # Catalog Loading
//!
//! The one asynchronous boundary of the counter: reading the menu file.
//!
//! ```text
//! menu-data.json ──► tokio::fs::read_to_string ──► Catalog::from_json ──► Catalog
//!                          │                              │
//!                          ▼                              ▼
//!                      IoError                      CatalogError
//! ```
//!
//! Any failure here is terminal; the command loop never starts without a
//! catalog.

use std::path::Path;

use havir_core::{Catalog, CurrencyFormat};
use tracing::{debug, info};

use crate::error::{AppError, ErrorCode};

/// Reads and validates the menu file.
///
/// A file that parses but has no entries is refused: the counter would have
/// nothing to sell.
pub async fn load_catalog(path: &Path, currency: &CurrencyFormat) -> Result<Catalog, AppError> {
    debug!(path = %path.display(), "Reading menu file");

    let text = tokio::fs::read_to_string(path).await.map_err(|e| {
        AppError::new(
            ErrorCode::IoError,
            format!("Cannot read menu file {}: {}", path.display(), e),
        )
    })?;

    let catalog = Catalog::from_json(&text, currency)?;
    if catalog.is_empty() {
        return Err(AppError::new(
            ErrorCode::CatalogError,
            format!("Menu file {} has no entries", path.display()),
        ));
    }

    info!(
        path = %path.display(),
        categories = catalog.categories().len(),
        entries = catalog.len(),
        "Catalog loaded"
    );

    Ok(catalog)
}

#[cfg(test)]
mod tests {
    use super::*;
    use havir_core::EntryId;
    use std::path::PathBuf;
    use uuid::Uuid;

    async fn write_temp(contents: &str) -> PathBuf {
        let path = std::env::temp_dir().join(format!("havir-menu-{}.json", Uuid::new_v4()));
        tokio::fs::write(&path, contents).await.unwrap();
        path
    }

    #[tokio::test]
    async fn test_load_catalog() {
        let path = write_temp(
            r#"{"Drinks": [{"id": 1, "name": "Tea", "price": 20000}],
                "Food": [{"id": "k2", "name": "Kebab", "price": 150000}]}"#,
        )
        .await;

        let catalog = load_catalog(&path, &CurrencyFormat::default()).await.unwrap();
        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.category_names().collect::<Vec<_>>(), vec!["Drinks", "Food"]);
        assert!(catalog.contains(&EntryId::from("k2")));

        tokio::fs::remove_file(&path).await.unwrap();
    }

    #[tokio::test]
    async fn test_missing_file() {
        let path = std::env::temp_dir().join(format!("havir-missing-{}.json", Uuid::new_v4()));
        let err = load_catalog(&path, &CurrencyFormat::default()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::IoError);
    }

    #[tokio::test]
    async fn test_malformed_file() {
        let path = write_temp("{ not json").await;
        let err = load_catalog(&path, &CurrencyFormat::default()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::CatalogError);

        tokio::fs::remove_file(&path).await.unwrap();
    }

    #[tokio::test]
    async fn test_empty_catalog_is_refused() {
        let path = write_temp(r#"{"Drinks": []}"#).await;
        let err = load_catalog(&path, &CurrencyFormat::default()).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::CatalogError);
        assert!(err.message.contains("no entries"));

        tokio::fs::remove_file(&path).await.unwrap();
    }
}
