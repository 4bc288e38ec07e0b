//! # Menu Catalog
//!
//! The static, read-only menu grouped by category.
//!
//! ## Menu File Format
//! ```json
//! {
//!   "Drinks": [
//!     { "id": 1, "name": "Tea", "price": 20000, "category": "Drinks" },
//!     { "id": "espresso", "name": "Espresso", "price": 45000 }
//!   ],
//!   "Breakfast": [ ... ]
//! }
//! ```
//!
//! - Categories and entries keep the order they have in the file.
//! - `id` may be an integer or a string; it must be unique across the file.
//! - `category` is optional and defaults to the enclosing key.
//!
//! ## Lifecycle
//! ```text
//! menu-data.json ──► Catalog::from_json ──► Catalog (immutable)
//!                          │                      │
//!                    CatalogError            &Catalog borrowed by
//!                  (fatal at startup)         InvoiceEngine<'c>
//! ```
//!
//! This module only parses text; reading the file is the application's job.

use serde::Deserialize;
use serde_json::{Number, Value};
use std::collections::HashMap;

use crate::error::CatalogError;
use crate::locale::CurrencyFormat;
use crate::types::{EntryId, MenuEntry};
use crate::validation::{price_to_minor, validate_entry_id, validate_entry_name};

// =============================================================================
// Category
// =============================================================================

/// A named group of menu entries, in display order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Category {
    name: String,
    entries: Vec<MenuEntry>,
}

impl Category {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }
}

// =============================================================================
// Catalog
// =============================================================================

/// The immutable menu.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    categories: Vec<Category>,
    /// Entry id → (category index, entry index).
    index: HashMap<EntryId, (usize, usize)>,
}

/// One entry as written in the menu file.
#[derive(Debug, Deserialize)]
struct RawEntry {
    id: RawId,
    name: String,
    price: Number,
    #[serde(default)]
    category: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum RawId {
    Number(u64),
    Text(String),
}

impl From<RawId> for EntryId {
    fn from(raw: RawId) -> Self {
        match raw {
            RawId::Number(n) => EntryId::from(n),
            RawId::Text(s) => EntryId::from(s),
        }
    }
}

impl Catalog {
    /// Parses and validates a menu file.
    ///
    /// Prices are converted into minor units of `currency`.
    ///
    /// ## Example
    /// ```rust
    /// use havir_core::catalog::Catalog;
    /// use havir_core::locale::CurrencyFormat;
    /// use havir_core::types::EntryId;
    ///
    /// let json = r#"{"Drinks": [{"id": 1, "name": "Tea", "price": 20000}]}"#;
    /// let catalog = Catalog::from_json(json, &CurrencyFormat::default()).unwrap();
    ///
    /// let tea = catalog.get(&EntryId::from(1u64)).unwrap();
    /// assert_eq!(tea.price.minor(), 20_000);
    /// assert_eq!(tea.category, "Drinks");
    /// ```
    pub fn from_json(text: &str, currency: &CurrencyFormat) -> Result<Self, CatalogError> {
        let root: Value = serde_json::from_str(text)?;
        let Value::Object(map) = root else {
            return Err(CatalogError::NotAnObject);
        };

        let mut categories = Vec::with_capacity(map.len());
        for (category, value) in map {
            let Value::Array(items) = value else {
                return Err(CatalogError::CategoryNotList { category });
            };

            let mut entries = Vec::with_capacity(items.len());
            for (index, item) in items.into_iter().enumerate() {
                entries.push(parse_entry(&category, index, item, currency)?);
            }
            categories.push((category, entries));
        }

        Catalog::new(categories)
    }

    /// Builds a catalog from already-typed entries.
    ///
    /// Fails with [`CatalogError::DuplicateId`] when two entries share an id.
    pub fn new(categories: Vec<(String, Vec<MenuEntry>)>) -> Result<Self, CatalogError> {
        let mut index = HashMap::new();
        let mut built = Vec::with_capacity(categories.len());

        for (c, (name, entries)) in categories.into_iter().enumerate() {
            for (e, entry) in entries.iter().enumerate() {
                if index.insert(entry.id.clone(), (c, e)).is_some() {
                    return Err(CatalogError::DuplicateId(entry.id.clone()));
                }
            }
            built.push(Category { name, entries });
        }

        Ok(Catalog {
            categories: built,
            index,
        })
    }

    /// Looks up an entry by id.
    pub fn get(&self, id: &EntryId) -> Option<&MenuEntry> {
        let &(c, e) = self.index.get(id)?;
        self.categories.get(c)?.entries.get(e)
    }

    /// Whether `id` names a catalog entry.
    pub fn contains(&self, id: &EntryId) -> bool {
        self.index.contains_key(id)
    }

    /// All categories in file order.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// Category names in file order.
    pub fn category_names(&self) -> impl Iterator<Item = &str> {
        self.categories.iter().map(|c| c.name.as_str())
    }

    /// Finds a category by exact name.
    pub fn category(&self, name: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.name == name)
    }

    /// Entries of one category, or `None` if there is no such category.
    pub fn entries(&self, category: &str) -> Option<&[MenuEntry]> {
        self.category(category).map(Category::entries)
    }

    /// The category shown when the counter starts.
    pub fn first_category(&self) -> Option<&Category> {
        self.categories.first()
    }

    /// Total number of entries across all categories.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }
}

fn parse_entry(
    category: &str,
    index: usize,
    item: Value,
    currency: &CurrencyFormat,
) -> Result<MenuEntry, CatalogError> {
    let invalid = |reason: String| CatalogError::InvalidEntry {
        category: category.to_string(),
        index,
        reason,
    };

    let raw: RawEntry = serde_json::from_value(item).map_err(|e| invalid(e.to_string()))?;
    let id = EntryId::from(raw.id);

    validate_entry_id(id.as_str()).map_err(|e| invalid(e.to_string()))?;
    validate_entry_name(&raw.name).map_err(|e| invalid(e.to_string()))?;
    let price = price_to_minor(&raw.price, currency).map_err(|e| invalid(e.to_string()))?;

    let category = raw
        .category
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| category.to_string());

    Ok(MenuEntry {
        id,
        name: raw.name.trim().to_string(),
        price,
        category,
    })
}

// =============================================================================
// Unit Tests
// =============================================================================
