use std::{
    collections::HashSet,
    fs,
    hash::Hash,
    path::{Path, PathBuf},
};

use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::{info, warn};

use crate::data::{Category, CategoryId, Product, ProductId, User, UserId};

const BUNDLED_USERS: &str = include_str!("../fixtures/users.json");
const BUNDLED_PRODUCTS: &str = include_str!("../fixtures/products.json");
const BUNDLED_CATEGORIES: &str = include_str!("../fixtures/categories.json");

/// The three static collections that the catalog is built from. The order of
/// each collection is significant and is preserved by everything derived from
/// it.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct FixtureStore {
    pub users: Vec<User>,
    pub products: Vec<Product>,
    pub categories: Vec<Category>,
}

/// Names one of the three fixture collections, for error reporting.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Collection {
    Users,
    Products,
    Categories,
}

impl Collection {
    pub fn file_name(&self) -> &'static str {
        match self {
            Collection::Users => "users.json",
            Collection::Products => "products.json",
            Collection::Categories => "categories.json",
        }
    }
}

/// Error type for loading fixtures. Dangling references between collections
/// are not errors; only unreadable or unparseable input is.
#[derive(Debug, Error)]
pub enum FixtureError {
    #[error("Unable to read fixture file {path}.")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("The {} fixture is not valid JSON.", collection.file_name())]
    Json {
        collection: Collection,
        #[source]
        source: serde_json::Error,
    },
}

impl FixtureStore {
    /// Returns the fixtures compiled into the crate.
    pub fn bundled() -> Self {
        Self::from_json(BUNDLED_USERS, BUNDLED_PRODUCTS, BUNDLED_CATEGORIES)
            .expect("bundled fixtures should be valid")
    }

    pub fn from_json(users: &str, products: &str, categories: &str) -> Result<Self, FixtureError> {
        let store = FixtureStore {
            users: parse(Collection::Users, users)?,
            products: parse(Collection::Products, products)?,
            categories: parse(Collection::Categories, categories)?,
        };
        info!(
            users = store.users.len(),
            products = store.products.len(),
            categories = store.categories.len(),
            "loaded fixtures"
        );
        Ok(store)
    }

    /// Reads `users.json`, `products.json` and `categories.json` from the
    /// given directory.
    pub fn load_dir(dir: impl AsRef<Path>) -> Result<Self, FixtureError> {
        let dir = dir.as_ref();
        let read = |collection: Collection| {
            let path = dir.join(collection.file_name());
            fs::read_to_string(&path).map_err(|source| FixtureError::Io { path, source })
        };
        let users = read(Collection::Users)?;
        let products = read(Collection::Products)?;
        let categories = read(Collection::Categories)?;
        Self::from_json(&users, &products, &categories)
    }

    /// Looks for dangling references and duplicate ids. None of these are
    /// fatal; the join and the table tolerate all of them.
    pub fn integrity_report(&self) -> IntegrityReport {
        let user_ids: HashSet<_> = self.users.iter().map(|user| user.id).collect();
        let category_ids: HashSet<_> =
            self.categories.iter().map(|category| category.id).collect();

        IntegrityReport {
            categories_without_owner: self
                .categories
                .iter()
                .filter(|category| !user_ids.contains(&category.owner_id))
                .map(|category| category.id)
                .collect(),
            products_without_category: self
                .products
                .iter()
                .filter(|product| !category_ids.contains(&product.category_id))
                .map(|product| product.id)
                .collect(),
            duplicate_user_ids: duplicates(self.users.iter().map(|user| user.id)),
            duplicate_product_ids: duplicates(self.products.iter().map(|product| product.id)),
            duplicate_category_ids: duplicates(
                self.categories.iter().map(|category| category.id),
            ),
        }
    }
}

fn parse<T: DeserializeOwned>(collection: Collection, json: &str) -> Result<Vec<T>, FixtureError> {
    serde_json::from_str(json).map_err(|source| FixtureError::Json { collection, source })
}

// Returns every id that occurs more than once, in order of its second
// occurrence.
fn duplicates<I: Copy + Eq + Hash>(ids: impl Iterator<Item = I>) -> Vec<I> {
    let mut seen = HashSet::new();
    let mut reported = HashSet::new();
    ids.filter(|id| !seen.insert(*id) && reported.insert(*id)).collect()
}

/// Orphan records and duplicate ids found in a `FixtureStore`.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct IntegrityReport {
    pub categories_without_owner: Vec<CategoryId>,
    pub products_without_category: Vec<ProductId>,
    pub duplicate_user_ids: Vec<UserId>,
    pub duplicate_product_ids: Vec<ProductId>,
    pub duplicate_category_ids: Vec<CategoryId>,
}

impl IntegrityReport {
    pub fn is_clean(&self) -> bool {
        *self == IntegrityReport::default()
    }

    pub fn log(&self) {
        for id in &self.categories_without_owner {
            warn!(category = %id, "category owner matches no user");
        }
        for id in &self.products_without_category {
            warn!(product = %id, "product category matches no category");
        }
        for id in &self.duplicate_user_ids {
            warn!(user = %id, "duplicate user id");
        }
        for id in &self.duplicate_product_ids {
            warn!(product = %id, "duplicate product id");
        }
        for id in &self.duplicate_category_ids {
            warn!(category = %id, "duplicate category id");
        }
    }
}

#[cfg(test)]
mod test {
    use std::env;

    use super::*;

    #[test]
    fn bundled_fixtures_are_clean() {
        let store = FixtureStore::bundled();
        assert_eq!(store.users.len(), 4);
        assert_eq!(store.products.len(), 9);
        assert_eq!(store.categories.len(), 5);
        assert!(store.integrity_report().is_clean());
    }

    #[test]
    fn malformed_collection_is_named() {
        let err = FixtureStore::from_json("[]", "{ not json", "[]").unwrap_err();
        let FixtureError::Json { collection, .. } = &err else {
            panic!("expected a JSON error, got {err:?}");
        };
        assert_eq!(*collection, Collection::Products);
    }

    #[test]
    fn missing_directory_is_an_io_error() {
        let dir = env::temp_dir().join("catalog_core_fixtures_missing_dir");
        let err = FixtureStore::load_dir(&dir).unwrap_err();
        let FixtureError::Io { path, .. } = &err else {
            panic!("expected an IO error, got {err:?}");
        };
        assert_eq!(path, &dir.join("users.json"));
    }

    #[test]
    fn load_dir_reads_all_collections() {
        let dir = env::temp_dir().join(format!("catalog_core_fixtures_{}", std::process::id()));
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("users.json"), r#"[{ "id": 1, "name": "Ada", "sex": "f" }]"#).unwrap();
        fs::write(dir.join("products.json"), r#"[{ "id": 1, "name": "Tea", "categoryId": 1 }]"#)
            .unwrap();
        fs::write(
            dir.join("categories.json"),
            r#"[{ "id": 1, "title": "Drinks", "icon": "t", "ownerId": 1 }]"#,
        )
        .unwrap();

        let store = FixtureStore::load_dir(&dir).unwrap();
        fs::remove_dir_all(&dir).unwrap();

        assert_eq!(store.users[0].name, "Ada");
        assert_eq!(store.products[0].category_id, CategoryId(1));
        assert_eq!(store.categories[0].owner_id, UserId(1));
    }

    #[test]
    fn integrity_report_lists_orphans_and_duplicates() {
        let store = FixtureStore::from_json(
            r#"[{ "id": 1, "name": "Ada", "sex": "f" }, { "id": 1, "name": "Bob", "sex": "m" }]"#,
            r#"[
                { "id": 1, "name": "Tea", "categoryId": 1 },
                { "id": 10, "name": "Ghost", "categoryId": 777 },
                { "id": 10, "name": "Ghost again", "categoryId": 777 }
            ]"#,
            r#"[
                { "id": 1, "title": "Drinks", "icon": "t", "ownerId": 1 },
                { "id": 5, "title": "Lost", "icon": "?", "ownerId": 999 }
            ]"#,
        )
        .unwrap();

        let report = store.integrity_report();
        assert!(!report.is_clean());
        assert_eq!(report.categories_without_owner, vec![CategoryId(5)]);
        assert_eq!(report.products_without_category, vec![ProductId(10), ProductId(10)]);
        assert_eq!(report.duplicate_user_ids, vec![UserId(1)]);
        assert_eq!(report.duplicate_product_ids, vec![ProductId(10)]);
        assert!(report.duplicate_category_ids.is_empty());
    }
}
