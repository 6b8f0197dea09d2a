use std::fmt;

use serde::{Deserialize, Serialize};

use super::category::CategoryId;

#[derive(Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Copy, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub u64);

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, PartialEq, Eq, Hash, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    /// The name shown in the table and matched by the search box, e.g. "Milk"
    pub name: String,
    /// The category that this product belongs to. Nothing guarantees that
    /// such a category exists.
    pub category_id: CategoryId,
}
