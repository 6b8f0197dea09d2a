use std::fmt;

use serde::{Deserialize, Serialize};

use super::{
    product::Product,
    user::{User, UserId},
};

#[derive(Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Copy, Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CategoryId(pub u64);

impl fmt::Display for CategoryId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Debug, PartialEq, Eq, Hash, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: CategoryId,
    /// A short description of the category, e.g. "Grocery"
    pub title: String,
    /// A glyph displayed before the title, usually a single emoji.
    pub icon: String,
    /// The user that owns this category. Nothing guarantees that such a user
    /// exists.
    pub owner_id: UserId,
}

/// A category enriched with its resolved owner and the products that belong
/// to it. Serializes as the category's own fields plus `user` and `products`.
#[derive(Debug, PartialEq, Eq, Clone, Serialize)]
pub struct PreparedCategory {
    #[serde(flatten)]
    pub category: Category,
    /// The owner of the category, or `None` if `owner_id` matches no user.
    pub user: Option<User>,
    /// The products of the category in fixture order. May be empty.
    pub products: Vec<Product>,
}

impl PreparedCategory {
    pub fn id(&self) -> CategoryId {
        self.category.id
    }

    pub fn title(&self) -> &str {
        &self.category.title
    }

    pub fn icon(&self) -> &str {
        &self.category.icon
    }

    pub fn owner_id(&self) -> UserId {
        self.category.owner_id
    }
}
