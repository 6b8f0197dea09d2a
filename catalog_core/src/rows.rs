use std::fmt;

use serde::Serialize;

use crate::{
    data::{PreparedCategory, Product, ProductId, Sex},
    join::CategoryIndex,
};

/// One row of the product table.
#[derive(Debug, PartialEq, Eq, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRow {
    pub product_id: ProductId,
    pub product_name: String,
    /// `None` if the product's category does not exist.
    pub category: Option<CategoryCell>,
    /// `None` if the product's category does not exist or has no owner.
    pub owner: Option<OwnerCell>,
}

#[derive(Debug, PartialEq, Eq, Clone, Serialize)]
pub struct CategoryCell {
    pub icon: String,
    pub title: String,
}

impl fmt::Display for CategoryCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} - {}", self.icon, self.title)
    }
}

#[derive(Debug, PartialEq, Eq, Clone, Serialize)]
pub struct OwnerCell {
    pub name: String,
    pub sex: Sex,
}

/// How the owner cell is highlighted. Female owners get their own style;
/// everyone else, including a missing owner, shares the default one.
#[derive(Debug, Default, PartialEq, Eq, Hash, Copy, Clone, Serialize)]
pub enum OwnerStyle {
    Danger,
    #[default]
    Link,
}

impl OwnerStyle {
    pub fn css_class(&self) -> &'static str {
        match self {
            OwnerStyle::Danger => "has-text-danger",
            OwnerStyle::Link => "has-text-link",
        }
    }
}

impl ProductRow {
    pub fn owner_style(&self) -> OwnerStyle {
        match &self.owner {
            Some(OwnerCell { sex: Sex::Female, .. }) => OwnerStyle::Danger,
            _ => OwnerStyle::Link,
        }
    }

    fn resolve(product: &Product, category: Option<&PreparedCategory>) -> Self {
        ProductRow {
            product_id: product.id,
            product_name: product.name.clone(),
            category: category.map(|category| CategoryCell {
                icon: category.icon().to_string(),
                title: category.title().to_string(),
            }),
            owner: category.and_then(|category| category.user.as_ref()).map(|user| OwnerCell {
                name: user.name.clone(),
                sex: user.sex,
            }),
        }
    }
}

/// Builds one row per visible product, in order. A product whose category is
/// missing still gets a row, with empty category and owner cells.
pub fn resolve_rows<'p>(
    visible: impl IntoIterator<Item = &'p Product>,
    prepared: &[PreparedCategory],
    index: &CategoryIndex,
) -> Vec<ProductRow> {
    visible
        .into_iter()
        .map(|product| ProductRow::resolve(product, index.get(prepared, product.category_id)))
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{
        data::{Category, CategoryId, User, UserId},
        join::prepare_categories,
    };

    fn fixtures() -> (Vec<User>, Vec<Product>, Vec<Category>) {
        let users = vec![
            User { id: UserId(1), name: "Roma".to_string(), sex: Sex::Male },
            User { id: UserId(2), name: "Anna".to_string(), sex: Sex::Female },
        ];
        let products = vec![
            Product { id: ProductId(1), name: "Milk".to_string(), category_id: CategoryId(2) },
            Product { id: ProductId(2), name: "Bread".to_string(), category_id: CategoryId(1) },
            Product { id: ProductId(10), name: "Ghost".to_string(), category_id: CategoryId(777) },
            Product { id: ProductId(11), name: "Stray".to_string(), category_id: CategoryId(5) },
        ];
        let categories = vec![
            Category {
                id: CategoryId(1),
                title: "Grocery".to_string(),
                icon: "🍞".to_string(),
                owner_id: UserId(2),
            },
            Category {
                id: CategoryId(2),
                title: "Drinks".to_string(),
                icon: "🍻".to_string(),
                owner_id: UserId(1),
            },
            Category {
                id: CategoryId(5),
                title: "Lost".to_string(),
                icon: "?".to_string(),
                owner_id: UserId(999),
            },
        ];
        (users, products, categories)
    }

    fn rows() -> Vec<ProductRow> {
        let (users, products, categories) = fixtures();
        let prepared = prepare_categories(&users, &products, &categories);
        let index = CategoryIndex::build(&prepared);
        resolve_rows(&products, &prepared, &index)
    }

    #[test]
    fn every_visible_product_gets_a_row() {
        let ids: Vec<_> = rows().iter().map(|row| row.product_id.0).collect();
        assert_eq!(ids, vec![1, 2, 10, 11]);
    }

    #[test]
    fn row_shows_category_and_owner() {
        let rows = rows();
        assert_eq!(rows[0].product_name, "Milk");
        assert_eq!(
            rows[0].category.as_ref().map(ToString::to_string).as_deref(),
            Some("🍻 - Drinks")
        );
        assert_eq!(rows[0].owner.as_ref().map(|owner| owner.name.as_str()), Some("Roma"));
        assert_eq!(rows[0].owner_style(), OwnerStyle::Link);

        assert_eq!(rows[1].owner.as_ref().map(|owner| owner.name.as_str()), Some("Anna"));
        assert_eq!(rows[1].owner_style(), OwnerStyle::Danger);
        assert_eq!(rows[1].owner_style().css_class(), "has-text-danger");
    }

    #[test]
    fn orphan_product_has_empty_cells() {
        let row = &rows()[2];
        assert_eq!(row.product_id, ProductId(10));
        assert_eq!(row.product_name, "Ghost");
        assert_eq!(row.category, None);
        assert_eq!(row.owner, None);
        assert_eq!(row.owner_style(), OwnerStyle::Link);
    }

    #[test]
    fn category_without_owner_has_empty_owner_cell() {
        let row = &rows()[3];
        assert_eq!(row.category.as_ref().map(|cell| cell.title.as_str()), Some("Lost"));
        assert_eq!(row.owner, None);
        assert_eq!(row.owner_style().css_class(), "has-text-link");
    }
}
