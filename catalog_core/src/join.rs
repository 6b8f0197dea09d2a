use std::collections::HashMap;

use crate::data::{Category, CategoryId, PreparedCategory, Product, User, UserId};

/// Attaches to each category its owner and its products, keeping the order of
/// `categories`. The owner is the first user whose id equals the category's
/// `owner_id`, or `None` if there is none. The products are those whose
/// `category_id` equals the category's id, in the order of `products`.
///
/// Products that belong to no category are left out of every list. The inputs
/// are not modified.
pub fn prepare_categories(
    users: &[User],
    products: &[Product],
    categories: &[Category],
) -> Vec<PreparedCategory> {
    let mut users_by_id: HashMap<UserId, &User> = HashMap::with_capacity(users.len());
    for user in users {
        // the first user with a given id wins
        users_by_id.entry(user.id).or_insert(user);
    }

    let mut products_by_category: HashMap<CategoryId, Vec<Product>> = HashMap::new();
    for product in products {
        products_by_category.entry(product.category_id).or_default().push(product.clone());
    }

    categories
        .iter()
        .map(|category| PreparedCategory {
            category: category.clone(),
            user: users_by_id.get(&category.owner_id).map(|&user| user.clone()),
            products: products_by_category.get(&category.id).cloned().unwrap_or_default(),
        })
        .collect()
}

/// Maps a category id to the position of its `PreparedCategory`, so that each
/// table row can find its category without scanning. If several categories
/// share an id, the first one wins.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CategoryIndex {
    positions: HashMap<CategoryId, usize>,
}

impl CategoryIndex {
    pub fn build(prepared: &[PreparedCategory]) -> Self {
        let mut positions = HashMap::with_capacity(prepared.len());
        for (position, category) in prepared.iter().enumerate() {
            positions.entry(category.id()).or_insert(position);
        }
        Self { positions }
    }

    /// Looks up the category with the given id. `prepared` must be the slice
    /// that this index was built from.
    pub fn get<'p>(
        &self,
        prepared: &'p [PreparedCategory],
        id: CategoryId,
    ) -> Option<&'p PreparedCategory> {
        self.positions.get(&id).and_then(|&position| prepared.get(position))
    }

    pub fn len(&self) -> usize {
        self.positions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.positions.is_empty()
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::data::{ProductId, Sex};

    fn user(id: u64, name: &str, sex: Sex) -> User {
        User { id: UserId(id), name: name.to_string(), sex }
    }

    fn product(id: u64, name: &str, category_id: u64) -> Product {
        Product { id: ProductId(id), name: name.to_string(), category_id: CategoryId(category_id) }
    }

    fn category(id: u64, title: &str, owner_id: u64) -> Category {
        Category {
            id: CategoryId(id),
            title: title.to_string(),
            icon: "*".to_string(),
            owner_id: UserId(owner_id),
        }
    }

    fn product_ids(prepared: &PreparedCategory) -> Vec<u64> {
        prepared.products.iter().map(|product| product.id.0).collect()
    }

    #[test]
    fn products_are_grouped_in_input_order() {
        let users = vec![user(1, "Roma", Sex::Male), user(2, "Anna", Sex::Female)];
        let products = vec![
            product(1, "Milk", 2),
            product(2, "Bread", 1),
            product(3, "Eggs", 1),
            product(4, "Beer", 2),
            product(5, "Sugar", 1),
        ];
        let categories = vec![category(1, "Grocery", 2), category(2, "Drinks", 1)];

        let prepared = prepare_categories(&users, &products, &categories);

        assert_eq!(prepared.len(), 2);
        assert_eq!(prepared[0].title(), "Grocery");
        assert_eq!(product_ids(&prepared[0]), vec![2, 3, 5]);
        assert_eq!(prepared[0].user.as_ref().map(|user| user.name.as_str()), Some("Anna"));
        assert_eq!(prepared[1].title(), "Drinks");
        assert_eq!(product_ids(&prepared[1]), vec![1, 4]);
        assert_eq!(prepared[1].user, Some(users[0].clone()));
    }

    #[test]
    fn missing_owner_is_none() {
        let users = vec![user(1, "Roma", Sex::Male)];
        let categories = vec![category(5, "Lost", 999)];

        let prepared = prepare_categories(&users, &[], &categories);

        assert_eq!(prepared[0].id(), CategoryId(5));
        assert_eq!(prepared[0].owner_id(), UserId(999));
        assert_eq!(prepared[0].user, None);
        assert!(prepared[0].products.is_empty());
    }

    #[test]
    fn orphan_products_belong_to_no_category() {
        let categories = vec![category(1, "Grocery", 1), category(2, "Drinks", 1)];
        let products = vec![product(1, "Milk", 2), product(10, "Ghost", 777)];

        let prepared = prepare_categories(&[], &products, &categories);

        assert!(prepared.iter().all(|category| {
            category.products.iter().all(|product| product.id != ProductId(10))
        }));
        assert_eq!(product_ids(&prepared[1]), vec![1]);
    }

    #[test]
    fn first_user_with_duplicate_id_wins() {
        let users = vec![user(1, "First", Sex::Female), user(1, "Second", Sex::Male)];
        let categories = vec![category(1, "Grocery", 1)];

        let prepared = prepare_categories(&users, &[], &categories);

        assert_eq!(prepared[0].user.as_ref().map(|user| user.name.as_str()), Some("First"));
    }

    #[test]
    fn join_preserves_category_order_and_inputs() {
        let users = vec![user(1, "Roma", Sex::Male)];
        let products = vec![product(1, "Milk", 3)];
        let categories = vec![category(3, "C", 1), category(1, "A", 1), category(2, "B", 1)];
        let (users_before, products_before, categories_before) =
            (users.clone(), products.clone(), categories.clone());

        let prepared = prepare_categories(&users, &products, &categories);

        let order: Vec<_> = prepared.iter().map(|category| category.id().0).collect();
        assert_eq!(order, vec![3, 1, 2]);
        assert_eq!(users, users_before);
        assert_eq!(products, products_before);
        assert_eq!(categories, categories_before);
    }

    #[test]
    fn index_finds_first_category_with_id() {
        let categories =
            vec![category(1, "Grocery", 1), category(2, "Drinks", 1), category(1, "Dup", 1)];
        let prepared = prepare_categories(&[], &[], &categories);
        let index = CategoryIndex::build(&prepared);

        assert_eq!(index.len(), 2);
        assert_eq!(index.get(&prepared, CategoryId(1)).map(|c| c.title()), Some("Grocery"));
        assert_eq!(index.get(&prepared, CategoryId(2)).map(|c| c.title()), Some("Drinks"));
        assert_eq!(index.get(&prepared, CategoryId(777)), None);
    }
}
