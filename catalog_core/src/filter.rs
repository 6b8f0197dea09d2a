use crate::data::Product;

/// A search term normalized for matching: trimmed at both ends and lowercased.
/// Whitespace inside the term is kept, so "almond milk" does not match
/// "Milk, almond".
#[derive(Debug, Default, PartialEq, Eq, Hash, Clone)]
pub struct SearchQuery {
    needle: String,
}

impl SearchQuery {
    pub fn new(raw: &str) -> Self {
        Self { needle: raw.trim().to_lowercase() }
    }

    /// Whether the query matches every product.
    pub fn is_empty(&self) -> bool {
        self.needle.is_empty()
    }

    pub fn as_str(&self) -> &str {
        &self.needle
    }

    pub fn matches(&self, product: &Product) -> bool {
        self.is_empty() || product.name.to_lowercase().contains(&self.needle)
    }

    /// Returns the products that match this query, in their original order.
    pub fn filter<'p>(&self, products: &'p [Product]) -> Vec<&'p Product> {
        products.iter().filter(|product| self.matches(product)).collect()
    }
}

/// Returns the products whose name contains `search`, ignoring case and
/// surrounding whitespace in `search`. An empty or blank search returns every
/// product.
pub fn filter_products<'p>(products: &'p [Product], search: &str) -> Vec<&'p Product> {
    SearchQuery::new(search).filter(products)
}
