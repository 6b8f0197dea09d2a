use tracing::{debug, info};

use crate::{
    data::{PreparedCategory, Product, User},
    digest::{DigestOutput, Digestible},
    fixtures::FixtureStore,
    join::{prepare_categories, CategoryIndex},
    rows::{resolve_rows, ProductRow},
    view::{TransactionError, ViewEvent, ViewState, ViewStore},
};

/// The fixtures together with everything derived from them at load time.
/// Fixtures never change after loading, so the join is done exactly once.
#[derive(Debug, Clone)]
pub struct Catalog {
    fixtures: FixtureStore,
    prepared: Vec<PreparedCategory>,
    index: CategoryIndex,
}

impl Catalog {
    pub fn new(fixtures: FixtureStore) -> Self {
        fixtures.integrity_report().log();

        let prepared =
            prepare_categories(&fixtures.users, &fixtures.products, &fixtures.categories);
        let index = CategoryIndex::build(&prepared);
        info!(categories = prepared.len(), indexed = index.len(), "prepared categories");

        Self { fixtures, prepared, index }
    }

    pub fn users(&self) -> &[User] {
        &self.fixtures.users
    }

    pub fn products(&self) -> &[Product] {
        &self.fixtures.products
    }

    pub fn categories(&self) -> &[PreparedCategory] {
        &self.prepared
    }

    pub fn fixtures(&self) -> &FixtureStore {
        &self.fixtures
    }

    /// The state of a freshly opened page: an empty search, one tab per user.
    pub fn initial_view_state(&self) -> ViewState {
        ViewState::new(self.users().iter().map(|user| user.id).collect())
    }

    /// Returns the table rows for the given state.
    pub fn visible_rows(&self, state: &ViewState) -> Vec<ProductRow> {
        let visible = state.query().filter(self.products());
        resolve_rows(visible, &self.prepared, &self.index)
    }
}

/// A catalog with its view state. The table rows are cached and only
/// recomputed when an event changes the normalized search.
#[derive(Debug)]
pub struct CatalogPage {
    catalog: Catalog,
    view: ViewStore,
    rows: Vec<ProductRow>,
    /// The digest of the view state that `self.rows` was computed from.
    rows_digest: DigestOutput,
}

impl CatalogPage {
    pub fn new(catalog: Catalog) -> Self {
        let view = ViewStore::new(catalog.initial_view_state());
        let rows = catalog.visible_rows(view.state());
        let rows_digest = view.state().digest();
        Self { catalog, view, rows, rows_digest }
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn state(&self) -> &ViewState {
        self.view.state()
    }

    pub fn rows(&self) -> &[ProductRow] {
        &self.rows
    }

    /// Whether the "no products matching" message should be shown.
    pub fn no_matches(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn dispatch(&mut self, event: ViewEvent) -> Result<(), TransactionError> {
        self.view.dispatch(event)?;
        self.refresh();
        Ok(())
    }

    pub fn dispatch_all(
        &mut self,
        events: impl IntoIterator<Item = ViewEvent>,
    ) -> Result<(), (TransactionError, usize)> {
        self.view.dispatch_all(events)?;
        self.refresh();
        Ok(())
    }

    pub fn undo(&mut self) -> Option<ViewEvent> {
        let event = self.view.undo()?;
        self.refresh();
        Some(event)
    }

    // Recomputes the rows if the view state changed in a way that affects
    // them. Returns whether they were recomputed.
    fn refresh(&mut self) -> bool {
        let digest = self.view.state().digest();
        if digest == self.rows_digest {
            return false;
        }
        debug!(search = %self.view.state().search, "recomputing visible rows");
        self.rows = self.catalog.visible_rows(self.view.state());
        self.rows_digest = digest;
        true
    }
}
