//! Category page state
//!
//! `CategoryBrowser` holds everything the category view shows: the base
//! listings for one category, the subcategory filter, the search box and the
//! grid/visualization toggle. Narrowing happens locally over the base
//! listings; only changing category goes back to the client.
//!
//! Fetches are split into `begin_*` / `apply_*` so a caller running several
//! requests at once can still drop responses that arrive out of order.

use serde::Serialize;
use tracing::{debug, info, warn};

use regen_directory::directory::{narrow, search_enterprises};
use regen_directory::graph::{build_graph, AssociationGraph, JitterSource, LayoutConfig};
use regen_directory::{
    find_category, is_geographic_category, slug_to_category_name, Category, CategoryId, Enterprise,
    MapView, SearchFields, SearchQuery, Subcategory, SubcategorySelection,
};

use crate::client::DirectoryClient;
use crate::error::DirectoryResult;
use crate::latest::{LatestRequest, Ticket};
use crate::models::EnterpriseFilter;

pub const LOAD_ENTERPRISES_FAILED: &str = "Failed to load enterprises";
pub const LOAD_CATEGORIES_FAILED: &str = "Failed to load categories";
pub const LOAD_SUBCATEGORIES_FAILED: &str = "Failed to load subcategories";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    #[default]
    Grid,
    Visualization,
}

/// What the visualization view draws for the current category
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Visualization<'a> {
    /// Geographic categories: markers around the centroid
    Map(MapView<'a>),
    /// Everything else: the subcategory association graph
    Graph(AssociationGraph),
}

#[derive(Debug, Default)]
pub struct CategoryBrowser {
    categories: Vec<Category>,
    category_name: String,
    subcategories: Vec<Subcategory>,
    enterprises: Vec<Enterprise>,
    listings_category: Option<String>,
    selection: SubcategorySelection,
    query: String,
    view_mode: ViewMode,
    loading: bool,
    error: Option<String>,
    subcategory_error: Option<String>,
    enterprise_requests: LatestRequest<String>,
    subcategory_requests: LatestRequest<CategoryId>,
    layout: LayoutConfig,
}

impl CategoryBrowser {
    pub fn new(layout: LayoutConfig) -> Self {
        Self {
            layout,
            ..Default::default()
        }
    }

    // ---- accessors ----

    pub fn category_name(&self) -> &str {
        &self.category_name
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn subcategories(&self) -> &[Subcategory] {
        &self.subcategories
    }

    /// Base listings for the category, before filter and search
    pub fn enterprises(&self) -> &[Enterprise] {
        &self.enterprises
    }

    pub fn selection(&self) -> &SubcategorySelection {
        &self.selection
    }

    pub fn query(&self) -> &str {
        &self.query
    }

    pub fn view_mode(&self) -> ViewMode {
        self.view_mode
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.view_mode = mode;
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    /// Page-level error (enterprises or categories)
    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    /// Error shown inside the subcategory filter panel
    pub fn subcategory_error(&self) -> Option<&str> {
        self.subcategory_error.as_deref()
    }

    /// Id of the current category, once categories are loaded
    pub fn category_id(&self) -> Option<CategoryId> {
        find_category(&self.categories, &self.category_name).map(|c| c.id)
    }

    // ---- local narrowing ----

    /// Add or remove a subcategory from the filter
    pub fn toggle_subcategory(&mut self, name: &str) -> bool {
        self.selection.toggle(name)
    }

    pub fn clear_filters(&mut self) {
        self.selection.clear();
    }

    pub fn set_query(&mut self, query: &str) {
        self.query = query.to_string();
    }

    /// Base listings passing both the subcategory filter and the search box
    pub fn filtered(&self) -> Vec<Enterprise> {
        let query = SearchQuery::new(&self.query, SearchFields::CATEGORY);
        narrow(&self.enterprises, &self.selection, &query)
    }

    /// Map for geographic categories, association graph otherwise.
    /// `None` when there is nothing to draw.
    pub fn visualization<'a>(
        &self,
        visible: &'a [Enterprise],
        jitter: &mut dyn JitterSource,
    ) -> Option<Visualization<'a>> {
        if visible.is_empty() {
            return None;
        }
        if is_geographic_category(&self.category_name) {
            return MapView::from_enterprises(visible).map(Visualization::Map);
        }
        let graph = build_graph(visible, &self.category_name, &self.layout, jitter);
        Some(Visualization::Graph(graph))
    }

    // ---- fetches ----

    pub async fn load_categories(&mut self, client: &dyn DirectoryClient) -> DirectoryResult<()> {
        match client.list_categories().await {
            Ok(categories) => {
                self.categories = categories;
                Ok(())
            }
            Err(e) => {
                warn!("Loading categories failed: {}", e);
                self.error = Some(LOAD_CATEGORIES_FAILED.to_string());
                Err(e)
            }
        }
    }

    /// Switch to the category named by `slug` and start loading its listings.
    ///
    /// The subcategory selection is cleared; the search text is kept.
    pub fn begin_open(&mut self, slug: &str) -> Ticket<String> {
        let name = slug_to_category_name(slug);
        if name != self.category_name {
            self.selection.clear();
            self.subcategories.clear();
            self.listings_category = None;
        }
        self.category_name = name.clone();
        self.loading = true;
        self.enterprise_requests.begin(name)
    }

    /// Apply a listings response. Returns false if it was superseded.
    pub fn apply_enterprises(
        &mut self,
        ticket: Ticket<String>,
        result: DirectoryResult<Vec<Enterprise>>,
    ) -> bool {
        if !self.enterprise_requests.complete(ticket) {
            debug!("Discarding stale listings for {:?}", self.category_name);
            return false;
        }
        self.loading = false;
        match result {
            Ok(enterprises) => {
                info!("Loaded {} enterprises for {}", enterprises.len(), self.category_name);
                self.enterprises = enterprises;
                self.listings_category = Some(self.category_name.clone());
                self.error = None;
            }
            Err(e) => {
                warn!("Loading enterprises failed: {}", e);
                self.error = Some(LOAD_ENTERPRISES_FAILED.to_string());
                // Listings from another category must not show under this one.
                if self.listings_category.as_deref() != Some(self.category_name.as_str()) {
                    self.enterprises.clear();
                    self.listings_category = None;
                }
            }
        }
        true
    }

    /// Start loading the filter options for the current category.
    /// `None` until the category id is known.
    pub fn begin_subcategories(&mut self) -> Option<Ticket<CategoryId>> {
        let id = self.category_id()?;
        Some(self.subcategory_requests.begin(id))
    }

    pub fn apply_subcategories(
        &mut self,
        ticket: Ticket<CategoryId>,
        result: DirectoryResult<Vec<Subcategory>>,
    ) -> bool {
        if !self.subcategory_requests.complete(ticket) {
            return false;
        }
        match result {
            Ok(subcategories) => {
                self.subcategories = subcategories;
                self.subcategory_error = None;
            }
            Err(e) => {
                warn!("Loading subcategories failed: {}", e);
                self.subcategory_error = Some(LOAD_SUBCATEGORIES_FAILED.to_string());
            }
        }
        self.selection.clear();
        true
    }

    /// Open a category and load its listings and filter options.
    ///
    /// Failures are recorded on the browser rather than returned.
    pub async fn open_category(&mut self, client: &dyn DirectoryClient, slug: &str) {
        let ticket = self.begin_open(slug);
        let filter = EnterpriseFilter::in_category(ticket.key().clone());
        let result = client.list_enterprises(&filter).await;
        self.apply_enterprises(ticket, result);

        if let Some(ticket) = self.begin_subcategories() {
            let result = client.list_subcategories(*ticket.key()).await;
            self.apply_subcategories(ticket, result);
        }
    }
}

/// Site-wide search over name, description and subcategory tags.
///
/// A blank query returns nothing without fetching.
pub async fn global_search(client: &dyn DirectoryClient, query: &str) -> DirectoryResult<Vec<Enterprise>> {
    if query.trim().is_empty() {
        return Ok(Vec::new());
    }
    let all = client.list_enterprises(&EnterpriseFilter::all()).await?;
    Ok(search_enterprises(&all, query, SearchFields::GLOBAL))
}
