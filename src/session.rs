//! Session controller.
//!
//! `CatalogSession` owns everything that would otherwise be ambient
//! module state: the API client and its caches, the loaded summaries, the
//! current filter/sort/page state, the favorites store, and the optional
//! assist client. The presentation layer is a pure function of what this
//! type exposes.

use crate::assist::{AssistClient, AssistExtraction};
use crate::catalog::{
    apply_filters, paginate, sort_summaries, FilterState, GenerationFilter, Page, SortKey,
    TypeFilter,
};
use crate::client::ApiClient;
use crate::config::Config;
use crate::detail::{load_detail, DetailView};
use crate::errors::{DetailResult, SummaryDataResult};
use crate::favorites::FavoritesStore;
use crate::summary::load_summaries;
use schema::{PokemonSummary, PokemonType};

pub struct CatalogSession {
    client: ApiClient,
    assist: Option<AssistClient>,
    summaries: Vec<PokemonSummary>,
    filters: FilterState,
    sort: SortKey,
    current_page: usize,
    items_per_page: usize,
    favorites: FavoritesStore,
}

impl CatalogSession {
    /// Bulk-load the summary file and set up the session. Summary load
    /// failure is the one fatal error; callers surface it and stop.
    pub fn new(config: &Config) -> SummaryDataResult<Self> {
        let summaries = load_summaries(&config.summary_path)?;
        Ok(Self::with_summaries(
            summaries,
            FavoritesStore::load(config.favorites_path.clone()),
            config,
        ))
    }

    /// Build a session over an already-loaded summary list. Also the seam
    /// the tests use.
    pub fn with_summaries(
        summaries: Vec<PokemonSummary>,
        favorites: FavoritesStore,
        config: &Config,
    ) -> Self {
        CatalogSession {
            client: ApiClient::new(config.api_base_url.clone()),
            assist: AssistClient::from_config(config),
            summaries,
            filters: FilterState::default(),
            sort: SortKey::default(),
            current_page: 1,
            items_per_page: config.items_per_page.max(1),
            favorites,
        }
    }

    pub fn filters(&self) -> &FilterState {
        &self.filters
    }

    pub fn sort(&self) -> SortKey {
        self.sort
    }

    pub fn assist_enabled(&self) -> bool {
        self.assist.is_some()
    }

    // Every filter/sort/page-size change resets to page 1; only explicit
    // prev/next navigation moves the page.

    pub fn set_search_term(&mut self, term: &str) {
        self.filters.search_term = term.to_lowercase();
        self.current_page = 1;
    }

    pub fn set_type_filter(&mut self, filter: TypeFilter) {
        self.filters.selected_type = filter;
        self.current_page = 1;
    }

    pub fn set_generation_filter(&mut self, filter: GenerationFilter) {
        self.filters.selected_generation = filter;
        self.current_page = 1;
    }

    pub fn set_sort(&mut self, sort: SortKey) {
        self.sort = sort;
        self.current_page = 1;
    }

    pub fn set_items_per_page(&mut self, items_per_page: usize) {
        self.items_per_page = items_per_page.max(1);
        self.current_page = 1;
    }

    pub fn clear_semantic_keywords(&mut self) {
        self.filters.semantic_keywords.clear();
        self.current_page = 1;
    }

    pub fn next_page(&mut self) -> bool {
        if self.current_page < self.visible_page().total_pages {
            self.current_page += 1;
            true
        } else {
            false
        }
    }

    pub fn prev_page(&mut self) -> bool {
        if self.current_page > 1 {
            self.current_page -= 1;
            true
        } else {
            false
        }
    }

    /// Filter, sort, and paginate the summaries for display. The page is
    /// clamped into range here, after filtering may have shrunk the list.
    pub fn visible_page(&self) -> Page<'_> {
        let mut items = apply_filters(&self.summaries, &self.filters);
        sort_summaries(&mut items, self.sort);
        paginate(items, self.current_page, self.items_per_page)
    }

    /// Run the free-text query through the assist service and apply the
    /// extraction. With the assist unavailable, existing filters stand and
    /// only the page resets.
    pub async fn semantic_search(&mut self, query: &str) {
        match &self.assist {
            Some(assist) => {
                let extraction = assist.extract(query).await;
                tracing::debug!(
                    types = ?extraction.types,
                    keywords = ?extraction.keywords,
                    "assist extraction"
                );
                self.apply_extraction(extraction);
            }
            None => self.current_page = 1,
        }
    }

    /// Apply an assist extraction to the filter state: the keyword list
    /// replaces the current one outright (an empty extraction clears it),
    /// the first extracted type becomes the type filter, and any further
    /// types are ignored. An extraction with no types leaves the type
    /// filter untouched.
    pub fn apply_extraction(&mut self, extraction: AssistExtraction) {
        self.filters.semantic_keywords = extraction.keywords;
        if let Some(type_) = extraction.types.first() {
            self.filters.selected_type = TypeFilter::Only(*type_);
        }
        self.current_page = 1;
    }

    /// Aggregate the full detail view for one entity.
    pub async fn open_detail(&self, id: u32) -> DetailResult<DetailView> {
        load_detail(&self.client, id).await
    }

    pub fn find_by_name(&self, name: &str) -> Option<&PokemonSummary> {
        let lowered = name.to_lowercase();
        self.summaries.iter().find(|s| s.name == lowered)
    }

    pub fn find_by_id(&self, id: u32) -> Option<&PokemonSummary> {
        self.summaries.iter().find(|s| s.id == id)
    }

    pub fn is_favorite(&self, id: u32) -> bool {
        self.favorites.is_favorite(id)
    }

    pub fn toggle_favorite(&mut self, id: u32) -> bool {
        self.favorites.toggle(id)
    }

    pub fn favorite_summaries(&self) -> Vec<&PokemonSummary> {
        self.summaries
            .iter()
            .filter(|s| self.favorites.is_favorite(s.id))
            .collect()
    }

    /// Distinct generation labels present in the catalog, sorted, for the
    /// generation filter.
    pub fn generations(&self) -> Vec<String> {
        let mut labels: Vec<String> = self
            .summaries
            .iter()
            .map(|s| s.generation.clone())
            .collect();
        labels.sort();
        labels.dedup();
        labels
    }

    /// Known type names, for the type filter buttons.
    pub fn type_names(&self) -> Vec<String> {
        PokemonType::all().map(|t| t.to_string()).collect()
    }
}
