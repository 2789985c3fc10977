//! Filter, sort, and paginate the summary list.
//!
//! Pure functions over the loaded summaries plus the current filter, sort,
//! and page state. The session controller chains them in that order to
//! produce the slice the grid renders.

use schema::{PokemonSummary, PokemonType};

// Semantic keyword thresholds. Heights are decimeters, weights hectograms.
pub const SMALL_HEIGHT_BELOW: u32 = 5;
pub const LARGE_HEIGHT_ABOVE: u32 = 20;
pub const LIGHT_WEIGHT_BELOW: u32 = 100;
pub const HEAVY_WEIGHT_ABOVE: u32 = 1000;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TypeFilter {
    #[default]
    All,
    Only(PokemonType),
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum GenerationFilter {
    #[default]
    All,
    Only(String),
}

/// Current filter state. The search term is kept lowercased; matching is a
/// case-insensitive substring check against the (already lowercase)
/// canonical name.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FilterState {
    pub search_term: String,
    pub selected_type: TypeFilter,
    pub selected_generation: GenerationFilter,
    pub semantic_keywords: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    #[default]
    IdAscending,
    IdDescending,
    NameAscending,
    NameDescending,
}

/// One page of filtered + sorted results.
#[derive(Debug, Clone, PartialEq)]
pub struct Page<'a> {
    pub items: Vec<&'a PokemonSummary>,
    pub current_page: usize,
    pub total_pages: usize,
    pub total_matches: usize,
}

/// True iff the summary passes every active predicate: name substring,
/// type, generation, and the full keyword conjunction.
pub fn matches_filters(summary: &PokemonSummary, filters: &FilterState) -> bool {
    if !summary.name.contains(&filters.search_term.to_lowercase()) {
        return false;
    }

    if let TypeFilter::Only(type_) = filters.selected_type {
        if !summary.has_type(type_) {
            return false;
        }
    }

    if let GenerationFilter::Only(generation) = &filters.selected_generation {
        if &summary.generation != generation {
            return false;
        }
    }

    filters
        .semantic_keywords
        .iter()
        .all(|keyword| matches_keyword(summary, keyword))
}

/// Keyword satisfaction policy: the size/weight keywords test against the
/// fixed thresholds; any other keyword falls back to a name substring
/// match.
fn matches_keyword(summary: &PokemonSummary, keyword: &str) -> bool {
    match keyword.to_lowercase().as_str() {
        "small" => summary.height < SMALL_HEIGHT_BELOW,
        "large" => summary.height > LARGE_HEIGHT_ABOVE,
        "light" => summary.weight < LIGHT_WEIGHT_BELOW,
        "heavy" => summary.weight > HEAVY_WEIGHT_ABOVE,
        other => summary.name.contains(other),
    }
}

pub fn apply_filters<'a>(
    summaries: &'a [PokemonSummary],
    filters: &FilterState,
) -> Vec<&'a PokemonSummary> {
    summaries
        .iter()
        .filter(|summary| matches_filters(summary, filters))
        .collect()
}

/// Stable sort by the chosen key; ties keep input order.
pub fn sort_summaries(items: &mut [&PokemonSummary], key: SortKey) {
    match key {
        SortKey::IdAscending => items.sort_by(|a, b| a.id.cmp(&b.id)),
        SortKey::IdDescending => items.sort_by(|a, b| b.id.cmp(&a.id)),
        SortKey::NameAscending => items.sort_by(|a, b| a.name.cmp(&b.name)),
        SortKey::NameDescending => items.sort_by(|a, b| b.name.cmp(&a.name)),
    }
}

/// Clamp the requested page into `[1, total_pages]` and slice that page
/// out of the filtered + sorted sequence. A page size of zero is treated
/// as one.
pub fn paginate<'a>(
    items: Vec<&'a PokemonSummary>,
    requested_page: usize,
    items_per_page: usize,
) -> Page<'a> {
    let items_per_page = items_per_page.max(1);
    let total_matches = items.len();
    let total_pages = total_matches.div_ceil(items_per_page).max(1);
    let current_page = requested_page.clamp(1, total_pages);

    let start = (current_page - 1) * items_per_page;
    let page_items = items
        .into_iter()
        .skip(start)
        .take(items_per_page)
        .collect();

    Page {
        items: page_items,
        current_page,
        total_pages,
        total_matches,
    }
}
