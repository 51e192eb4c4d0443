//! Client-side search and page slicing over a fully fetched record list.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::record::PetRecord;

pub const DEFAULT_LIMIT: usize = 10;

/// Which source a listing draws from.
#[derive(Serialize, Deserialize, Copy, Clone, Debug, Default, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Filter {
    /// Every available pet in the remote store.
    All,
    /// Only pets whose ids the current session tracks.
    #[default]
    My,
}

impl std::fmt::Display for Filter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{}",
            match self {
                Filter::All => "all",
                Filter::My => "my",
            }
        )
    }
}

impl FromStr for Filter {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "all" => Ok(Filter::All),
            "my" => Ok(Filter::My),
            _ => Err(()),
        }
    }
}

/// Listing parameters. Build through [`crate::validation::validate_page_request`]
/// when the values come from a user.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageRequest {
    /// Results per page. At least 1.
    pub limit: usize,
    /// Page number (1-indexed).
    pub page: usize,
    /// Case-insensitive substring matched against pet names. Empty matches all.
    pub search: String,
    pub filter: Filter,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            limit: DEFAULT_LIMIT,
            page: 1,
            search: String::new(),
            filter: Filter::My,
        }
    }
}

/// One page of a filtered listing plus the numbers needed to navigate it.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PageResult {
    pub items: Vec<PetRecord>,
    /// Count of records matching the search, before slicing.
    pub total: usize,
    pub per_page: usize,
    pub current_page: usize,
    /// Never less than 1, even for an empty listing.
    pub last_page: usize,
}

impl PageResult {
    pub fn empty(limit: usize, page: usize) -> Self {
        paginate(Vec::new(), "", limit, page)
    }
}

/// True when `search` is empty or occurs in the record's name, ignoring case.
pub fn matches_search(record: &PetRecord, search: &str) -> bool {
    search.is_empty() || record.name.to_lowercase().contains(&search.to_lowercase())
}

/// Keeps the records whose names match `search`, in their original order.
pub fn filter_by_search(items: Vec<PetRecord>, search: &str) -> Vec<PetRecord> {
    items
        .into_iter()
        .filter(|record| matches_search(record, search))
        .collect()
}

/// Filters `items` by `search`, then cuts out page `page` of size `limit`.
///
/// A page past the end yields no items rather than an error. `limit` must be
/// at least 1; a zero is treated as 1.
pub fn paginate(items: Vec<PetRecord>, search: &str, limit: usize, page: usize) -> PageResult {
    let per_page = limit.max(1);
    let filtered = filter_by_search(items, search);
    let total = filtered.len();
    let offset = page.saturating_sub(1).saturating_mul(per_page);

    let items = filtered.into_iter().skip(offset).take(per_page).collect();

    PageResult {
        items,
        total,
        per_page,
        current_page: page,
        last_page: total.div_ceil(per_page).max(1),
    }
}
