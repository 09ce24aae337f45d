use std::sync::Arc;

use crate::Asset;

/// Free-text filter applied over the listing at read time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchFilter {
    term: String,
}

impl SearchFilter {
    pub fn new(term: impl Into<String>) -> Self {
        Self { term: term.into() }
    }

    /// Raw term as typed by the user.
    pub fn term(&self) -> &str {
        &self.term
    }

    pub fn set(&mut self, term: impl Into<String>) {
        self.term = term.into();
    }

    pub fn clear(&mut self) {
        self.term.clear();
    }

    pub fn is_blank(&self) -> bool {
        self.term.trim().is_empty()
    }

    /// Projection of `assets` through the filter: case-insensitive substring
    /// match on name or symbol.
    ///
    /// A blank term hands back the same allocation; otherwise matching entries
    /// are copied out in their original order.
    pub fn apply(&self, assets: &Arc<Vec<Asset>>) -> Arc<Vec<Asset>> {
        if self.is_blank() {
            return Arc::clone(assets);
        }

        let needle = self.term.trim().to_lowercase();
        let matching = assets
            .iter()
            .filter(|asset| contains_needle(asset, &needle))
            .cloned()
            .collect();
        Arc::new(matching)
    }
}

fn contains_needle(asset: &Asset, needle: &str) -> bool {
    asset.name.to_lowercase().contains(needle) || asset.symbol.to_lowercase().contains(needle)
}
