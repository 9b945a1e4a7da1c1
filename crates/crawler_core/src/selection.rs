use std::collections::BTreeSet;

use crate::Catalog;

/// Chosen venues for the next crawl.
///
/// `venue_ids` is the single source of truth. Category checkboxes are a bulk-add
/// gesture: they rebuild the derived part of the list but are never read back
/// from it, so removing a category-derived id leaves its category checked.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SelectionState {
    selected_categories: BTreeSet<String>,
    venue_ids: Vec<String>,
    manual: Vec<String>,
}

impl SelectionState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn venue_ids(&self) -> &[String] {
        &self.venue_ids
    }

    pub fn is_category_selected(&self, name: &str) -> bool {
        self.selected_categories.contains(name)
    }

    /// Replaces the checked category set and recomputes the venue list.
    ///
    /// Derived ids come first, in catalog-then-member order, followed by manual
    /// entries not already covered.
    pub fn toggle_categories<I, S>(&mut self, catalog: &Catalog, selected_names: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.selected_categories = selected_names.into_iter().map(Into::into).collect();

        let mut venue_ids = Vec::new();
        for group in catalog
            .groups()
            .iter()
            .filter(|group| self.selected_categories.contains(&group.name))
        {
            for venue in &group.conferences {
                push_unique(&mut venue_ids, &venue.value);
            }
        }
        for id in &self.manual {
            push_unique(&mut venue_ids, id);
        }
        self.venue_ids = venue_ids;
    }

    /// Adds a typed venue id. Returns `false` when the input is blank or the
    /// id is already chosen.
    pub fn add_manual(&mut self, raw: &str) -> bool {
        let id = raw.trim().to_lowercase();
        if id.is_empty() || self.venue_ids.contains(&id) {
            return false;
        }
        self.venue_ids.push(id.clone());
        self.manual.push(id);
        true
    }

    /// Removes a venue id regardless of where it came from.
    pub fn remove(&mut self, venue_id: &str) -> bool {
        let before = self.venue_ids.len();
        self.venue_ids.retain(|id| id != venue_id);
        self.manual.retain(|id| id != venue_id);
        self.venue_ids.len() != before
    }
}

fn push_unique(ids: &mut Vec<String>, id: &str) {
    if !ids.iter().any(|existing| existing == id) {
        ids.push(id.to_string());
    }
}
