/// A single crawl target offered by the backend taxonomy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VenueRef {
    /// Canonical lower-case identifier sent to the backend.
    pub value: String,
    /// Display label.
    pub name: String,
}

impl VenueRef {
    pub fn new(value: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            name: name.into(),
        }
    }
}

/// Named grouping of venues used for bulk selection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryGroup {
    pub name: String,
    pub conferences: Vec<VenueRef>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CatalogStatus {
    #[default]
    NotLoaded,
    Loaded,
    /// The taxonomy fetch failed; only manual venue entry is usable.
    Unavailable,
}

/// Session-lived cache of the category taxonomy.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Catalog {
    groups: Vec<CategoryGroup>,
    status: CatalogStatus,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_groups(groups: Vec<CategoryGroup>) -> Self {
        Self {
            groups,
            status: CatalogStatus::Loaded,
        }
    }

    pub(crate) fn mark_unavailable(&mut self) {
        self.groups.clear();
        self.status = CatalogStatus::Unavailable;
    }

    pub fn status(&self) -> CatalogStatus {
        self.status
    }

    pub fn groups(&self) -> &[CategoryGroup] {
        &self.groups
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    /// Display label for a venue id, falling back to the upper-cased id for
    /// venues absent from the taxonomy.
    pub fn display_name(&self, venue_id: &str) -> String {
        self.groups
            .iter()
            .flat_map(|group| group.conferences.iter())
            .find(|venue| venue.value == venue_id)
            .map(|venue| venue.name.clone())
            .unwrap_or_else(|| venue_id.to_uppercase())
    }
}
