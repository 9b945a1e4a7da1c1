use crawler_core::{Catalog, CategoryGroup, SelectionState, VenueRef};
use pretty_assertions::assert_eq;

fn catalog() -> Catalog {
    Catalog::from_groups(vec![
        CategoryGroup {
            name: "AI".to_string(),
            conferences: vec![VenueRef::new("aaai", "AAAI"), VenueRef::new("ijcai", "IJCAI")],
        },
        CategoryGroup {
            name: "ML".to_string(),
            conferences: vec![
                VenueRef::new("icml", "ICML"),
                VenueRef::new("aaai", "AAAI"),
                VenueRef::new("nips", "NeurIPS"),
            ],
        },
        CategoryGroup {
            name: "Systems".to_string(),
            conferences: vec![VenueRef::new("osdi", "OSDI")],
        },
    ])
}

fn ids(selection: &SelectionState) -> Vec<&str> {
    selection.venue_ids().iter().map(String::as_str).collect()
}

#[test]
fn union_of_selected_categories_is_deduplicated_in_catalog_order() {
    let catalog = catalog();
    let mut selection = SelectionState::new();

    selection.toggle_categories(&catalog, ["ML", "AI"]);
    assert_eq!(ids(&selection), vec!["aaai", "ijcai", "icml", "nips"]);

    selection.toggle_categories(&catalog, ["ML"]);
    assert_eq!(ids(&selection), vec!["icml", "aaai", "nips"]);

    selection.toggle_categories(&catalog, Vec::<String>::new());
    assert!(selection.venue_ids().is_empty());
}

#[test]
fn every_toggle_sequence_yields_the_member_union() {
    let catalog = catalog();
    let names = ["AI", "ML", "Systems"];
    let mut selection = SelectionState::new();

    // Walk every subset in Gray-code order so each step flips one category.
    for step in 0u32..16 {
        let mask = step ^ (step >> 1);
        let chosen: Vec<&str> = names
            .iter()
            .enumerate()
            .filter(|(bit, _)| mask & (1 << bit) != 0)
            .map(|(_, name)| *name)
            .collect();
        selection.toggle_categories(&catalog, chosen.clone());

        let mut expected: Vec<String> = Vec::new();
        for group in catalog.groups().iter().filter(|g| chosen.contains(&g.name.as_str())) {
            for venue in &group.conferences {
                if !expected.contains(&venue.value) {
                    expected.push(venue.value.clone());
                }
            }
        }
        assert_eq!(selection.venue_ids(), expected.as_slice());
    }
}

#[test]
fn manual_entries_survive_category_changes() {
    let catalog = catalog();
    let mut selection = SelectionState::new();

    assert!(selection.add_manual("  SOSP "));
    selection.toggle_categories(&catalog, ["Systems"]);
    assert_eq!(ids(&selection), vec!["osdi", "sosp"]);

    selection.toggle_categories(&catalog, Vec::<String>::new());
    assert_eq!(ids(&selection), vec!["sosp"]);
}

#[test]
fn removed_manual_entry_is_not_restored_by_categories() {
    let catalog = catalog();
    let mut selection = SelectionState::new();
    selection.add_manual("sosp");
    selection.toggle_categories(&catalog, ["AI"]);

    assert!(selection.remove("sosp"));
    selection.toggle_categories(&catalog, ["AI", "Systems"]);
    assert_eq!(ids(&selection), vec!["aaai", "ijcai", "osdi"]);
}

#[test]
fn removing_derived_id_keeps_category_checked() {
    let catalog = catalog();
    let mut selection = SelectionState::new();
    selection.toggle_categories(&catalog, ["AI"]);

    assert!(selection.remove("aaai"));
    assert_eq!(ids(&selection), vec!["ijcai"]);
    assert!(selection.is_category_selected("AI"));
}

#[test]
fn add_manual_is_idempotent_and_lower_cases() {
    let mut selection = SelectionState::new();
    assert!(selection.add_manual("AAAI"));
    assert!(!selection.add_manual("AAAI"));
    assert!(!selection.add_manual("   "));
    assert_eq!(ids(&selection), vec!["aaai"]);
}

#[test]
fn remove_unknown_id_is_noop() {
    let mut selection = SelectionState::new();
    selection.add_manual("aaai");
    assert!(!selection.remove("icml"));
    assert_eq!(ids(&selection), vec!["aaai"]);
}
