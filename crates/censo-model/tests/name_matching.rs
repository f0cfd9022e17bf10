//! Name normalization and lookup behavior across the roster and report sides.

use censo_model::{NameLookup, normalize_name};
use proptest::prelude::*;

#[test]
fn accent_and_case_variants_normalize_equal() {
    assert_eq!(normalize_name("José da Silva"), normalize_name("jose da silva "));
    assert_eq!(normalize_name("JOÃO DA SILVA"), normalize_name("João Da Silva"));
    assert_ne!(normalize_name("João Da Silva"), normalize_name("João Silva"));
}

#[test]
fn roster_spelling_finds_extracted_spelling() {
    // Report headers carry accents, the roster often does not.
    let lookup = NameLookup::build(["João Da Silva", "Antônio Carlos Pereira"]);
    assert_eq!(lookup.get("Joao da Silva"), Some("João Da Silva"));
    assert_eq!(lookup.get("ANTONIO CARLOS PEREIRA"), Some("Antônio Carlos Pereira"));
}

#[test]
fn transposed_or_shortened_names_do_not_match() {
    let lookup = NameLookup::build(["João Da Silva"]);
    assert_eq!(lookup.get("Da Silva João"), None);
    assert_eq!(lookup.get("João Silva"), None);
    assert!(!lookup.contains("João"));
}

#[test]
fn empty_lookup_matches_nothing() {
    let lookup = NameLookup::build(Vec::<String>::new());
    assert!(lookup.is_empty());
    assert_eq!(lookup.get("qualquer nome"), None);
}

proptest! {
    #[test]
    fn normalization_is_idempotent(name in "\\PC*") {
        let once = normalize_name(&name);
        prop_assert_eq!(normalize_name(&once), once);
    }

    #[test]
    fn normalized_form_is_trimmed_ascii_lowercase(name in "\\PC*") {
        let normalized = normalize_name(&name);
        prop_assert!(normalized.is_ascii());
        prop_assert_eq!(normalized.trim(), normalized.as_str());
        prop_assert!(!normalized.chars().any(|c| c.is_ascii_uppercase()));
    }
}
