use std::collections::HashMap;

use unicode_normalization::UnicodeNormalization;

/// Canonical matching form of a patient name: compatibility decomposition,
/// then every non-ASCII character dropped (which removes the combining marks
/// the decomposition split off), lowercased, trimmed.
///
/// This is deliberately the only transformation applied on either side of a
/// match: names that differ beyond case, diacritics, or surrounding
/// whitespace do not match.
pub fn normalize_name(name: &str) -> String {
    name.nfkd()
        .filter(char::is_ascii)
        .collect::<String>()
        .to_lowercase()
        .trim()
        .to_string()
}

/// Lookup from normalized patient name to the spelling it was built from.
///
/// Built once per run from the extracted-record names, then probed with each
/// roster name. Matching is exact after normalization, nothing fuzzier; the
/// first spelling wins when two inputs normalize identically.
#[derive(Debug, Clone, Default)]
pub struct NameLookup {
    map: HashMap<String, String>,
}

impl NameLookup {
    pub fn build<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut map = HashMap::new();
        for name in names {
            let name = name.as_ref();
            map.entry(normalize_name(name))
                .or_insert_with(|| name.to_string());
        }
        Self { map }
    }

    /// Canonical spelling for `name`, if some input normalizes the same way.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.map.get(&normalize_name(name)).map(String::as_str)
    }

    pub fn contains(&self, name: &str) -> bool {
        self.map.contains_key(&normalize_name(name))
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_strips_diacritics_and_case() {
        assert_eq!(normalize_name("José da Silva"), "jose da silva");
        assert_eq!(normalize_name("jose da silva "), "jose da silva");
        assert_eq!(normalize_name("ANTÔNIO CARLOS"), "antonio carlos");
        assert_eq!(normalize_name("Conceição"), "conceicao");
    }

    #[test]
    fn lookup_matches_across_spellings() {
        let lookup = NameLookup::build(["João Da Silva", "Maria Souza"]);
        assert_eq!(lookup.get("Joao da Silva"), Some("João Da Silva"));
        assert_eq!(lookup.get("MARIA SOUZA"), Some("Maria Souza"));
        assert_eq!(lookup.get("Maria de Souza"), None);
    }

    #[test]
    fn first_spelling_wins_on_collision() {
        let lookup = NameLookup::build(["Ana Lúcia", "Ana Lucia"]);
        assert_eq!(lookup.get("ana lucia"), Some("Ana Lúcia"));
    }
}
