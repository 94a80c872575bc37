//! Loose string matching between pantry item names and free-text
//! ingredient mentions coming back from the recipe-search provider.
//!
//! This is a heuristic, not a classifier: false positives and negatives
//! are accepted. No edit distance, no locale handling.

use std::sync::LazyLock;

use regex::Regex;

/// Synonym patterns per canonical pantry term. A pantry item whose
/// normalized name equals the key matches any candidate hit by one of
/// the listed patterns.
static SYNONYMS: LazyLock<Vec<(&'static str, Vec<Regex>)>> = LazyLock::new(|| {
    let table: &[(&str, &[&str])] = &[
        (
            "beef",
            &[
                r"\bbeef\b",
                r"\bground\s+beef\b",
                r"\bsirloin\b",
                r"\bsteak\b",
                r"\btop\s+round\b",
                r"\bchuck\b",
            ],
        ),
        (
            "corn",
            &[
                r"\bcorn\b",
                r"\bsweet\s+corn\b",
                r"\bcorn\s+on\s+the\s+cob\b",
                r"\bcorn\s+kernels?\b",
            ],
        ),
        (
            "bell pepper",
            &[
                r"\bbell\s+pepper(s)?\b",
                r"\bred\s+pepper(s)?\b",
                r"\bgreen\s+pepper(s)?\b",
                r"\byellow\s+pepper(s)?\b",
                r"\bcapsicum\b",
            ],
        ),
    ];

    table
        .iter()
        .map(|(term, patterns)| {
            let compiled = patterns
                .iter()
                .map(|p| Regex::new(p).expect("static synonym pattern"))
                .collect();
            (*term, compiled)
        })
        .collect()
});

static NORMALIZE_FIXES: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r"\bbell\s*peper\b", "bell pepper"),
        (r"\bsweet\s*corn\b", "corn"),
        (r"\bscallions?\b", "green onion"),
    ]
    .iter()
    .map(|(p, r)| (Regex::new(p).expect("static fixup pattern"), *r))
    .collect()
});

fn word_boundary_contains(haystack: &str, needle: &str) -> bool {
    let pattern = format!(r"\b{}\b", regex::escape(needle));
    Regex::new(&pattern)
        .map(|re| re.is_match(haystack))
        .unwrap_or(false)
}

/// Loose match between a pantry item name and a candidate ingredient
/// phrase. Note the check is not symmetric: the synonym table is only
/// consulted for the pantry side.
pub fn is_match(pantry_item: &str, candidate: &str) -> bool {
    let p = pantry_item.trim().to_lowercase();
    let c = candidate.trim().to_lowercase();
    if p.is_empty() || c.is_empty() {
        return false;
    }
    if p == c {
        return true;
    }
    if word_boundary_contains(&c, &p) || word_boundary_contains(&p, &c) {
        return true;
    }
    SYNONYMS
        .iter()
        .filter(|(term, _)| *term == p)
        .flat_map(|(_, patterns)| patterns.iter())
        .any(|re| re.is_match(&c))
}

/// Normalize common misspellings and regional names before matching or
/// sending a pantry list upstream.
pub fn normalize_ingredient(name: &str) -> String {
    let mut n = name.trim().to_lowercase();
    for (re, replacement) in NORMALIZE_FIXES.iter() {
        n = re.replace_all(&n, *replacement).into_owned();
    }
    n
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn exact_match_is_case_insensitive() {
        assert!(is_match("Chicken Breast", "chicken breast"));
    }

    #[test]
    fn substring_match_requires_word_boundaries() {
        assert!(is_match("bell pepper", "bell peppers and onions") || is_match("bell pepper", "bell pepper strips"));
        // "pepper" inside "peppercorn" is not a word-boundary hit
        assert!(!is_match("pepper", "peppercorn medley"));
    }

    #[test]
    fn substring_match_works_in_both_directions() {
        // pantry item contained in candidate phrase
        assert!(is_match("chicken breast", "boneless chicken breast fillet"));
        // candidate contained in pantry item phrase
        assert!(is_match("boneless chicken breast", "chicken breast"));
    }

    #[test]
    fn synonyms_only_apply_from_the_pantry_side() {
        // "beef" expands to sirloin through the synonym table...
        assert!(is_match("beef", "grilled sirloin"));
        // ...but the reverse direction has no table entry for "grilled
        // sirloin", so the documented asymmetry holds.
        assert!(!is_match("grilled sirloin", "beef"));
    }

    #[test]
    fn bell_pepper_synonyms() {
        assert!(is_match("bell pepper", "red peppers, diced"));
        assert!(is_match("bell pepper", "capsicum"));
        assert!(!is_match("bell pepper", "black peppercorns"));
    }

    #[test]
    fn empty_inputs_never_match() {
        assert!(!is_match("", "anything"));
        assert!(!is_match("anything", "  "));
    }

    #[test]
    fn used_ingredients_confirm_both_pantry_items() {
        let pantry = ["bell pepper", "chicken breast"];
        let used = ["bell peppers", "chicken breast fillet"];
        let confirmed: Vec<&str> = pantry
            .iter()
            .filter(|p| used.iter().any(|c| is_match(p, c)))
            .copied()
            .collect();
        assert_eq!(confirmed, vec!["bell pepper", "chicken breast"]);
    }

    #[test]
    fn normalize_fixes_common_typos() {
        assert_eq!(normalize_ingredient("Bell Peper"), "bell pepper");
        assert_eq!(normalize_ingredient("sweet corn"), "corn");
        assert_eq!(normalize_ingredient("Scallions"), "green onion");
        assert_eq!(normalize_ingredient("  Milk "), "milk");
    }
}
