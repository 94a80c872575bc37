//! Turning raw OCR text and vision-model JSON into review candidates.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::domain::{
    extraction::entities::ExtractionCandidate, recipes::normalize::extract_json_block,
};

/// Cap on candidates parsed from one OCR text blob.
pub const OCR_CANDIDATE_CAP: usize = 50;
/// Cap on candidates accepted from a vision response.
pub const VISION_CANDIDATE_CAP: usize = 40;

const NUM: &str = r"(\d+(?:\.\d+)?)";
const UNIT: &str = r"(g|kg|mg|ml|l|tbsp|tsp|teaspoons?|tablespoons?|cups?|oz|ounces?|lbs?|pounds?|pcs?|pieces?|cans?|packs?)";

// "200 g chicken breast"
static QTY_UNIT_NAME: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)^{NUM}\s+{UNIT}\s+(.+)$")).expect("static line pattern")
});
// "2 bell pepper"
static QTY_NAME: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(&format!(r"(?i)^{NUM}\s+(.+)$")).expect("static line pattern"));
// "onion 1 pc"
static NAME_QTY_UNIT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(&format!(r"(?i)^(.+?)\s+{NUM}\s+{UNIT}$")).expect("static line pattern")
});

/// Parse grocery-ish lines into candidates. Accepted shapes, tried in
/// order per line, with a name-only fallback:
/// `200 g chicken breast`, `2 bell pepper`, `onion 1 pc`, `ginger`.
pub fn candidates_from_text(text: &str) -> Vec<ExtractionCandidate> {
    let mut items = Vec::new();

    for raw in text.lines() {
        let line = raw.trim_matches(|c: char| "•-* \t".contains(c)).trim();
        if line.is_empty() {
            continue;
        }

        if let Some(caps) = QTY_UNIT_NAME.captures(line) {
            items.push(ExtractionCandidate::new(
                caps[3].trim(),
                caps[1].trim(),
                caps[2].trim().to_lowercase(),
            ));
        } else if let Some(caps) = QTY_NAME.captures(line) {
            items.push(ExtractionCandidate::new(caps[2].trim(), caps[1].trim(), ""));
        } else if let Some(caps) = NAME_QTY_UNIT.captures(line) {
            items.push(ExtractionCandidate::new(
                caps[1].trim(),
                caps[2].trim(),
                caps[3].trim().to_lowercase(),
            ));
        } else {
            items.push(ExtractionCandidate::new(line, "", ""));
        }

        if items.len() >= OCR_CANDIDATE_CAP {
            break;
        }
    }

    items
}

/// Candidates from a vision model's JSON reply, expected shape
/// `{"items":[{"name","quantity","unit"}]}`. Nameless items are dropped.
pub fn candidates_from_model_json(text: &str) -> Vec<ExtractionCandidate> {
    let Some(value) = extract_json_block(text) else {
        return Vec::new();
    };

    let field = |item: &Value, key: &str| {
        item.get(key)
            .and_then(Value::as_str)
            .unwrap_or("")
            .trim()
            .to_string()
    };

    value
        .get("items")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|item| {
            let name = field(item, "name");
            if name.is_empty() {
                return None;
            }
            Some(ExtractionCandidate {
                name,
                quantity: field(item, "quantity"),
                unit: field(item, "unit"),
            })
        })
        .take(VISION_CANDIDATE_CAP)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_the_supported_line_shapes() {
        let text = "2 bell pepper\n200 g chicken breast\nonion 1 pc\nginger";
        let items = candidates_from_text(text);

        assert_eq!(items.len(), 4);
        assert_eq!(items[0], ExtractionCandidate::new("bell pepper", "2", ""));
        assert_eq!(
            items[1],
            ExtractionCandidate::new("chicken breast", "200", "g")
        );
        assert_eq!(items[2], ExtractionCandidate::new("onion", "1", "pc"));
        assert_eq!(items[3], ExtractionCandidate::new("ginger", "", ""));
    }

    #[test]
    fn strips_bullets_and_skips_blank_lines() {
        let text = "• 2 eggs\n\n- milk\n   \n* 1 l milk";
        let items = candidates_from_text(text);

        assert_eq!(items.len(), 3);
        assert_eq!(items[0], ExtractionCandidate::new("eggs", "2", ""));
        assert_eq!(items[1], ExtractionCandidate::new("milk", "", ""));
        assert_eq!(items[2], ExtractionCandidate::new("milk", "1", "l"));
    }

    #[test]
    fn ocr_candidates_are_capped() {
        let text = (0..80)
            .map(|i| format!("item {i}"))
            .collect::<Vec<_>>()
            .join("\n");
        assert_eq!(candidates_from_text(&text).len(), OCR_CANDIDATE_CAP);
    }

    #[test]
    fn model_json_survives_surrounding_prose() {
        let text = "Here you go:\n{\"items\":[{\"name\":\"chicken\",\"quantity\":\"200\",\"unit\":\"g\"},{\"name\":\"\",\"quantity\":\"1\"}]}";
        let items = candidates_from_model_json(text);

        assert_eq!(items, vec![ExtractionCandidate::new("chicken", "200", "g")]);
    }

    #[test]
    fn garbage_model_output_yields_no_candidates() {
        assert!(candidates_from_model_json("sorry, I cannot see an image").is_empty());
    }
}
