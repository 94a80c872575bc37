//! Converts heterogeneous third-party payloads (recipe-search provider
//! JSON, generative-model free text, markdown-table fallback) into
//! [`RecipeRecord`]s.
//!
//! Failure policy: a malformed record is skipped, a malformed payload
//! yields an empty list. Nothing here returns an error; "no results" is
//! a normal, displayable outcome for every caller.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::domain::recipes::entities::{RecipeRecord, RecipeSource};

static SLUG_RE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"[^a-z0-9]+").expect("static"));
static JSON_BLOCK_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?s)\{.*\}").expect("static"));

/// Deterministic slug for records arriving without an id: lowercased,
/// non-alphanumeric runs collapsed to hyphens, truncated; later indices
/// get a numeric suffix so slugs stay unique within one batch.
pub fn slugify_title(title: &str, ix: usize) -> String {
    let base = SLUG_RE
        .replace_all(&title.trim().to_lowercase(), "-")
        .trim_matches('-')
        .to_string();
    let base = if base.is_empty() {
        format!("recipe-{}", ix + 1)
    } else {
        base
    };

    if ix == 0 {
        base.chars().take(40).collect()
    } else {
        let head: String = base.chars().take(34).collect();
        format!("{}-{}", head.trim_end_matches('-'), ix + 1)
    }
}

/// Strict JSON parse first; on failure, the widest `{...}` substring.
pub fn extract_json_block(text: &str) -> Option<Value> {
    if text.trim().is_empty() {
        return None;
    }
    if let Ok(v) = serde_json::from_str::<Value>(text) {
        return Some(v);
    }
    let m = JSON_BLOCK_RE.find(text)?;
    serde_json::from_str::<Value>(m.as_str()).ok()
}

/// Parse a markdown pipe-table (header row, separator row, data rows)
/// into rows of lowercased-header → cell maps.
pub fn parse_markdown_table(md: &str) -> Vec<BTreeMap<String, String>> {
    let lines: Vec<&str> = md
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .collect();
    if lines.len() < 2 {
        return Vec::new();
    }

    let headers: Vec<String> = lines[0]
        .trim_matches('|')
        .split('|')
        .map(|h| h.trim().to_lowercase())
        .collect();

    lines
        .iter()
        .skip(2)
        .map(|line| {
            let cells: Vec<&str> = line.trim_matches('|').split('|').map(str::trim).collect();
            headers
                .iter()
                .enumerate()
                .map(|(i, h)| (h.clone(), cells.get(i).unwrap_or(&"").to_string()))
                .collect()
        })
        .collect()
}

fn str_field<'a>(obj: &'a Value, key: &str) -> Option<&'a str> {
    obj.get(key).and_then(Value::as_str).map(str::trim).filter(|s| !s.is_empty())
}

fn string_list(value: Option<&Value>) -> Vec<String> {
    value
        .and_then(Value::as_array)
        .map(|items| {
            items
                .iter()
                .filter_map(Value::as_str)
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// AI recipe normalization: strict JSON → embedded `{...}` salvage →
/// markdown-table salvage → empty list.
pub fn generated_recipes_from_text(text: &str) -> Vec<RecipeRecord> {
    let mut recipes = Vec::new();

    if let Some(Value::Object(data)) = extract_json_block(text) {
        let raw = data.get("recipes").and_then(Value::as_array);
        for (ix, entry) in raw.into_iter().flatten().enumerate() {
            let Value::Object(_) = entry else { continue };
            let title = str_field(entry, "title")
                .map(str::to_string)
                .unwrap_or_else(|| format!("AI recipe {}", ix + 1));
            let id = str_field(entry, "id")
                .map(str::to_string)
                .unwrap_or_else(|| slugify_title(&title, ix));

            recipes.push(RecipeRecord {
                id,
                title,
                summary: str_field(entry, "summary").map(str::to_string),
                url: str_field(entry, "url").map(str::to_string),
                ingredients: string_list(entry.get("ingredients")),
                steps: string_list(entry.get("steps")),
                source: RecipeSource::Ai,
                ..Default::default()
            });
        }
    }

    if recipes.is_empty() {
        for (ix, row) in parse_markdown_table(text).into_iter().enumerate() {
            let title = row
                .get("title")
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| format!("AI recipe {}", ix + 1));
            let id = row
                .get("id")
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(str::to_string)
                .unwrap_or_else(|| slugify_title(&title, ix));

            recipes.push(RecipeRecord {
                id,
                title,
                summary: row
                    .get("summary")
                    .map(|s| s.trim())
                    .filter(|s| !s.is_empty())
                    .map(str::to_string),
                source: RecipeSource::Ai,
                ..Default::default()
            });
        }
    }

    recipes
}

fn rounded_amount(n: &Value) -> Option<i32> {
    n.get("amount")
        .and_then(Value::as_f64)
        .map(|a| a.round() as i32)
}

/// Pull (protein_g, calories) out of a provider item regardless of shape:
/// the nested nutrient list by case-insensitive name, else flattened
/// `protein`/`calories` keys.
pub fn extract_protein_and_calories(item: &Value) -> (i32, i32) {
    let mut protein_g = 0;
    let mut calories = 0;

    let nutrients = item
        .get("nutrition")
        .and_then(|n| n.get("nutrients"))
        .and_then(Value::as_array);
    for n in nutrients.into_iter().flatten() {
        let name = n.get("name").and_then(Value::as_str).unwrap_or("").to_lowercase();
        match name.as_str() {
            "protein" => protein_g = rounded_amount(n).unwrap_or(protein_g),
            "calories" => calories = rounded_amount(n).unwrap_or(calories),
            _ => {}
        }
    }

    if protein_g == 0 {
        protein_g = item
            .get("protein")
            .and_then(Value::as_f64)
            .map(|v| v.round() as i32)
            .unwrap_or(0);
    }
    if calories == 0 {
        calories = item
            .get("calories")
            .and_then(Value::as_f64)
            .map(|v| v.round() as i32)
            .unwrap_or(0);
    }

    (protein_g, calories)
}

/// Steps from the nested instructions structure when present, else the
/// freeform instructions string split on newlines.
pub fn steps_from_information(det: &Value) -> Vec<String> {
    let analyzed = det.get("analyzedInstructions").and_then(Value::as_array);
    if let Some(blocks) = analyzed {
        let steps: Vec<String> = blocks
            .iter()
            .flat_map(|b| {
                b.get("steps")
                    .and_then(Value::as_array)
                    .into_iter()
                    .flatten()
            })
            .filter_map(|s| s.get("step").and_then(Value::as_str))
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect();
        if !steps.is_empty() {
            return steps;
        }
    }

    det.get("instructions")
        .and_then(Value::as_str)
        .map(|text| {
            text.replace('\r', "")
                .lines()
                .map(str::trim)
                .filter(|l| !l.is_empty())
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

/// Ingredient display strings from `extendedIngredients`, preferring the
/// `original` phrasing, else a plain `ingredients` string list.
pub fn ingredients_from_information(det: &Value) -> Vec<String> {
    let extended: Vec<String> = det
        .get("extendedIngredients")
        .and_then(Value::as_array)
        .into_iter()
        .flatten()
        .filter_map(|i| {
            str_field(i, "original")
                .or_else(|| str_field(i, "originalString"))
                .or_else(|| str_field(i, "name"))
        })
        .map(str::to_string)
        .collect();
    if !extended.is_empty() {
        return extended;
    }
    string_list(det.get("ingredients"))
}

/// Normalize complexSearch result items (unified-search and gap
/// suggestions paths): numeric ids pass straight through.
pub fn search_items_from_results(results: &[Value]) -> Vec<RecipeRecord> {
    results
        .iter()
        .filter_map(|item| {
            let id = item.get("id").and_then(Value::as_i64)?;
            let title = str_field(item, "title").unwrap_or("Untitled").to_string();
            let (protein_g, calories) = extract_protein_and_calories(item);

            Some(RecipeRecord {
                id: id.to_string(),
                title,
                image: str_field(item, "image").map(str::to_string),
                url: str_field(item, "sourceUrl").map(str::to_string),
                source: RecipeSource::Web,
                calories: (calories > 0).then_some(calories),
                protein_g: (protein_g > 0).then_some(protein_g),
                ready_in_minutes: item
                    .get("readyInMinutes")
                    .and_then(Value::as_i64)
                    .map(|v| v as i32),
                servings: item.get("servings").and_then(Value::as_i64).map(|v| v as i32),
                ..Default::default()
            })
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn slug_is_deterministic_and_collapses_runs() {
        assert_eq!(slugify_title("Chicken & Rice Bowl!", 0), "chicken-rice-bowl");
        assert_eq!(slugify_title("Chicken & Rice Bowl!", 2), "chicken-rice-bowl-3");
        assert_eq!(slugify_title("", 1), "recipe-2-2");
        assert_eq!(slugify_title("???", 0), "recipe-1");
    }

    #[test]
    fn embedded_json_block_is_recovered() {
        let text = "Sure! Here are your recipes:\n{\"recipes\":[{\"title\":\"Veggie Stir Fry\",\"ingredients\":[\"corn\"]}]}\nEnjoy!";
        let recipes = generated_recipes_from_text(text);
        assert_eq!(recipes.len(), 1);
        assert_eq!(recipes[0].title, "Veggie Stir Fry");
        assert_eq!(recipes[0].id, "veggie-stir-fry");
        assert_eq!(recipes[0].ingredients, vec!["corn"]);
    }

    #[test]
    fn markdown_table_salvage() {
        let md = "\
| id | Title | Summary |
|----|-------|---------|
| | Corn Salad | Crisp and fresh |
| cs-2 | Corn Soup | Warm |";
        let recipes = generated_recipes_from_text(md);
        assert_eq!(recipes.len(), 2);
        assert_eq!(recipes[0].title, "Corn Salad");
        assert_eq!(recipes[0].id, "corn-salad");
        assert_eq!(recipes[0].summary.as_deref(), Some("Crisp and fresh"));
        assert_eq!(recipes[1].id, "cs-2");
    }

    #[test]
    fn garbage_yields_empty_list_not_error() {
        assert!(generated_recipes_from_text("no json here, no table either").is_empty());
        assert!(generated_recipes_from_text("").is_empty());
    }

    #[test]
    fn nutrient_extraction_matches_names_case_insensitively() {
        let item = json!({
            "nutrition": {"nutrients": [
                {"name": "Calories", "amount": 512.3, "unit": "kcal"},
                {"name": "Protein", "amount": 39.6, "unit": "g"}
            ]}
        });
        assert_eq!(extract_protein_and_calories(&item), (40, 512));
    }

    #[test]
    fn nutrient_extraction_falls_back_to_flat_keys() {
        let item = json!({"protein": 25.4, "calories": 300.0});
        assert_eq!(extract_protein_and_calories(&item), (25, 300));
    }

    #[test]
    fn steps_prefer_analyzed_instructions() {
        let det = json!({
            "analyzedInstructions": [{"steps": [
                {"number": 1, "step": "Chop."},
                {"number": 2, "step": "Cook."}
            ]}],
            "instructions": "ignored"
        });
        assert_eq!(steps_from_information(&det), vec!["Chop.", "Cook."]);
    }

    #[test]
    fn steps_fall_back_to_newline_split() {
        let det = json!({"instructions": "Chop.\n\nCook.\nServe."});
        assert_eq!(steps_from_information(&det), vec!["Chop.", "Cook.", "Serve."]);
    }

    #[test]
    fn search_items_skip_entries_without_numeric_id() {
        let results = vec![
            json!({"id": 715421, "title": "Chicken Alfredo", "image": "https://img/1.jpg"}),
            json!({"title": "No id"}),
        ];
        let records = search_items_from_results(&results);
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, "715421");
    }
}
