//! Generic method fallbacks for AI recipes that arrive without steps, so
//! the detail view and saved favorites never render an empty method.

/// Title-keyword buckets; the last arm is the catch-all.
pub fn fallback_steps_for_title(title: &str) -> Vec<String> {
    let t = title.to_lowercase();

    let steps: &[&str] = if t.contains("smoothie") || t.contains("shake") {
        &[
            "Add all ingredients to a blender.",
            "Blend until completely smooth.",
            "Taste and adjust sweetness or thickness as desired.",
            "Pour into a glass and serve immediately.",
        ]
    } else if t.contains("oatmeal") || t.contains("overnight oats") {
        &[
            "Cook oats according to package directions (water or milk).",
            "Stir in the remaining ingredients.",
            "Simmer 1-2 minutes to warm through (optional).",
            "Serve warm and top as desired.",
        ]
    } else if t.contains("toast") || t.contains("sandwich") {
        &[
            "Toast the bread to your liking.",
            "Layer the fillings evenly on the toast.",
            "Top with the remaining ingredients.",
            "Serve immediately.",
        ]
    } else if t.contains("salad") || t.contains("bowl") {
        &[
            "Chop or prep all ingredients as needed.",
            "Combine in a bowl.",
            "Dress, season with salt and pepper, and toss to coat.",
            "Serve.",
        ]
    } else if t.contains("energy ball") || t.contains("balls") || t.contains("bites") {
        &[
            "In a bowl, stir all ingredients until evenly combined.",
            "Chill the mixture for 15-20 minutes to firm up.",
            "Roll into bite-size balls.",
            "Refrigerate in an airtight container.",
        ]
    } else {
        &[
            "Prep ingredients (wash, peel, chop as needed).",
            "Combine and season to taste.",
            "Cook or chill if appropriate.",
            "Serve.",
        ]
    };

    steps.iter().map(|s| s.to_string()).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn smoothie_titles_get_blender_steps() {
        let steps = fallback_steps_for_title("Berry Banana Smoothie");
        assert!(steps[0].contains("blender"));
    }

    #[test]
    fn unknown_titles_get_the_generic_method() {
        let steps = fallback_steps_for_title("Mystery Casserole");
        assert_eq!(steps.len(), 4);
        assert!(steps[0].starts_with("Prep ingredients"));
    }
}
