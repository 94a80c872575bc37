#[derive(Debug, Clone)]
pub struct AddIngredientInput {
    pub name: String,
    pub quantity: String,
    pub unit: String,
}

/// One reviewed row from the pantry-photo review screen.
#[derive(Debug, Clone)]
pub struct ReviewRow {
    pub name: String,
    pub quantity: String,
    pub unit: String,
}

/// Outcome of applying one review row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MergeOutcome {
    Added,
    Updated,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReviewSummary {
    pub added: usize,
    pub updated: usize,
    pub skipped: usize,
}
