/// Type entry supplied on create or on a full types replace.
///
/// `id` is a hint: a fresh one is generated on create, or whenever the
/// supplied value is not a uuid or repeats an earlier entry.
#[derive(Debug, Clone, Default)]
pub struct NewCategoryType {
    pub id: Option<String>,
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct CreateCategoryDto {
    pub name: String,
    pub description: Option<String>,
    pub types: Vec<NewCategoryType>,
}

/// Partial update. `types`, when present, replaces the whole list.
#[derive(Debug, Clone, Default)]
pub struct UpdateCategoryDto {
    pub name: Option<String>,
    pub description: Option<String>,
    pub types: Option<Vec<NewCategoryType>>,
}

#[derive(Debug, Clone, Default)]
pub struct UpdateCategoryTypeDto {
    pub name: Option<String>,
    pub description: Option<String>,
}
