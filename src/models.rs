use crate::errors::StoreError;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[default]
    Technology,
    Travel,
    Home,
    Vehicle,
    Clothing,
    Education,
    Entertainment,
    Other,
}

impl Category {
    /// Every permitted category, in the order the input form offers them.
    pub const ALL: [Category; 8] = [
        Category::Technology,
        Category::Travel,
        Category::Home,
        Category::Vehicle,
        Category::Clothing,
        Category::Education,
        Category::Entertainment,
        Category::Other,
    ];

    pub fn label(self) -> &'static str {
        match self {
            Category::Technology => "Technology",
            Category::Travel => "Travel",
            Category::Home => "Home",
            Category::Vehicle => "Vehicle",
            Category::Clothing => "Clothing",
            Category::Education => "Education",
            Category::Entertainment => "Entertainment",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A savings goal as persisted in the durable blob.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Goal {
    pub id: String,
    pub name: String,
    pub target_amount: f64,
    pub current_amount: f64,
    pub category: Category,
    /// Milliseconds since the Unix epoch.
    pub created_at: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Goal {
    pub fn is_completed(&self) -> bool {
        self.current_amount >= self.target_amount
    }

    /// Applies the input checks to a goal read back from storage.
    pub fn validate(&self) -> Result<(), StoreError> {
        check_fields(&self.name, self.target_amount, self.current_amount)
    }

    pub(crate) fn apply(&mut self, input: GoalInput) {
        self.name = input.name;
        self.target_amount = input.target_amount;
        self.current_amount = input.current_amount;
        self.category = input.category;
        self.notes = input.notes;
    }
}

/// The mutable fields of a goal, as submitted by the create and edit forms.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalInput {
    pub name: String,
    pub target_amount: f64,
    #[serde(default)]
    pub current_amount: f64,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub notes: Option<String>,
}

impl GoalInput {
    pub fn validate(&self) -> Result<(), StoreError> {
        check_fields(&self.name, self.target_amount, self.current_amount)
    }

    /// Maps a blank `notes` string to `None`; form bodies send "" for "no notes".
    pub fn normalized(mut self) -> Self {
        if self
            .notes
            .as_deref()
            .is_some_and(|notes| notes.trim().is_empty())
        {
            self.notes = None;
        }
        self
    }
}

fn check_fields(name: &str, target_amount: f64, current_amount: f64) -> Result<(), StoreError> {
    if name.trim().is_empty() {
        return Err(StoreError::InvalidInput("name must not be empty".into()));
    }
    if !target_amount.is_finite() || target_amount <= 0.0 {
        return Err(StoreError::InvalidInput(
            "target amount must be a positive number".into(),
        ));
    }
    if !current_amount.is_finite() || current_amount < 0.0 {
        return Err(StoreError::InvalidInput(
            "current amount must be zero or more".into(),
        ));
    }
    Ok(())
}

#[derive(Debug, Deserialize)]
pub struct AmountRequest {
    pub amount: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryTotal {
    pub category: Category,
    pub target_sum: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgress {
    pub id: String,
    pub name: String,
    pub progress_percent: f64,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatsSummary {
    pub goal_count: usize,
    pub completed_count: usize,
    pub total_target: f64,
    pub total_saved: f64,
    pub remaining: f64,
    pub overall_progress_percent: f64,
    pub by_category: Vec<CategoryTotal>,
    pub goals: Vec<GoalProgress>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AdviceResponse {
    pub advice: String,
}
