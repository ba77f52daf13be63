//! Parsed instruction steps and the graph derived from them.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Coarse classification of what an instruction step does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StepAction {
    Preheat,
    Prep,
    Mix,
    Bake,
    Fry,
    Boil,
    Serve,
    General,
}

impl StepAction {
    /// Steps that can be moved relative to their neighbors without changing
    /// the dish: oven preheating and ingredient prep.
    pub fn can_reorder(self) -> bool {
        matches!(self, StepAction::Preheat | StepAction::Prep)
    }
}

impl std::fmt::Display for StepAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            StepAction::Preheat => "Preheat",
            StepAction::Prep => "Prep",
            StepAction::Mix => "Mix",
            StepAction::Bake => "Bake",
            StepAction::Fry => "Fry",
            StepAction::Boil => "Boil",
            StepAction::Serve => "Serve",
            StepAction::General => "General",
        };
        f.write_str(name)
    }
}

/// Temperature unit as written in the instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TempUnit {
    Celsius,
    Fahrenheit,
}

/// A temperature mention extracted from an instruction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Temperature {
    pub value: u32,
    pub unit: TempUnit,
}

/// One parsed instruction unit.
///
/// Immutable once built; owned by the [`StepGraph`] that contains it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    /// 1-based position in the original instruction list.
    pub order: usize,
    pub action: StepAction,
    pub time_minutes: Option<u32>,
    pub temperature: Option<Temperature>,
    /// Known ingredient names mentioned in this step.
    pub ingredient_refs: BTreeSet<String>,
    pub can_reorder: bool,
}

/// Ordered step sequence with aggregate facts.
///
/// Derived and ephemeral — rebuilt from a recipe's current instructions each
/// time a share is requested, never persisted.
#[derive(Debug, Clone, Default)]
pub struct StepGraph {
    pub steps: Vec<Step>,
    pub ingredients_used: BTreeSet<String>,
    pub total_time_minutes: u32,
    /// Maximum temperature across steps, compared by numeric value only.
    /// No C/F conversion is performed when comparing mixed units.
    pub max_temperature: Option<Temperature>,
}

impl StepGraph {
    /// Number of parsed steps.
    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}
