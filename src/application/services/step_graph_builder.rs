//! Heuristic parsing of instruction text into a structured step graph.

use std::collections::BTreeSet;

use regex::Regex;

use crate::domain::entities::{
    IngredientFact, Step, StepAction, StepGraph, TempUnit, Temperature,
};

/// Keyword sets used to classify instruction steps, checked in priority
/// order: preheat, prep, mix, bake, fry, boil, serve.
///
/// A plain data struct so tests and embedders can inject alternate
/// vocabularies (e.g. for another language) without touching the builder.
#[derive(Debug, Clone)]
pub struct ActionKeywords {
    pub preheat: Vec<String>,
    pub prep: Vec<String>,
    pub mix: Vec<String>,
    pub bake: Vec<String>,
    pub fry: Vec<String>,
    pub boil: Vec<String>,
    pub serve: Vec<String>,
}

impl Default for ActionKeywords {
    fn default() -> Self {
        fn words(list: &[&str]) -> Vec<String> {
            list.iter().map(|w| w.to_string()).collect()
        }

        Self {
            preheat: words(&["preheat"]),
            prep: words(&[
                "chop", "dice", "slice", "cut", "peel", "mince", "grate", "wash", "rinse", "trim",
                "soak",
            ]),
            mix: words(&[
                "mix", "stir", "whisk", "combine", "fold", "beat", "toss", "blend",
            ]),
            bake: words(&["bake", "roast", "oven"]),
            fry: words(&["fry", "saute", "sauté", "sear", "brown", "grill"]),
            boil: words(&["boil", "simmer", "poach", "blanch", "steam"]),
            serve: words(&["serve", "plate", "garnish"]),
        }
    }
}

impl ActionKeywords {
    /// Classifies a step from its word set; first matching set wins.
    fn classify(&self, step_words: &BTreeSet<String>) -> StepAction {
        let groups: [(&[String], StepAction); 7] = [
            (&self.preheat, StepAction::Preheat),
            (&self.prep, StepAction::Prep),
            (&self.mix, StepAction::Mix),
            (&self.bake, StepAction::Bake),
            (&self.fry, StepAction::Fry),
            (&self.boil, StepAction::Boil),
            (&self.serve, StepAction::Serve),
        ];

        for (keywords, action) in groups {
            if keywords.iter().any(|k| step_words.contains(k)) {
                return action;
            }
        }

        StepAction::General
    }
}

/// Best-effort parser from raw instruction strings to a [`StepGraph`].
///
/// Never fails: malformed input degrades to `General` steps with no timing,
/// temperature, or ingredient references. This is a heuristic extractor for
/// downstream prompting and aggregate facts, not a validator.
pub struct StepGraphBuilder {
    time_re: Regex,
    temp_re: Regex,
    keywords: ActionKeywords,
}

impl StepGraphBuilder {
    /// Creates a builder with the default English keyword sets.
    pub fn new() -> Self {
        Self::with_keywords(ActionKeywords::default())
    }

    /// Creates a builder with custom keyword sets.
    pub fn with_keywords(keywords: ActionKeywords) -> Self {
        Self {
            time_re: Regex::new(r"(?i)\b(\d+)\s*(minutes|minute|mins|min|hours|hour|hrs|hr)\b")
                .expect("time pattern is valid"),
            temp_re: Regex::new(r"(?i)\b(\d+)\s*°?\s*(celsius|fahrenheit|c|f)\b")
                .expect("temperature pattern is valid"),
            keywords,
        }
    }

    /// Parses `instructions` into an ordered step graph.
    ///
    /// For each instruction the first time expression, the first temperature
    /// expression, the action classification, and case-insensitive ingredient
    /// mentions (names longer than two characters) are extracted. Aggregates
    /// accumulate across steps; the maximum temperature is tracked by numeric
    /// value without converting between C and F (an accepted heuristic).
    pub fn build(&self, instructions: &[String], ingredients: &[IngredientFact]) -> StepGraph {
        let mut graph = StepGraph::default();

        for (index, instruction) in instructions.iter().enumerate() {
            let lowered = instruction.to_lowercase();

            let time_minutes = self.extract_time_minutes(&lowered);
            if let Some(minutes) = time_minutes {
                graph.total_time_minutes += minutes;
            }

            let temperature = self.extract_temperature(&lowered);
            if let Some(temp) = temperature {
                let is_new_max = graph
                    .max_temperature
                    .is_none_or(|current| temp.value > current.value);
                if is_new_max {
                    graph.max_temperature = Some(temp);
                }
            }

            let step_words: BTreeSet<String> = lowered
                .split(|c: char| !c.is_alphanumeric())
                .filter(|w| !w.is_empty())
                .map(str::to_string)
                .collect();
            let action = self.keywords.classify(&step_words);

            let mut ingredient_refs = BTreeSet::new();
            for fact in ingredients {
                let name = fact.name.trim();
                if name.chars().count() <= 2 {
                    continue;
                }
                if lowered.contains(&name.to_lowercase()) {
                    ingredient_refs.insert(name.to_string());
                }
            }
            graph.ingredients_used.extend(ingredient_refs.iter().cloned());

            graph.steps.push(Step {
                order: index + 1,
                action,
                time_minutes,
                temperature,
                ingredient_refs,
                can_reorder: action.can_reorder(),
            });
        }

        graph
    }

    /// First time expression in the step, converted to minutes.
    fn extract_time_minutes(&self, lowered: &str) -> Option<u32> {
        let captures = self.time_re.captures(lowered)?;
        let value: u32 = captures.get(1)?.as_str().parse().ok()?;
        let unit = captures.get(2)?.as_str();

        if unit.starts_with('h') {
            Some(value.saturating_mul(60))
        } else {
            Some(value)
        }
    }

    /// First temperature expression in the step.
    fn extract_temperature(&self, lowered: &str) -> Option<Temperature> {
        let captures = self.temp_re.captures(lowered)?;
        let value: u32 = captures.get(1)?.as_str().parse().ok()?;
        let unit = match captures.get(2)?.as_str().chars().next()? {
            'c' => TempUnit::Celsius,
            'f' => TempUnit::Fahrenheit,
            _ => return None,
        };

        Some(Temperature { value, unit })
    }
}

impl Default for StepGraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}
