use std::collections::HashMap;

use crate::QuestionId;

/// Single-choice answers collected so far.
///
/// One entry per answered question; an absent entry means unanswered.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Answers {
    values: HashMap<QuestionId, String>,
}

impl Answers {
    /// Create a new empty answer map.
    pub fn new() -> Self {
        Self {
            values: HashMap::new(),
        }
    }

    /// Record an answer, returning the one it replaced.
    pub fn insert(&mut self, id: QuestionId, label: impl Into<String>) -> Option<String> {
        self.values.insert(id, label.into())
    }

    /// Get the answer recorded for a question.
    pub fn get(&self, id: QuestionId) -> Option<&str> {
        self.values.get(&id).map(String::as_str)
    }

    /// Check if a question has been answered.
    pub fn contains(&self, id: QuestionId) -> bool {
        self.values.contains_key(&id)
    }

    /// Get the number of answered questions.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check if nothing has been answered.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Multi-choice follow-up selections, keyed by the question owning the follow-up.
///
/// Selections keep the order in which they were made. An entry that was
/// toggled back to empty is kept, so "empty" and "never touched" stay distinct.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct FollowUps {
    selections: HashMap<QuestionId, Vec<String>>,
}

impl FollowUps {
    pub fn new() -> Self {
        Self {
            selections: HashMap::new(),
        }
    }

    /// Add `label` if absent, remove it if present.
    ///
    /// Returns whether the label is selected afterwards.
    pub fn toggle(&mut self, id: QuestionId, label: impl Into<String>) -> bool {
        let label = label.into();
        let selected = self.selections.entry(id).or_default();
        if let Some(pos) = selected.iter().position(|s| *s == label) {
            selected.remove(pos);
            false
        } else {
            selected.push(label);
            true
        }
    }

    /// Get the selections for a question. `None` if it was never touched.
    pub fn get(&self, id: QuestionId) -> Option<&[String]> {
        self.selections.get(&id).map(Vec::as_slice)
    }

    /// Check if `label` is currently selected for a question.
    pub fn contains(&self, id: QuestionId, label: &str) -> bool {
        self.get(id)
            .is_some_and(|selected| selected.iter().any(|s| s == label))
    }

    /// Check if at least one label is selected for a question.
    pub fn has_selection(&self, id: QuestionId) -> bool {
        self.get(id).is_some_and(|selected| !selected.is_empty())
    }

    pub fn is_empty(&self) -> bool {
        self.selections.is_empty()
    }
}
