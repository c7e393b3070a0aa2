//! Checklist tasks tracked per slot
//!
//! Serialized flat with a `type` tag, e.g.
//! `{"name":"Bounty","type":"number","value":0,"max":4}`.

use serde::{Deserialize, Serialize};

/// Task payload by kind
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TaskKind {
    /// Counter from 0 up to `max`
    Number { value: u32, max: u32 },
    /// Single checkbox
    Boolean { value: bool, label: String },
    /// One checkbox per label
    BooleanList { value: Vec<bool>, label: Vec<String> },
    /// Counter with quick-add increments
    NumberWithButtons { value: u32, max: u32, buttons: Vec<u32> },
}

/// A named checklist entry
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub name: String,
    #[serde(flatten)]
    pub kind: TaskKind,
}

impl Task {
    pub fn number(name: &str, max: u32) -> Self {
        Self {
            name: name.to_string(),
            kind: TaskKind::Number { value: 0, max },
        }
    }

    pub fn boolean(name: &str, label: &str) -> Self {
        Self {
            name: name.to_string(),
            kind: TaskKind::Boolean {
                value: false,
                label: label.to_string(),
            },
        }
    }

    pub fn boolean_list(name: &str, labels: &[&str]) -> Self {
        Self {
            name: name.to_string(),
            kind: TaskKind::BooleanList {
                value: vec![false; labels.len()],
                label: labels.iter().map(|l| l.to_string()).collect(),
            },
        }
    }

    pub fn number_with_buttons(name: &str, max: u32, buttons: &[u32]) -> Self {
        Self {
            name: name.to_string(),
            kind: TaskKind::NumberWithButtons {
                value: 0,
                max,
                buttons: buttons.to_vec(),
            },
        }
    }

    /// Current count for counter kinds
    pub fn count(&self) -> Option<u32> {
        match &self.kind {
            TaskKind::Number { value, .. } | TaskKind::NumberWithButtons { value, .. } => {
                Some(*value)
            }
            _ => None,
        }
    }

    /// Set a counter, clamped to its max
    pub fn set_count(&mut self, n: u32) {
        match &mut self.kind {
            TaskKind::Number { value, max } | TaskKind::NumberWithButtons { value, max, .. } => {
                *value = n.min(*max);
            }
            _ => {}
        }
    }

    /// Add to a counter, saturating at its max
    pub fn add(&mut self, amount: u32) {
        if let Some(current) = self.count() {
            self.set_count(current.saturating_add(amount));
        }
    }

    pub fn increment(&mut self) {
        self.add(1);
    }

    pub fn decrement(&mut self) {
        if let Some(current) = self.count() {
            self.set_count(current.saturating_sub(1));
        }
    }

    /// Flip a checkbox. `index` selects the entry of a list.
    ///
    /// Returns false when nothing was toggled.
    pub fn toggle(&mut self, index: usize) -> bool {
        match &mut self.kind {
            TaskKind::Boolean { value, .. } => {
                *value = !*value;
                true
            }
            TaskKind::BooleanList { value, .. } => match value.get_mut(index) {
                Some(entry) => {
                    *entry = !*entry;
                    true
                }
                None => false,
            },
            _ => false,
        }
    }

    pub fn reset(&mut self) {
        match &mut self.kind {
            TaskKind::Number { value, .. } | TaskKind::NumberWithButtons { value, .. } => {
                *value = 0
            }
            TaskKind::Boolean { value, .. } => *value = false,
            TaskKind::BooleanList { value, .. } => value.iter_mut().for_each(|v| *v = false),
        }
    }

    pub fn is_complete(&self) -> bool {
        match &self.kind {
            TaskKind::Number { value, max } | TaskKind::NumberWithButtons { value, max, .. } => {
                value >= max
            }
            TaskKind::Boolean { value, .. } => *value,
            TaskKind::BooleanList { value, .. } => value.iter().all(|v| *v),
        }
    }
}

/// Ordered list of tasks
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Checklist {
    pub tasks: Vec<Task>,
}

impl Checklist {
    pub fn new(tasks: Vec<Task>) -> Self {
        Self { tasks }
    }

    pub fn task(&self, name: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.name == name)
    }

    pub fn task_mut(&mut self, name: &str) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.name == name)
    }

    pub fn reset_all(&mut self) {
        self.tasks.iter_mut().for_each(Task::reset);
    }

    /// (completed, total)
    pub fn completed(&self) -> (usize, usize) {
        let done = self.tasks.iter().filter(|t| t.is_complete()).count();
        (done, self.tasks.len())
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }
}
