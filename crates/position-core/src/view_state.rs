//! Tree View State
//!
//! Per-node expand/collapse and the single focused node. Independent of the
//! position data: toggling never touches the store.

use std::collections::BTreeSet;

use crate::domain::Position;
use crate::tree::Forest;

/// What the user is doing with which node; viewing and editing exclude each other
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Focus {
    #[default]
    None,
    Viewing(String),
    Editing(String),
    AddingChild(String),
    AddingRoot,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TreeViewState {
    expanded: BTreeSet<String>,
    focus: Focus,
}

impl TreeViewState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expanded(&self) -> &BTreeSet<String> {
        &self.expanded
    }

    pub fn is_expanded(&self, id: &str) -> bool {
        self.expanded.contains(id)
    }

    /// Flip one node, returning whether it is now expanded
    pub fn toggle(&mut self, id: &str) -> bool {
        if self.expanded.remove(id) {
            false
        } else {
            self.expanded.insert(id.to_string());
            true
        }
    }

    pub fn expand(&mut self, id: &str) {
        self.expanded.insert(id.to_string());
    }

    pub fn expand_all(&mut self, forest: &Forest) {
        self.expanded.extend(forest.expandable_ids());
    }

    pub fn collapse_all(&mut self) {
        self.expanded.clear();
    }

    pub fn all_expanded(&self, forest: &Forest) -> bool {
        let expandable = forest.expandable_ids();
        !expandable.is_empty() && expandable.iter().all(|id| self.expanded.contains(id))
    }

    /// Header toggle: expand everything unless everything already is
    pub fn toggle_all(&mut self, forest: &Forest) {
        if self.all_expanded(forest) {
            self.collapse_all();
        } else {
            self.expand_all(forest);
        }
    }

    pub fn focus(&self) -> &Focus {
        &self.focus
    }

    pub fn select(&mut self, id: &str) {
        self.focus = Focus::Viewing(id.to_string());
    }

    pub fn edit(&mut self, id: &str) {
        self.focus = Focus::Editing(id.to_string());
    }

    pub fn add_child(&mut self, parent_id: &str) {
        self.focus = Focus::AddingChild(parent_id.to_string());
    }

    pub fn add_root(&mut self) {
        self.focus = Focus::AddingRoot;
    }

    pub fn clear_focus(&mut self) {
        self.focus = Focus::None;
    }

    pub fn is_viewing(&self, id: &str) -> bool {
        matches!(&self.focus, Focus::Viewing(v) if v == id)
    }

    pub fn is_editing(&self, id: &str) -> bool {
        matches!(&self.focus, Focus::Editing(e) if e == id)
    }

    /// Id of the node the focus refers to, if any
    pub fn focused_id(&self) -> Option<&str> {
        match &self.focus {
            Focus::Viewing(id) | Focus::Editing(id) | Focus::AddingChild(id) => Some(id),
            Focus::None | Focus::AddingRoot => None,
        }
    }

    /// Forget nodes that are no longer in the list
    pub fn retain_existing(&mut self, positions: &[Position]) {
        self.expanded
            .retain(|id| positions.iter().any(|p| &p.id == id));
        if let Some(id) = self.focused_id() {
            if !positions.iter().any(|p| p.id == id) {
                self.focus = Focus::None;
            }
        }
    }
}
