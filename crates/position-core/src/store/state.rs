//! Store State and Reducer

use serde::{Deserialize, Serialize};

use crate::domain::Position;

/// Operation status, shared by every action
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Status {
    #[default]
    Idle,
    Loading,
    Succeeded,
    Failed,
}

impl Status {
    pub fn as_str(&self) -> &'static str {
        match self {
            Status::Idle => "idle",
            Status::Loading => "loading",
            Status::Succeeded => "succeeded",
            Status::Failed => "failed",
        }
    }
}

/// Flat list + status + last error
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PositionState {
    pub positions: Vec<Position>,
    pub status: Status,
    /// Message of the last rejected action; successes leave it untouched
    pub error: Option<String>,
}

/// Everything that can change the state
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StoreEvent {
    /// Any action was dispatched
    Pending,
    Fetched(Vec<Position>),
    Added(Position),
    Updated(Position),
    Deleted(String),
    Rejected(String),
}

impl PositionState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply one event
    pub fn reduce(&mut self, event: StoreEvent) {
        match event {
            StoreEvent::Pending => {
                self.status = Status::Loading;
            }
            StoreEvent::Fetched(positions) => {
                self.status = Status::Succeeded;
                self.positions = positions;
            }
            StoreEvent::Added(position) => {
                self.status = Status::Succeeded;
                self.positions.push(position);
            }
            StoreEvent::Updated(position) => {
                self.status = Status::Succeeded;
                // Unknown id: dropped silently
                if let Some(existing) = self.positions.iter_mut().find(|p| p.id == position.id) {
                    *existing = position;
                }
            }
            StoreEvent::Deleted(id) => {
                self.status = Status::Succeeded;
                self.positions.retain(|p| p.id != id);
            }
            StoreEvent::Rejected(message) => {
                self.status = Status::Failed;
                self.error = Some(message);
            }
        }
    }

    pub fn find(&self, id: &str) -> Option<&Position> {
        self.positions.iter().find(|p| p.id == id)
    }

    pub fn is_loading(&self) -> bool {
        self.status == Status::Loading
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::NewPosition;

    fn pos(id: &str, parent: Option<&str>) -> Position {
        Position::from_new(
            id,
            NewPosition {
                name: id.to_uppercase(),
                description: format!("{} desc", id),
                parent_id: parent.map(str::to_string),
            },
        )
    }

    #[test]
    fn test_initial_state() {
        let state = PositionState::new();
        assert_eq!(state.status, Status::Idle);
        assert!(state.positions.is_empty());
        assert_eq!(state.error, None);
    }

    #[test]
    fn test_fetch_replaces_wholesale() {
        let mut state = PositionState::new();
        state.reduce(StoreEvent::Added(pos("old", None)));
        state.reduce(StoreEvent::Pending);
        assert!(state.is_loading());

        state.reduce(StoreEvent::Fetched(vec![pos("a", None), pos("b", Some("a"))]));
        assert_eq!(state.status, Status::Succeeded);
        assert_eq!(state.positions.len(), 2);
        assert!(state.find("old").is_none());
    }

    #[test]
    fn test_rejection_keeps_positions() {
        let mut state = PositionState::new();
        state.reduce(StoreEvent::Fetched(vec![pos("a", None)]));
        state.reduce(StoreEvent::Pending);
        state.reduce(StoreEvent::Rejected("offline".into()));

        assert_eq!(state.status, Status::Failed);
        assert_eq!(state.error.as_deref(), Some("offline"));
        assert_eq!(state.positions, vec![pos("a", None)]);
    }

    #[test]
    fn test_update_replaces_in_place() {
        let mut state = PositionState::new();
        state.reduce(StoreEvent::Fetched(vec![pos("a", None), pos("b", None), pos("c", None)]));

        let mut moved = pos("b", Some("a"));
        moved.name = "Renamed".into();
        state.reduce(StoreEvent::Updated(moved.clone()));

        assert_eq!(state.positions[1], moved);
        assert_eq!(state.positions.len(), 3);
    }

    #[test]
    fn test_update_unknown_id_is_noop() {
        let mut state = PositionState::new();
        state.reduce(StoreEvent::Fetched(vec![pos("a", None)]));
        state.reduce(StoreEvent::Updated(pos("x", None)));

        assert_eq!(state.positions, vec![pos("a", None)]);
        assert_eq!(state.status, Status::Succeeded);
    }

    #[test]
    fn test_delete_leaves_children_in_list() {
        let mut state = PositionState::new();
        state.reduce(StoreEvent::Fetched(vec![pos("a", None), pos("b", Some("a"))]));
        state.reduce(StoreEvent::Deleted("a".into()));

        assert_eq!(state.positions, vec![pos("b", Some("a"))]);
    }

    #[test]
    fn test_success_keeps_last_error() {
        let mut state = PositionState::new();
        state.reduce(StoreEvent::Rejected("boom".into()));
        state.reduce(StoreEvent::Fetched(vec![]));

        assert_eq!(state.status, Status::Succeeded);
        assert_eq!(state.error.as_deref(), Some("boom"));
    }

    #[test]
    fn test_status_names() {
        assert_eq!(Status::Succeeded.as_str(), "succeeded");
        assert_eq!(serde_json::to_string(&Status::Failed).unwrap(), "\"failed\"");
    }
}
