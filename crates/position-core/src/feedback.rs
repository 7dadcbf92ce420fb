//! Transient success / error banners

use crate::domain::DomainError;

/// Banners disappear after this long
pub const BANNER_TIMEOUT_MS: u32 = 2_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BannerKind {
    Success,
    Error,
}

/// User actions that report back with a banner
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Load,
    AddRoot,
    AddChild,
    Update,
    Delete,
    Move,
}

impl Action {
    fn success(&self) -> &'static str {
        match self {
            Action::Load => "Positions loaded.",
            Action::AddRoot => "Root position added successfully.",
            Action::AddChild => "Child position added successfully.",
            Action::Update => "Position updated successfully.",
            Action::Delete => "Position deleted successfully.",
            Action::Move => "Position moved successfully.",
        }
    }

    fn failure(&self) -> &'static str {
        match self {
            Action::Load => "Failed to load positions",
            Action::AddRoot => "Failed to add root position",
            Action::AddChild => "Failed to add child position",
            Action::Update => "Failed to update position",
            Action::Delete => "Failed to delete position",
            Action::Move => "Failed to move position",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Banner {
    pub kind: BannerKind,
    pub message: String,
}

impl Banner {
    pub fn success(action: Action) -> Self {
        Self {
            kind: BannerKind::Success,
            message: action.success().to_string(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            kind: BannerKind::Error,
            message: message.into(),
        }
    }

    pub fn failure(action: Action, err: &DomainError) -> Self {
        Self::error(format!("{}: {}", action.failure(), err))
    }

    pub fn from_result<T>(action: Action, result: &Result<T, DomainError>) -> Self {
        match result {
            Ok(_) => Self::success(action),
            Err(e) => Self::failure(action, e),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == BannerKind::Error
    }
}
