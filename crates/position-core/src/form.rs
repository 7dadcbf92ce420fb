//! Form / Edit Surfaces
//!
//! Drafts are validated here, before anything reaches the store.

use std::collections::BTreeMap;

use thiserror::Error;

use crate::domain::{DomainError, DomainResult, NewPosition, Position};
use crate::feedback::Action;
use crate::repository::PositionRepository;
use crate::store::PositionStore;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Field {
    Name,
    Description,
}

impl Field {
    pub fn as_str(&self) -> &'static str {
        match self {
            Field::Name => "name",
            Field::Description => "description",
        }
    }
}

/// Field-level validation messages
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{} invalid field(s)", .0.len())]
pub struct FieldErrors(BTreeMap<Field, &'static str>);

impl FieldErrors {
    pub fn get(&self, field: Field) -> Option<&'static str> {
        self.0.get(&field).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (Field, &'static str)> + '_ {
        self.0.iter().map(|(f, m)| (*f, *m))
    }

    fn clear(&mut self, field: Field) {
        self.0.remove(&field);
    }
}

/// User input, possibly incomplete
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PositionDraft {
    /// Present when editing an existing position
    pub id: Option<String>,
    pub name: String,
    pub description: String,
    pub parent_id: Option<String>,
}

impl PositionDraft {
    pub fn new(parent_id: Option<String>) -> Self {
        Self {
            parent_id,
            ..Default::default()
        }
    }

    pub fn from_position(position: &Position) -> Self {
        Self {
            id: Some(position.id.clone()),
            name: position.name.clone(),
            description: position.description.clone(),
            parent_id: position.parent_id.clone(),
        }
    }

    pub fn set(&mut self, field: Field, value: impl Into<String>) {
        match field {
            Field::Name => self.name = value.into(),
            Field::Description => self.description = value.into(),
        }
    }

    pub fn is_edit(&self) -> bool {
        self.id.is_some()
    }
}

/// A validated record, ready for the store
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Submission {
    Create(NewPosition),
    Update(Position),
}

impl Submission {
    /// Which banner reports this submission's outcome
    pub fn action(&self) -> Action {
        match self {
            Submission::Create(new) if new.parent_id.is_some() => Action::AddChild,
            Submission::Create(_) => Action::AddRoot,
            Submission::Update(_) => Action::Update,
        }
    }
}

/// Check required fields and normalize the draft
///
/// `name` and `description` must be non-blank; values are trimmed and an
/// empty parent id means root.
pub fn validate(draft: &PositionDraft) -> Result<Submission, FieldErrors> {
    let name = draft.name.trim();
    let description = draft.description.trim();

    let mut errors = FieldErrors::default();
    if name.is_empty() {
        errors.0.insert(Field::Name, "Name is required");
    }
    if description.is_empty() {
        errors.0.insert(Field::Description, "Description is required");
    }
    if !errors.is_empty() {
        return Err(errors);
    }

    let fields = NewPosition {
        name: name.to_string(),
        description: description.to_string(),
        parent_id: draft.parent_id.clone().filter(|p| !p.is_empty()),
    };
    Ok(match &draft.id {
        Some(id) => Submission::Update(Position::from_new(id.clone(), fields)),
        None => Submission::Create(fields),
    })
}

/// Open/closed state of a create or edit surface
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum FormSurface {
    #[default]
    Closed,
    Open {
        draft: PositionDraft,
        errors: FieldErrors,
    },
}

impl FormSurface {
    pub fn open_create(parent_id: Option<String>) -> Self {
        FormSurface::Open {
            draft: PositionDraft::new(parent_id),
            errors: FieldErrors::default(),
        }
    }

    pub fn open_edit(position: &Position) -> Self {
        FormSurface::Open {
            draft: PositionDraft::from_position(position),
            errors: FieldErrors::default(),
        }
    }

    pub fn is_open(&self) -> bool {
        matches!(self, FormSurface::Open { .. })
    }

    pub fn draft(&self) -> Option<&PositionDraft> {
        match self {
            FormSurface::Open { draft, .. } => Some(draft),
            FormSurface::Closed => None,
        }
    }

    pub fn error(&self, field: Field) -> Option<&'static str> {
        match self {
            FormSurface::Open { errors, .. } => errors.get(field),
            FormSurface::Closed => None,
        }
    }

    /// Edit one field; its previous error goes away
    pub fn set_field(&mut self, field: Field, value: impl Into<String>) {
        if let FormSurface::Open { draft, errors } = self {
            draft.set(field, value);
            errors.clear(field);
        }
    }

    /// Discard the draft without dispatching anything
    pub fn cancel(&mut self) {
        *self = FormSurface::Closed;
    }

    /// Validate and hand back the submission. The surface stays open
    /// with its draft either way; the owner closes it once the store
    /// reports success.
    pub fn validated(&mut self) -> Option<Submission> {
        let FormSurface::Open { draft, errors } = self else {
            return None;
        };
        match validate(draft) {
            Ok(submission) => {
                *errors = FieldErrors::default();
                Some(submission)
            }
            Err(found) => {
                *errors = found;
                None
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SubmitError {
    #[error("invalid input: {0}")]
    Invalid(FieldErrors),
    #[error(transparent)]
    Remote(#[from] DomainError),
}

/// Send an already validated submission to the store's create or update action
pub async fn apply_submission<R: PositionRepository + ?Sized>(
    store: &PositionStore<R>,
    submission: Submission,
) -> DomainResult<Position> {
    match submission {
        Submission::Create(position) => store.add(position).await,
        Submission::Update(position) => store.update(position).await,
    }
}

/// Validate a draft, then dispatch it; invalid drafts never reach the store
pub async fn submit_draft<R: PositionRepository + ?Sized>(
    store: &PositionStore<R>,
    draft: &PositionDraft,
) -> Result<Position, SubmitError> {
    let submission = validate(draft).map_err(SubmitError::Invalid)?;
    Ok(apply_submission(store, submission).await?)
}
