//! What a form action hands back to its caller.

use serde::Serialize;

use crate::{FieldErrors, NavigationIntent};

/// The three invoice mutations, used to word their failure messages.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mutation {
    Create,
    Update,
    Delete,
}

impl Mutation {
    pub fn verb(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Update => "update",
            Self::Delete => "delete",
        }
    }
}

/// Form state returned when an action did not go through.
///
/// Validation failures carry `errors` plus a summary `message`; persistence
/// failures carry only the `message`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ActionState {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub errors: Option<FieldErrors>,
    pub message: Option<String>,
}

impl ActionState {
    pub fn invalid(mutation: Mutation, errors: FieldErrors) -> Self {
        Self {
            errors: Some(errors),
            message: Some(format!(
                "missing fields. could not {} invoice.",
                mutation.verb()
            )),
        }
    }

    pub fn failed(mutation: Mutation) -> Self {
        Self {
            errors: None,
            message: Some(format!(
                "database error: could not {} invoice.",
                mutation.verb()
            )),
        }
    }
}

/// Result of one invoice action.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ActionOutcome {
    /// Create/update went through; the caller must navigate and stop.
    Navigate(NavigationIntent),
    /// Delete went through; nothing to show.
    Completed,
    /// Back to the form.
    State(ActionState),
}

impl ActionOutcome {
    pub fn state(&self) -> Option<&ActionState> {
        match self {
            Self::State(state) => Some(state),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn messages_name_the_mutation() {
        assert_eq!(
            ActionState::failed(Mutation::Delete).message.as_deref(),
            Some("database error: could not delete invoice.")
        );
        assert_eq!(
            ActionState::invalid(Mutation::Update, FieldErrors::default())
                .message
                .as_deref(),
            Some("missing fields. could not update invoice.")
        );
    }

    #[test]
    fn persistence_state_serializes_without_errors() {
        let json = serde_json::to_value(ActionState::failed(Mutation::Create)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({ "message": "database error: could not create invoice." })
        );
    }
}
