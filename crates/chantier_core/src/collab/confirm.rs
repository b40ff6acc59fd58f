//! User confirmation for destructive actions.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmationRequest {
    pub title: String,
    pub message: String,
    #[serde(default)]
    pub is_dangerous: bool,
    #[serde(default)]
    pub confirm_label: Option<String>,
    #[serde(default)]
    pub cancel_label: Option<String>,
}

impl ConfirmationRequest {
    /// A dangerous request with default button labels.
    pub fn dangerous(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            message: message.into(),
            is_dangerous: true,
            confirm_label: None,
            cancel_label: None,
        }
    }
}

/// Asks the user to approve an action.
pub trait Confirmer {
    fn confirm(&mut self, request: &ConfirmationRequest) -> bool;
}

impl<F> Confirmer for F
where
    F: FnMut(&ConfirmationRequest) -> bool,
{
    fn confirm(&mut self, request: &ConfirmationRequest) -> bool {
        self(request)
    }
}

/// Runs `on_confirm` only when the user approves; `None` means cancelled.
pub fn request_confirmation<C, F, R>(
    confirmer: &mut C,
    request: &ConfirmationRequest,
    on_confirm: F,
) -> Option<R>
where
    C: Confirmer + ?Sized,
    F: FnOnce() -> R,
{
    if confirmer.confirm(request) {
        Some(on_confirm())
    } else {
        log::debug!("event=confirmation module=collab status=cancelled");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::{request_confirmation, ConfirmationRequest};

    #[test]
    fn action_runs_only_on_approval() {
        let request = ConfirmationRequest::dangerous("Supprimer", "Confirmer ?");
        let mut ran = 0;

        let mut decline = |_: &ConfirmationRequest| false;
        assert_eq!(request_confirmation(&mut decline, &request, || ran += 1), None);
        assert_eq!(ran, 0);

        let mut approve = |_: &ConfirmationRequest| true;
        assert_eq!(request_confirmation(&mut approve, &request, || ran += 1), Some(()));
        assert_eq!(ran, 1);
    }
}
