//! Final submission of a staged draft.
use crate::config::WizardConfig;
use crate::draft::{Draft, DraftStore};
use crate::remote::{RemoteError, RemoteProcedure};
use serde_json::Value;
use std::cell::RefCell;
use std::marker::PhantomData;
use std::rc::Rc;

#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    #[error("missing required fields: {}", .missing.join(", "))]
    Validation { missing: Vec<&'static str> },
    #[error("a submission is already in progress")]
    InFlight,
    #[error(transparent)]
    Remote(#[from] RemoteError),
}

/// Returned once per successful submission.
#[derive(Clone, Debug, PartialEq)]
pub struct Confirmation {
    pub procedure: String,
    pub response: Value,
    /// View to navigate to now that the draft is gone.
    pub redirect: String,
}

/// What a terminal view shows while and after submitting.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Submitting,
    Failed(String),
    Succeeded,
}

impl SubmissionStatus {
    #[must_use]
    pub const fn is_loading(&self) -> bool {
        matches!(self, Self::Submitting)
    }

    #[must_use]
    pub fn error(&self) -> Option<&str> {
        match self {
            Self::Failed(message) => Some(message),
            _ => None,
        }
    }
}

/// Holds the gateway in `Submitting` for the lifetime of one call. If the
/// submit future is dropped before the call returns, the status falls back
/// to `Idle` so the next submit is not refused as in flight.
struct InFlightGuard<'a> {
    status: &'a RefCell<SubmissionStatus>,
    settled: bool,
}

impl<'a> InFlightGuard<'a> {
    fn begin(status: &'a RefCell<SubmissionStatus>) -> Self {
        status.replace(SubmissionStatus::Submitting);
        Self {
            status,
            settled: false,
        }
    }

    fn settle(mut self, outcome: SubmissionStatus) {
        self.settled = true;
        self.status.replace(outcome);
    }
}

impl Drop for InFlightGuard<'_> {
    fn drop(&mut self) {
        if !self.settled {
            log::debug!("submission abandoned before the call returned");
            self.status.replace(SubmissionStatus::Idle);
        }
    }
}

/// Turns a complete draft into exactly one remote call.
///
/// Order of effects on success: remote call, draft cleared, confirmation
/// returned for the caller to navigate. If the caller goes away between
/// the clear and the navigation the user starts over with an empty draft.
pub struct SubmissionGateway<D: Draft> {
    remote: Rc<dyn RemoteProcedure>,
    store: DraftStore,
    procedure: String,
    redirect: String,
    status: RefCell<SubmissionStatus>,
    _draft: PhantomData<D>,
}

impl<D: Draft> SubmissionGateway<D> {
    #[must_use]
    pub fn new(remote: Rc<dyn RemoteProcedure>, store: DraftStore, config: &WizardConfig) -> Self {
        let flow = D::flow_config(config);
        Self {
            remote,
            store,
            procedure: flow.procedure.clone(),
            redirect: flow.redirect.clone(),
            status: RefCell::new(SubmissionStatus::Idle),
            _draft: PhantomData,
        }
    }

    #[must_use]
    pub fn status(&self) -> SubmissionStatus {
        self.status.borrow().clone()
    }

    #[must_use]
    pub fn procedure(&self) -> &str {
        &self.procedure
    }

    /// Validate, call the procedure once, and clear the draft on success.
    /// Nothing is retried; a failed call leaves the draft in place.
    ///
    /// # Errors
    ///
    /// - [`SubmitError::Validation`] if required fields are blank (no call made).
    /// - [`SubmitError::InFlight`] if a previous submit has not returned.
    /// - [`SubmitError::Remote`] with the backend's message.
    ///
    /// Dropping the returned future mid-call resets the status to `Idle`.
    pub async fn submit(&self, draft: &D) -> Result<Confirmation, SubmitError> {
        let missing = draft.missing_required();
        if !missing.is_empty() {
            return Err(SubmitError::Validation { missing });
        }
        if self.status.borrow().is_loading() {
            return Err(SubmitError::InFlight);
        }
        let guard = InFlightGuard::begin(&self.status);

        log::info!("submitting {} draft via {}", D::FLOW, self.procedure);
        let outcome = self.remote.call(&self.procedure, &draft.to_payload()).await;

        match outcome {
            Ok(response) => {
                if let Err(err) = self.store.clear() {
                    log::warn!("{} submitted but draft not cleared: {err}", D::FLOW);
                }
                guard.settle(SubmissionStatus::Succeeded);
                Ok(Confirmation {
                    procedure: self.procedure.clone(),
                    response,
                    redirect: self.redirect.clone(),
                })
            }
            Err(err) => {
                log::error!("{} submission failed: {err}", D::FLOW);
                guard.settle(SubmissionStatus::Failed(err.to_string()));
                Err(SubmitError::Remote(err))
            }
        }
    }
}
