//! Yew glue between a [`WizardSession`] and the step views.
//!
//! The session is the only writer of step position; views get read-only
//! snapshots plus callbacks. Timer delays from the transition controller are
//! scheduled on the browser event loop and run inline off-browser.
pub mod renderer;

use crate::app::services::Services;
use crate::router::Route;
use padel_core::{
    Draft, MemoryStorage, StepPosition, SubmissionGateway, SubmitError, TransitionCommand,
    TransitionSnapshot, WizardSession,
};
use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;
use yew::prelude::*;
use yew_router::prelude::*;

/// Everything a wizard page needs to render its current step.
pub struct WizardHandle<D: Draft> {
    pub snapshot: TransitionSnapshot<D::Step>,
    pub draft: D,
    pub can_advance: bool,
    pub submitting: bool,
    /// Outcome of the last submit attempt. Only the review step shows it.
    pub submit_error: Option<AttrValue>,
    pub on_change: Callback<(&'static str, String)>,
    pub on_next: Callback<()>,
    pub on_back: Callback<()>,
    pub on_submit: Callback<()>,
}

fn open_session<D: Draft>(services: &Services) -> WizardSession<D> {
    WizardSession::resume(services.storage.clone(), &services.config).unwrap_or_else(|err| {
        log::error!("cannot resume {} draft, starting over in memory: {err}", D::FLOW);
        WizardSession::fresh(Rc::new(MemoryStorage::new()), &services.config)
    })
}

#[cfg(target_arch = "wasm32")]
fn schedule(after: Duration, task: impl FnOnce() + 'static) {
    let ms = i32::try_from(after.as_millis()).unwrap_or(i32::MAX);
    wasm_bindgen_futures::spawn_local(async move {
        if let Err(err) = crate::dom::sleep_ms(ms).await {
            log::warn!("transition timer failed: {}", crate::dom::js_error_message(&err));
        }
        task();
    });
}

#[cfg(not(target_arch = "wasm32"))]
fn schedule(_after: Duration, task: impl FnOnce() + 'static) {
    task();
}

/// Carries controller commands through their delays.
struct Driver<D: Draft> {
    session: Rc<RefCell<WizardSession<D>>>,
    navigator: Option<Navigator>,
    route_for: fn(StepPosition<D::Step>) -> Route,
    force: UseForceUpdateHandle,
}

impl<D: Draft> Clone for Driver<D> {
    fn clone(&self) -> Self {
        Self {
            session: self.session.clone(),
            navigator: self.navigator.clone(),
            route_for: self.route_for,
            force: self.force.clone(),
        }
    }
}

impl<D: Draft + 'static> Driver<D> {
    fn run(&self, command: Option<TransitionCommand<D::Step>>) {
        let Some(command) = command else {
            return;
        };
        self.force.force_update();
        match command {
            TransitionCommand::ScheduleExit { after } => {
                let this = self.clone();
                schedule(after, move || {
                    let next = this.session.borrow_mut().exit_elapsed();
                    this.run(next);
                });
            }
            TransitionCommand::Navigate {
                target,
                settle_after,
            } => {
                if let Some(nav) = &self.navigator {
                    nav.push(&(self.route_for)(target));
                }
                let this = self.clone();
                schedule(settle_after, move || {
                    this.session.borrow_mut().settle_elapsed();
                    this.force.force_update();
                });
            }
        }
    }
}

/// Mount a wizard for draft type `D`, resuming anything staged earlier.
/// `route_for` maps positions to addressable routes.
#[hook]
pub fn use_wizard<D>(route_for: fn(StepPosition<D::Step>) -> Route) -> WizardHandle<D>
where
    D: Draft + 'static,
{
    let services = use_context::<Services>().unwrap_or_else(Services::detached);
    let session = {
        let services = services.clone();
        use_mut_ref(move || open_session::<D>(&services))
    };
    let gateway = {
        let store = session.borrow().store().clone();
        use_memo((), move |_| {
            SubmissionGateway::<D>::new(services.remote.clone(), store, &services.config)
        })
    };
    let force = use_force_update();
    let submitting = use_state(|| false);
    let validation = use_state(|| None::<String>);
    let navigator = use_navigator();

    {
        let navigator = navigator.clone();
        let position = session.borrow().position();
        use_effect_with((), move |_| {
            if let Some(nav) = navigator {
                nav.replace(&route_for(position));
            }
            || {}
        });
    }

    let driver = Driver {
        session: session.clone(),
        navigator: navigator.clone(),
        route_for,
        force: force.clone(),
    };

    let on_next = {
        let driver = driver.clone();
        Callback::from(move |()| {
            let command = driver.session.borrow_mut().next();
            driver.run(command);
        })
    };

    let on_back = {
        let driver = driver.clone();
        Callback::from(move |()| {
            let command = driver.session.borrow_mut().back();
            driver.run(command);
        })
    };

    let on_change = {
        let session = session.clone();
        let force = force.clone();
        Callback::from(move |(field, value): (&'static str, String)| {
            if let Err(err) = session.borrow_mut().update_field(field, &value) {
                log::warn!("could not stage {field}: {err}");
            }
            force.force_update();
        })
    };

    let on_submit = {
        let session = session.clone();
        let gateway = gateway.clone();
        let submitting = submitting.clone();
        let validation = validation.clone();
        let force = force.clone();
        Callback::from(move |()| {
            let draft = session.borrow().draft().clone();
            submitting.set(true);
            validation.set(None);
            let session = session.clone();
            let gateway = gateway.clone();
            let navigator = navigator.clone();
            let submitting = submitting.clone();
            let validation = validation.clone();
            let force = force.clone();
            yew::platform::spawn_local(async move {
                match gateway.submit(&draft).await {
                    Ok(confirmation) => {
                        session.borrow_mut().reset();
                        if let Some(nav) = navigator {
                            nav.push(&Route::from_redirect(&confirmation.redirect));
                        }
                    }
                    Err(SubmitError::Validation { missing }) => {
                        validation.set(Some(format!("Please complete: {}", missing.join(", "))));
                    }
                    Err(err) => log::warn!("{} submission not completed: {err}", D::FLOW),
                }
                submitting.set(false);
                force.force_update();
            });
        })
    };

    let status = gateway.status();
    let submit_error = (*validation)
        .clone()
        .or_else(|| status.error().map(str::to_string))
        .map(AttrValue::from);
    let current = session.borrow();
    WizardHandle {
        snapshot: current.controller().current_state(),
        draft: current.draft().clone(),
        can_advance: current.can_advance(),
        submitting: *submitting || status.is_loading(),
        submit_error,
        on_change,
        on_next,
        on_back,
        on_submit,
    }
}
