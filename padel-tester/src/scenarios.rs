//! Scripted wizard scenarios. Each one drives a `WizardSession` the way the
//! browser host does, against a scripted backend, and fails with the first
//! broken expectation.
use anyhow::{Context, Result, anyhow, bail, ensure};
use padel_core::{
    Draft, DraftStorage, DraftStore, OnboardingDraft, OnboardingStep, RemoteError, StepPosition,
    SubmissionGateway, SubmitError, TournamentDraft, TournamentStep, TransitionCommand,
    WizardConfig, WizardSession, WizardStep,
};
use serde_json::json;
use std::future::Future;
use std::pin::Pin;
use std::rc::Rc;
use std::time::Duration;

use crate::remote::ScriptedRemote;

pub struct ScenarioCtx {
    pub storage: Rc<dyn DraftStorage>,
    pub config: WizardConfig,
    /// Sleep through transition delays instead of firing them immediately.
    pub realtime: bool,
    pub verbose: bool,
}

impl ScenarioCtx {
    fn store_for<D: Draft>(&self) -> DraftStore {
        DraftStore::new(self.storage.clone(), &self.config.storage_namespace, D::FLOW)
    }

    /// Start from an empty flow so scenarios do not see each other's drafts.
    fn fresh_session<D: Draft>(&self) -> Result<WizardSession<D>> {
        self.store_for::<D>()
            .clear()
            .with_context(|| format!("clearing {} draft", D::FLOW))?;
        Ok(WizardSession::fresh(self.storage.clone(), &self.config))
    }

    fn gateway_for<D: Draft>(&self, remote: &Rc<ScriptedRemote>) -> SubmissionGateway<D> {
        SubmissionGateway::new(remote.clone(), self.store_for::<D>(), &self.config)
    }

    fn resume<D: Draft>(&self) -> Result<WizardSession<D>> {
        WizardSession::resume(self.storage.clone(), &self.config)
            .with_context(|| format!("resuming {} draft", D::FLOW))
    }

    fn trace(&self, line: impl AsRef<str>) {
        if self.verbose {
            println!("   · {}", line.as_ref());
        }
    }
}

type ScenarioFuture<'a> = Pin<Box<dyn Future<Output = Result<()>> + 'a>>;
type ScenarioFn = for<'a> fn(&'a ScenarioCtx) -> ScenarioFuture<'a>;

struct Scenario {
    key: &'static str,
    description: &'static str,
    run: ScenarioFn,
}

const CATALOG: &[Scenario] = &[
    Scenario {
        key: "onboarding-happy",
        description: "Walk every onboarding step and submit once",
        run: |ctx| Box::pin(onboarding_happy(ctx)),
    },
    Scenario {
        key: "onboarding-missing-field",
        description: "Submission without a nationality never reaches the backend",
        run: |ctx| Box::pin(onboarding_missing_field(ctx)),
    },
    Scenario {
        key: "remote-failure-retry",
        description: "Backend rejection keeps the draft across a reload until a manual retry",
        run: |ctx| Box::pin(remote_failure_retry(ctx)),
    },
    Scenario {
        key: "transition-contention",
        description: "Requests made mid-transition are dropped",
        run: |ctx| Box::pin(transition_contention(ctx)),
    },
    Scenario {
        key: "tournament-happy",
        description: "Create a tournament through all six steps",
        run: |ctx| Box::pin(tournament_happy(ctx)),
    },
    Scenario {
        key: "double-submit",
        description: "Overlapping submits make one call; an abandoned call frees the gateway",
        run: |ctx| Box::pin(double_submit(ctx)),
    },
    Scenario {
        key: "resume-after-reload",
        description: "A reopened session lands on the last reached step",
        run: |ctx| Box::pin(resume_after_reload(ctx)),
    },
];

pub fn list_scenarios() -> Vec<(&'static str, &'static str)> {
    CATALOG.iter().map(|s| (s.key, s.description)).collect()
}

pub fn all_keys() -> Vec<String> {
    CATALOG.iter().map(|s| s.key.to_string()).collect()
}

/// Run one scenario by key. `None` if the key is unknown.
pub async fn run_scenario(key: &str, ctx: &ScenarioCtx) -> Option<Result<()>> {
    let scenario = CATALOG.iter().find(|s| s.key == key)?;
    Some((scenario.run)(ctx).await)
}

/// Carry a transition through its delays, the way the browser timers do.
async fn settle<D: Draft>(
    ctx: &ScenarioCtx,
    session: &mut WizardSession<D>,
    command: Option<TransitionCommand<D::Step>>,
) -> Result<()> {
    let mut next = command;
    if next.is_none() {
        bail!("{} transition from {} was rejected", D::FLOW, session.position().slug());
    }
    while let Some(command) = next {
        next = match command {
            TransitionCommand::ScheduleExit { after } => {
                if ctx.realtime {
                    tokio::time::sleep(after).await;
                }
                session.exit_elapsed()
            }
            TransitionCommand::Navigate {
                target,
                settle_after,
            } => {
                ctx.trace(format!("{} -> {}", D::FLOW, target.slug()));
                if ctx.realtime {
                    tokio::time::sleep(settle_after).await;
                }
                session.settle_elapsed();
                None
            }
        };
    }
    Ok(())
}

/// Fill each step's fields and advance until terminal.
async fn walk<D: Draft>(
    ctx: &ScenarioCtx,
    session: &mut WizardSession<D>,
    inputs: &[(D::Step, &[(&str, &str)])],
) -> Result<()> {
    for (step, fields) in inputs {
        ensure!(
            session.position() == StepPosition::Step(*step),
            "expected step {}, found {}",
            step.slug(),
            session.position().slug()
        );
        for (field, value) in *fields {
            ensure!(
                session.update_field(field, value)?,
                "step {} refused field {field}",
                step.slug()
            );
        }
        let command = session.next();
        settle(ctx, session, command).await?;
    }
    Ok(())
}

const ONBOARDING_INPUTS: [(OnboardingStep, &[(&str, &str)]); 4] = [
    (OnboardingStep::Name, &[("first_name", "A"), ("last_name", "B")]),
    (OnboardingStep::Gender, &[("gender", "female")]),
    (OnboardingStep::Nationality, &[("nationality", "MU")]),
    (OnboardingStep::Photo, &[]),
];

async fn onboarding_happy(ctx: &ScenarioCtx) -> Result<()> {
    let mut session = ctx.fresh_session::<OnboardingDraft>()?;
    walk(ctx, &mut session, &ONBOARDING_INPUTS).await?;
    ensure!(session.position().is_terminal(), "onboarding did not reach terminal");

    let remote = Rc::new(ScriptedRemote::new());
    let gateway = ctx.gateway_for::<OnboardingDraft>(&remote);
    let confirmation = gateway.submit(session.draft()).await?;
    session.reset();

    ensure!(confirmation.redirect == "/home", "unexpected redirect {}", confirmation.redirect);
    ensure!(remote.call_count() == 1, "expected one call, saw {}", remote.call_count());
    let calls = remote.calls();
    let (procedure, params) = &calls[0];
    ensure!(procedure == "complete_user_onboarding", "called {procedure}");
    ensure!(params["p_nationality"] == json!("MU"), "payload was {params}");
    ensure!(params["p_profile_photo"].is_null(), "blank photo should be null");
    ensure!(session.store().is_empty()?, "draft still staged after success");
    Ok(())
}

async fn onboarding_missing_field(ctx: &ScenarioCtx) -> Result<()> {
    let mut session = ctx.fresh_session::<OnboardingDraft>()?;
    walk(ctx, &mut session, &ONBOARDING_INPUTS[..2]).await?;

    let remote = Rc::new(ScriptedRemote::new());
    let gateway = ctx.gateway_for::<OnboardingDraft>(&remote);
    match gateway.submit(session.draft()).await {
        Err(SubmitError::Validation { missing }) => {
            ensure!(missing == ["nationality"], "missing fields were {missing:?}");
        }
        other => bail!("expected a validation error, got {other:?}"),
    }
    ensure!(remote.call_count() == 0, "validation failure reached the backend");
    ensure!(!session.store().is_empty()?, "draft should stay staged");
    ctx.store_for::<OnboardingDraft>().clear()?;
    Ok(())
}

async fn remote_failure_retry(ctx: &ScenarioCtx) -> Result<()> {
    let mut session = ctx.fresh_session::<OnboardingDraft>()?;
    walk(ctx, &mut session, &ONBOARDING_INPUTS).await?;

    let remote = Rc::new(ScriptedRemote::new().then(Err(RemoteError::Status {
        status: 409,
        message: "profile already exists".to_string(),
    })));
    let gateway = ctx.gateway_for::<OnboardingDraft>(&remote);
    let err = gateway
        .submit(session.draft())
        .await
        .err()
        .ok_or_else(|| anyhow!("first submission should fail"))?;
    ensure!(err.to_string() == "profile already exists", "message was {err}");
    ensure!(
        gateway.status().error() == Some("profile already exists"),
        "status did not carry the backend message"
    );
    drop(session);

    let reloaded = ctx.resume::<OnboardingDraft>()?;
    ensure!(reloaded.position().is_terminal(), "reload lost the terminal step");
    ensure!(
        reloaded.draft().first_name.as_deref() == Some("A"),
        "reload lost the draft"
    );
    gateway.submit(reloaded.draft()).await?;
    ensure!(remote.call_count() == 2, "retry should be exactly one more call");
    ensure!(ctx.store_for::<OnboardingDraft>().is_empty()?, "draft survived success");
    Ok(())
}

async fn transition_contention(ctx: &ScenarioCtx) -> Result<()> {
    let mut session = ctx.fresh_session::<OnboardingDraft>()?;
    session.update_field("first_name", "A")?;
    session.update_field("last_name", "B")?;

    let first = session.next();
    ensure!(first.is_some(), "first request should be accepted");
    ensure!(session.next().is_none(), "second next while exiting was accepted");
    ensure!(session.back().is_none(), "back while exiting was accepted");
    let navigate = session.exit_elapsed();
    ensure!(
        session.jump_to(StepPosition::Terminal).is_none(),
        "jump while entering was accepted"
    );
    if ctx.realtime {
        tokio::time::sleep(ctx.config.timings.settle()).await;
    }
    ensure!(navigate.is_some() && session.settle_elapsed(), "transition did not settle");
    ensure!(
        session.position() == StepPosition::Step(OnboardingStep::Gender),
        "position moved more than once: {}",
        session.position().slug()
    );
    ctx.store_for::<OnboardingDraft>().clear()?;
    Ok(())
}

async fn tournament_happy(ctx: &ScenarioCtx) -> Result<()> {
    let mut session = ctx.fresh_session::<TournamentDraft>()?;
    let inputs: [(TournamentStep, &[(&str, &str)]); 6] = [
        (TournamentStep::Details, &[("name", "Autumn Open")]),
        (TournamentStep::Venue, &[("venue", "Club Norte")]),
        (TournamentStep::Format, &[("format", "golden_point")]),
        (TournamentStep::Bracket, &[("bracket_type", "single_elimination")]),
        (TournamentStep::Capacity, &[("max_teams", "16")]),
        (TournamentStep::Schedule, &[("start_date", "2026-11-07")]),
    ];
    ensure!(inputs.len() == TournamentStep::ALL.len(), "inputs must cover every step");
    walk(ctx, &mut session, &inputs).await?;
    ensure!(session.position().is_terminal(), "tournament did not reach terminal");

    let remote = Rc::new(ScriptedRemote::new().then(Ok(json!({ "id": 42 }))));
    let gateway = ctx.gateway_for::<TournamentDraft>(&remote);
    let confirmation = gateway.submit(session.draft()).await?;
    ensure!(
        confirmation.redirect == "/tournaments",
        "unexpected redirect {}",
        confirmation.redirect
    );
    ensure!(confirmation.response["id"] == 42, "response not passed through");
    let calls = remote.calls();
    ensure!(calls.len() == 1 && calls[0].0 == "create_tournament", "calls were {calls:?}");
    ensure!(calls[0].1["p_max_teams"] == json!(16), "capacity should travel as a number");
    Ok(())
}

async fn double_submit(ctx: &ScenarioCtx) -> Result<()> {
    let mut session = ctx.fresh_session::<OnboardingDraft>()?;
    walk(ctx, &mut session, &ONBOARDING_INPUTS).await?;

    let floor = Duration::from_millis(20);
    let latency = if ctx.realtime {
        ctx.config.timings.exit().max(floor)
    } else {
        floor
    };
    let remote = Rc::new(ScriptedRemote::new().with_latency(latency));
    let gateway = ctx.gateway_for::<OnboardingDraft>(&remote);

    // Walk away from a slow call; the gateway must not stay in flight.
    let abandoned = tokio::time::timeout(latency / 4, gateway.submit(session.draft())).await;
    ensure!(abandoned.is_err(), "slow call finished before the timeout");
    ensure!(!gateway.status().is_loading(), "abandoned call left the gateway in flight");
    ensure!(!session.store().is_empty()?, "abandoned call cleared the draft");

    let (first, second) = tokio::join!(
        gateway.submit(session.draft()),
        gateway.submit(session.draft())
    );
    ensure!(
        matches!(second, Err(SubmitError::InFlight)),
        "overlapping submit was not refused: {second:?}"
    );
    first.context("first of two overlapping submits")?;
    ensure!(
        remote.call_count() == 2,
        "expected the abandoned call and one completed call, saw {}",
        remote.call_count()
    );
    ctx.trace(format!("{} calls, latency {latency:?}", remote.call_count()));
    session.reset();
    ensure!(session.store().is_empty()?, "draft still staged after success");
    Ok(())
}

async fn resume_after_reload(ctx: &ScenarioCtx) -> Result<()> {
    let mut session = ctx.fresh_session::<TournamentDraft>()?;
    let inputs: [(TournamentStep, &[(&str, &str)]); 2] = [
        (TournamentStep::Details, &[("name", "Spring Cup")]),
        (TournamentStep::Venue, &[("venue", "Padel Sur")]),
    ];
    walk(ctx, &mut session, &inputs).await?;
    drop(session);

    let reopened = ctx.resume::<TournamentDraft>()?;
    ensure!(
        reopened.position() == StepPosition::Step(TournamentStep::Format),
        "reopened at {}",
        reopened.position().slug()
    );
    ensure!(reopened.draft().venue.as_deref() == Some("Padel Sur"), "venue not restored");
    let cleared = reopened.store().clear()?;
    ctx.trace(format!("cleared {cleared} staged keys"));
    Ok(())
}
