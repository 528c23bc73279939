//! Search orchestration: the pause/resume/cancel state machine.
//!
//! One orchestrator drives one run at a time: `start()` snapshots the current
//! configuration and generates the candidate list, `run()` walks the
//! candidates strictly sequentially (one fan-out batch per candidate) and
//! halts on the first batch containing an available result. Pause and cancel
//! are cooperative — they take effect at step boundaries, never mid-probe —
//! so an in-flight batch always settles; its results are recorded unless the
//! run was cancelled while it was in flight.
//!
//! The handle is cheaply cloneable. A controller task can hold a clone and
//! call `pause`/`resume`/`cancel` while another task awaits `run()`.

use std::sync::{Arc, Mutex};

use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tokio::sync::Notify;
use tracing::debug;

use crate::checker::AvailabilityChecker;
use crate::error::DomainHuntError;
use crate::extensions::ExtensionSet;
use crate::generate::{generate_candidates, RandomSource};
use crate::registry::{Provider, ProviderRegistry};
use crate::types::{CheckResult, SearchEvent, SearchRequest, SearchState, SearchSummary, StopReason};
use crate::utils::validate_candidate;

/// Point-in-time copy of the configuration plus the generated candidate list
/// for one run. Edits to the live ExtensionSet/ProviderRegistry after
/// `start()` do not reach an in-flight run.
#[derive(Debug)]
struct RunPlan {
    candidates: Vec<String>,
    extensions: Vec<String>,
    providers: Vec<Provider>,
    /// Index of the next candidate to consume; persists across pauses so the
    /// run resumes exactly where it left off.
    next_index: usize,
}

struct Inner {
    state: SearchState,
    plan: Option<RunPlan>,
    log: Vec<CheckResult>,
    summary: SearchSummary,
    subscribers: Vec<UnboundedSender<SearchEvent>>,
}

impl Inner {
    fn emit(&mut self, event: SearchEvent) {
        self.subscribers.retain(|tx| tx.send(event.clone()).is_ok());
    }

    fn transition(&mut self, state: SearchState) {
        self.state = state;
        self.emit(SearchEvent::StateChanged(state));
    }
}

/// What the run loop decided to do for one iteration, computed under the
/// state lock and executed outside it.
enum Step {
    Finished(StopReason),
    Wait,
    Check {
        candidate: String,
        extensions: Vec<String>,
        providers: Vec<Provider>,
    },
}

/// The search state machine driving candidate iteration.
#[derive(Clone)]
pub struct SearchOrchestrator {
    checker: AvailabilityChecker,
    inner: Arc<Mutex<Inner>>,
    resumed: Arc<Notify>,
}

impl SearchOrchestrator {
    /// Create an orchestrator in the `Idle` state.
    pub fn new(checker: AvailabilityChecker) -> Self {
        Self {
            checker,
            inner: Arc::new(Mutex::new(Inner {
                state: SearchState::Idle,
                plan: None,
                log: Vec::new(),
                summary: SearchSummary::default(),
                subscribers: Vec::new(),
            })),
            resumed: Arc::new(Notify::new()),
        }
    }

    /// Subscribe to state-transition and result-appended events.
    pub fn subscribe(&self) -> UnboundedReceiver<SearchEvent> {
        let (tx, rx) = mpsc::unbounded_channel();
        self.lock().subscribers.push(tx);
        rx
    }

    /// Current state of the state machine.
    pub fn state(&self) -> SearchState {
        self.lock().state
    }

    /// The full result log, in append order.
    pub fn results(&self) -> Vec<CheckResult> {
        self.lock().log.clone()
    }

    /// The running summary counters.
    pub fn summary(&self) -> SearchSummary {
        self.lock().summary
    }

    /// Begin a new auto-search run.
    ///
    /// Valid only from `Idle` or `Stopped`. Snapshots the selected extensions
    /// and usable providers at this instant, generates the candidate list,
    /// resets the log and summary, and transitions to `Running`. If the
    /// generation request exceeds the alphabet's capacity the machine goes
    /// straight to `Stopped(CapacityExceeded)` and the error is returned;
    /// other invalid requests fail without a state change.
    pub fn start(
        &self,
        request: &SearchRequest,
        extensions: &ExtensionSet,
        registry: &ProviderRegistry,
        random: &mut dyn RandomSource,
    ) -> Result<(), DomainHuntError> {
        let mut inner = self.lock();
        if !inner.state.can_start() {
            return Err(DomainHuntError::invalid_transition(
                inner.state.to_string(),
                "start",
            ));
        }

        let candidates =
            match generate_candidates(request.length, request.count, &request.alphabet, random) {
                Ok(candidates) => candidates,
                Err(err @ DomainHuntError::CapacityExceeded { .. }) => {
                    inner.plan = None;
                    inner.transition(SearchState::Stopped {
                        reason: StopReason::CapacityExceeded,
                    });
                    return Err(err);
                }
                Err(err) => return Err(err),
            };

        debug!(
            candidates = candidates.len(),
            length = request.length,
            "starting auto search"
        );

        inner.plan = Some(RunPlan {
            candidates,
            extensions: extensions.selected(),
            providers: registry.list_usable(),
            next_index: 0,
        });
        inner.log.clear();
        inner.summary = SearchSummary::default();
        inner.transition(SearchState::Running);
        Ok(())
    }

    /// Drive the run to its terminal state, returning the stop reason.
    ///
    /// Candidates are checked strictly sequentially: the next candidate is
    /// only consumed after the previous batch has settled and the stop
    /// condition has been evaluated. While `Paused`, the loop parks without
    /// consuming a candidate.
    pub async fn run(&self) -> Result<StopReason, DomainHuntError> {
        loop {
            let step = self.next_step()?;
            match step {
                Step::Finished(reason) => return Ok(reason),
                Step::Wait => {
                    // resume()/cancel() store a permit, so a wakeup sent
                    // between releasing the lock and parking is not lost
                    self.resumed.notified().await;
                }
                Step::Check {
                    candidate,
                    extensions,
                    providers,
                } => {
                    let results = self.checker.check(&candidate, &extensions, &providers).await;
                    if let Some(reason) = self.absorb_batch(results) {
                        return Ok(reason);
                    }
                }
            }
        }
    }

    /// Decide the next loop iteration under the lock.
    fn next_step(&self) -> Result<Step, DomainHuntError> {
        let mut inner = self.lock();
        match inner.state {
            SearchState::Idle => Err(DomainHuntError::invalid_transition("idle", "run")),
            SearchState::Stopped { reason } => Ok(Step::Finished(reason)),
            SearchState::Paused => Ok(Step::Wait),
            SearchState::Running => {
                let plan = inner
                    .plan
                    .as_mut()
                    .ok_or_else(|| DomainHuntError::internal("running without a plan"))?;
                if plan.next_index >= plan.candidates.len() {
                    inner.transition(SearchState::Stopped {
                        reason: StopReason::Exhausted,
                    });
                    return Ok(Step::Finished(StopReason::Exhausted));
                }
                let candidate = plan.candidates[plan.next_index].clone();
                plan.next_index += 1;
                let extensions = plan.extensions.clone();
                let providers = plan.providers.clone();
                inner.emit(SearchEvent::CandidateStarted(candidate.clone()));
                debug!(candidate, "checking candidate");
                Ok(Step::Check {
                    candidate,
                    extensions,
                    providers,
                })
            }
        }
    }

    /// Record a settled batch and evaluate the stop condition.
    ///
    /// Returns `Some(reason)` when the run is over: either the batch hit an
    /// available domain, or the run was stopped (cancelled) while the batch
    /// was in flight — in which case the batch is discarded, so nothing leaks
    /// into a cancelled run's log or summary.
    fn absorb_batch(&self, results: Vec<CheckResult>) -> Option<StopReason> {
        let mut inner = self.lock();
        if let SearchState::Stopped { reason } = inner.state {
            return Some(reason);
        }

        let found = results.iter().any(|r| r.is_available());
        inner.summary.absorb(&results);
        inner.log.extend(results.iter().cloned());
        inner.emit(SearchEvent::ResultsAppended(results));

        if found {
            inner.transition(SearchState::Stopped {
                reason: StopReason::FoundAvailable,
            });
            return Some(StopReason::FoundAvailable);
        }
        None
    }

    /// Pause a running search. Takes effect before the next candidate is
    /// consumed; the in-flight batch (if any) still completes and records.
    pub fn pause(&self) -> Result<(), DomainHuntError> {
        let mut inner = self.lock();
        match inner.state {
            SearchState::Running => {
                inner.transition(SearchState::Paused);
                Ok(())
            }
            state => Err(DomainHuntError::invalid_transition(
                state.to_string(),
                "pause",
            )),
        }
    }

    /// Resume a paused search exactly where it left off.
    pub fn resume(&self) -> Result<(), DomainHuntError> {
        let mut inner = self.lock();
        match inner.state {
            SearchState::Paused => {
                inner.transition(SearchState::Running);
                drop(inner);
                self.resumed.notify_one();
                Ok(())
            }
            state => Err(DomainHuntError::invalid_transition(
                state.to_string(),
                "resume",
            )),
        }
    }

    /// Cancel a running or paused search. Results recorded so far stay in
    /// the log; a batch that settles after this point is discarded.
    pub fn cancel(&self) -> Result<(), DomainHuntError> {
        let mut inner = self.lock();
        match inner.state {
            SearchState::Running | SearchState::Paused => {
                inner.transition(SearchState::Stopped {
                    reason: StopReason::Cancelled,
                });
                drop(inner);
                self.resumed.notify_one();
                Ok(())
            }
            state => Err(DomainHuntError::invalid_transition(
                state.to_string(),
                "cancel",
            )),
        }
    }

    /// Check a single user-supplied candidate against the *live*
    /// configuration, outside the state machine.
    ///
    /// Appends to the result log and summary but never participates in the
    /// stop condition, and may run alongside an auto-search.
    pub async fn search_once(
        &self,
        candidate: &str,
        extensions: &ExtensionSet,
        registry: &ProviderRegistry,
    ) -> Result<Vec<CheckResult>, DomainHuntError> {
        // Validation tolerates surrounding whitespace; probe the trimmed
        // name so it never ends up inside a domain string.
        let candidate = candidate.trim();
        validate_candidate(candidate)?;
        let results = self
            .checker
            .check(candidate, &extensions.selected(), &registry.list_usable())
            .await;

        let mut inner = self.lock();
        inner.summary.absorb(&results);
        inner.log.extend(results.iter().cloned());
        inner.emit(SearchEvent::ResultsAppended(results.clone()));
        Ok(results)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        self.inner.lock().expect("orchestrator state lock poisoned")
    }
}
