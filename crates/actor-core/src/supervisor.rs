//! # Supervision
//!
//! One-for-one supervision for mailbox-driven actors: a pure decision table
//! ([`SupervisorStrategy`]) maps each [`Fault`] kind to a [`Directive`], and
//! a [`Supervisor`] owns its children and drives their run loops.
//!
//! # Architecture Note
//! Escalation is modeled as an explicit forwarded failure signal, not as
//! stack unwinding: when the child's table says Escalate, the fault is
//! re-judged by the parent supervisor's own table, and an Escalate verdict
//! at the root is treated as Stop. A decision only ever applies to the
//! single failing child; siblings keep running untouched.

use crate::actor::{mailbox, Actor, ActorRef};
use crate::fault::Fault;
use std::collections::VecDeque;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;
use tokio::time::Instant;
use tracing::{error, info, warn};

/// What to do with a failing child.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Directive {
    /// Drop the failing message, keep the instance and its state, continue.
    Resume,
    /// Discard the failing instance and build a fresh one. Nothing is
    /// re-queued; the failing message is consumed.
    Restart,
    /// Terminate the child permanently.
    Stop,
    /// Let the parent supervisor's table decide.
    Escalate,
}

/// One-for-one decision table plus the restart budget that bounds it.
///
/// The table is fixed policy: arithmetic faults and breaker-open rejections
/// are transient (Resume), missing values and integrity violations warrant a
/// clean slate (Restart), validation faults are fatal to the instance
/// (Stop), and anything unclassified escalates. Exceeding the restart budget
/// turns any Restart into Stop.
#[derive(Debug, Clone)]
pub struct SupervisorStrategy {
    max_restarts: u32,
    window: Duration,
}

impl Default for SupervisorStrategy {
    fn default() -> Self {
        Self::one_for_one(5, Duration::from_secs(10))
    }
}

impl SupervisorStrategy {
    /// A strategy allowing at most `max_restarts` restarts per child within
    /// a rolling `window`.
    pub fn one_for_one(max_restarts: u32, window: Duration) -> Self {
        Self {
            max_restarts,
            window,
        }
    }

    /// Judge a single fault. Pure; restart accounting lives in the run loop.
    pub fn decide(&self, fault: &Fault) -> Directive {
        match fault {
            Fault::Arithmetic(_) => Directive::Resume,
            Fault::MissingValue(_) => Directive::Restart,
            Fault::Validation(_) => Directive::Stop,
            Fault::Integrity(_) => Directive::Restart,
            Fault::BreakerOpen => Directive::Resume,
            Fault::Other(_) => Directive::Escalate,
        }
    }

    fn restart_window(&self) -> RestartWindow {
        RestartWindow::new(self.max_restarts, self.window)
    }
}

/// Rolling-window restart counter, one per supervised child.
struct RestartWindow {
    max: u32,
    window: Duration,
    restarts: VecDeque<Instant>,
}

impl RestartWindow {
    fn new(max: u32, window: Duration) -> Self {
        Self {
            max,
            window,
            restarts: VecDeque::new(),
        }
    }

    /// Records a restart attempt and reports whether the budget allows it.
    fn allow(&mut self) -> bool {
        let now = Instant::now();
        while let Some(&oldest) = self.restarts.front() {
            if now.duration_since(oldest) >= self.window {
                self.restarts.pop_front();
            } else {
                break;
            }
        }
        if self.restarts.len() as u32 >= self.max {
            return false;
        }
        self.restarts.push_back(now);
        true
    }
}

/// Parent side of the supervision link. Owns zero or more children, each
/// with an independent mailbox, run loop and restart budget.
pub struct Supervisor {
    strategy: SupervisorStrategy,
    escalation: Option<SupervisorStrategy>,
    children: Vec<JoinHandle<()>>,
}

impl Supervisor {
    /// A root supervisor. Escalated faults have nowhere to go and stop the
    /// failing child.
    pub fn new(strategy: SupervisorStrategy) -> Self {
        Self {
            strategy,
            escalation: None,
            children: Vec::new(),
        }
    }

    /// A nested supervisor whose escalated faults are re-judged by the
    /// given parent table.
    pub fn with_parent(strategy: SupervisorStrategy, parent: SupervisorStrategy) -> Self {
        Self {
            strategy,
            escalation: Some(parent),
            children: Vec::new(),
        }
    }

    /// Spawns a supervised child and returns its reference.
    ///
    /// `factory` builds the initial instance and every replacement after a
    /// Restart verdict, which is how actor-local state (circuit breakers
    /// included) comes back fresh on reinitialization.
    pub fn spawn<A, F>(&mut self, name: &str, factory: F) -> ActorRef<A::Message>
    where
        A: Actor,
        F: Fn() -> A + Send + 'static,
    {
        let name: Arc<str> = Arc::from(name);
        let (actor_ref, receiver) = mailbox::<A::Message>(Arc::clone(&name));
        let strategy = self.strategy.clone();
        let escalation = self.escalation.clone();
        self.children.push(tokio::spawn(run_loop(
            name, receiver, factory, strategy, escalation,
        )));
        actor_ref
    }

    /// Waits for every child to terminate. Callers must drop their actor
    /// references first so the mailboxes close.
    pub async fn shutdown(self) {
        for child in self.children {
            let _ = child.await;
        }
    }
}

/// The per-actor consumption loop: strictly sequential message processing
/// plus the supervision state machine around it.
async fn run_loop<A, F>(
    name: Arc<str>,
    mut receiver: mpsc::UnboundedReceiver<A::Message>,
    factory: F,
    strategy: SupervisorStrategy,
    escalation: Option<SupervisorStrategy>,
) where
    A: Actor,
    F: Fn() -> A + Send + 'static,
{
    let mut actor = factory();
    actor.pre_start().await;
    info!(actor = %name, "actor started");
    let mut window = strategy.restart_window();

    while let Some(msg) = receiver.recv().await {
        let fault = match actor.handle(msg).await {
            Ok(()) => continue,
            Err(fault) => fault,
        };

        let mut directive = strategy.decide(&fault);
        if directive == Directive::Escalate {
            warn!(actor = %name, %fault, "escalating fault to parent supervisor");
            directive = match &escalation {
                Some(parent) => match parent.decide(&fault) {
                    // A root-level escalation has nowhere left to go.
                    Directive::Escalate => Directive::Stop,
                    other => other,
                },
                None => Directive::Stop,
            };
        }

        match directive {
            Directive::Resume => {
                warn!(actor = %name, %fault, "resuming, failing message dropped");
            }
            Directive::Restart => {
                if !window.allow() {
                    error!(actor = %name, %fault, "restart budget exhausted, stopping");
                    actor.post_stop().await;
                    info!(actor = %name, "actor stopped");
                    return;
                }
                error!(actor = %name, %fault, "restarting actor");
                actor.pre_restart(&fault).await;
                actor = factory();
                actor.pre_start().await;
                actor.post_restart(&fault).await;
            }
            Directive::Stop => {
                error!(actor = %name, %fault, "stopping actor");
                actor.post_stop().await;
                info!(actor = %name, "actor stopped");
                return;
            }
            Directive::Escalate => unreachable!("escalation resolved above"),
        }
    }

    // All senders dropped: clean shutdown.
    actor.post_stop().await;
    info!(actor = %name, "actor stopped");
}
