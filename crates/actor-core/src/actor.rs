//! # Actor Trait & Mailbox
//!
//! This module defines the [`Actor`] trait (a sequential message handler with
//! lifecycle hooks) and the [`ActorRef`] handle used to reach it.
//!
//! # Architecture Note
//! Each actor owns an ordered, unbounded mailbox and is driven by exactly one
//! Tokio task. A shared pool of worker threads runs many actors concurrently,
//! but for any single actor at most one message is in flight at a time, in
//! arrival order. That single-writer discipline is the only synchronization
//! mechanism the runtime offers: circuit-breaker counters, restart windows
//! and any other actor-local state are safe without locks precisely because
//! nothing outside the owning run loop can touch them.
//!
//! An [`ActorRef`] is the sole way to interact with an actor. It is an opaque,
//! cheaply cloneable handle; direct access to another actor's state is not
//! expressible.

use crate::error::AskError;
use crate::fault::Fault;
use async_trait::async_trait;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot};

/// A unit of state plus a sequential message-handling loop.
///
/// Implementations return `Err(Fault)` from [`handle`](Actor::handle) to put
/// the failure in front of the supervision policy; they never panic to signal
/// a recoverable problem. The lifecycle hooks default to no-ops so simple
/// actors only implement `handle`.
///
/// Hook order on an abnormal termination that the supervisor answers with
/// Restart: `pre_restart(fault)` runs on the failing instance, the instance
/// is dropped, a fresh instance comes from the spawn factory, `pre_start()`
/// runs, then `post_restart(fault)` fires (it can only ever run on a
/// second-or-later start). `post_stop()` fires once on permanent termination
/// and is followed by nothing.
#[async_trait]
pub trait Actor: Send + 'static {
    /// The message type this actor consumes.
    type Message: Send + 'static;

    /// Handle one message. Runs strictly sequentially per actor.
    async fn handle(&mut self, msg: Self::Message) -> Result<(), Fault>;

    /// Invoked once before the first message of each instance.
    async fn pre_start(&mut self) {}

    /// Invoked on the failing instance just before it is discarded.
    async fn pre_restart(&mut self, _fault: &Fault) {}

    /// Invoked on the replacement instance after `pre_start`.
    async fn post_restart(&mut self, _fault: &Fault) {}

    /// Invoked when the actor terminates permanently.
    async fn post_stop(&mut self) {}
}

/// An opaque, cloneable handle identifying one actor's mailbox.
///
/// Holding a reference keeps the mailbox open; an actor whose every sender
/// has been dropped drains its queue and stops cleanly.
pub struct ActorRef<M> {
    name: Arc<str>,
    sender: mpsc::UnboundedSender<M>,
}

impl<M> Clone for ActorRef<M> {
    fn clone(&self) -> Self {
        Self {
            name: Arc::clone(&self.name),
            sender: self.sender.clone(),
        }
    }
}

impl<M: Send + 'static> ActorRef<M> {
    pub(crate) fn new(name: Arc<str>, sender: mpsc::UnboundedSender<M>) -> Self {
        Self { name, sender }
    }

    /// The name the actor was spawned under.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Fire-and-forget send. Never blocks the caller and gives no delivery
    /// acknowledgment; ordering is FIFO per sender. Returns `false` if the
    /// actor has already stopped.
    pub fn tell(&self, msg: M) -> bool {
        self.sender.send(msg).is_ok()
    }

    /// Ask pattern: send one request and wait, bounded by `timeout`, for
    /// exactly one reply on a dedicated oneshot channel.
    ///
    /// `make` receives the reply sender so the caller can embed it in the
    /// outgoing message. On timeout the receiver is dropped and a late reply
    /// from the actor lands in a void; in-flight work on the actor side is
    /// not cancelled.
    pub async fn ask<R, F>(&self, timeout: Duration, make: F) -> Result<R, AskError>
    where
        R: Send + 'static,
        F: FnOnce(oneshot::Sender<R>) -> M,
    {
        let (reply_to, reply) = oneshot::channel();
        self.sender
            .send(make(reply_to))
            .map_err(|_| AskError::MailboxClosed)?;
        match tokio::time::timeout(timeout, reply).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(_)) => Err(AskError::ReplyDropped),
            Err(_) => Err(AskError::Timeout),
        }
    }
}

/// Creates the mailbox pair for a new actor.
pub(crate) fn mailbox<M: Send + 'static>(
    name: Arc<str>,
) -> (ActorRef<M>, mpsc::UnboundedReceiver<M>) {
    let (sender, receiver) = mpsc::unbounded_channel();
    (ActorRef::new(name, sender), receiver)
}
