//! # actor-core
//!
//! Building blocks for fault-tolerant, message-driven services: a minimal
//! actor runtime with mailboxes and lifecycle hooks, one-for-one
//! supervision with a bounded restart budget, and a circuit breaker for
//! guarding calls to unreliable collaborators.
//!
//! ## Concurrency Model
//!
//! - Each actor runs in its own Tokio task on the shared worker pool.
//! - Messages are processed **sequentially** within an actor, in arrival
//!   order; no two messages for the same actor ever run concurrently.
//! - Actor-local state (circuit breaker counters included) needs no locks,
//!   because only the owning run loop can reach it.
//! - Actors are reachable exclusively through cloneable [`ActorRef`]
//!   handles; [`ActorRef::tell`] is fire-and-forget, [`ActorRef::ask`] is
//!   send-and-wait-for-one-reply bounded by a timeout.
//!
//! ## Failure Handling
//!
//! Handlers report trouble by returning a classified [`Fault`] instead of
//! panicking. The spawning [`Supervisor`] judges each fault with its
//! [`SupervisorStrategy`] decision table: resume past transient faults,
//! rebuild the instance for state-corrupting ones, stop on fatal input,
//! escalate the unclassified rest to the parent table. Restarts are bounded
//! by a rolling window so a hot failure loop degrades into a stop.
//!
//! ```rust
//! use actor_core::{Actor, Fault, Supervisor, SupervisorStrategy};
//! use async_trait::async_trait;
//! use std::time::Duration;
//!
//! struct Counter {
//!     count: u64,
//! }
//!
//! enum Msg {
//!     Increment,
//!     Report(tokio::sync::oneshot::Sender<u64>),
//! }
//!
//! #[async_trait]
//! impl Actor for Counter {
//!     type Message = Msg;
//!
//!     async fn handle(&mut self, msg: Msg) -> Result<(), Fault> {
//!         match msg {
//!             Msg::Increment => self.count += 1,
//!             Msg::Report(reply_to) => {
//!                 let _ = reply_to.send(self.count);
//!             }
//!         }
//!         Ok(())
//!     }
//! }
//!
//! #[tokio::main]
//! async fn main() {
//!     let mut supervisor = Supervisor::new(SupervisorStrategy::default());
//!     let counter = supervisor.spawn("counter", || Counter { count: 0 });
//!
//!     counter.tell(Msg::Increment);
//!     let count = counter
//!         .ask(Duration::from_secs(1), Msg::Report)
//!         .await
//!         .unwrap();
//!     assert_eq!(count, 1);
//!
//!     drop(counter);
//!     supervisor.shutdown().await;
//! }
//! ```

pub mod actor;
pub mod breaker;
pub mod error;
pub mod fault;
pub mod observability;
pub mod supervisor;

pub use actor::{Actor, ActorRef};
pub use breaker::{BreakerConfig, BreakerError, BreakerState, CircuitBreaker};
pub use error::AskError;
pub use fault::Fault;
pub use observability::setup_tracing;
pub use supervisor::{Directive, Supervisor, SupervisorStrategy};
