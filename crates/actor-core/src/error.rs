//! # Runtime Errors
//!
//! Errors produced by the messaging primitives themselves, as opposed to
//! [`Fault`](crate::fault::Fault)s raised by message handlers. Centralizing
//! them keeps every caller of [`ActorRef::ask`](crate::actor::ActorRef::ask)
//! handling the same failure set.

/// Errors that can occur while asking an actor for a reply.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AskError {
    /// The actor's mailbox is closed; it has stopped and will never reply.
    #[error("actor mailbox closed")]
    MailboxClosed,
    /// The actor dropped the reply channel without answering, usually
    /// because it stopped mid-request.
    #[error("actor dropped the reply channel")]
    ReplyDropped,
    /// No reply arrived within the configured wait. A reply that shows up
    /// later is discarded.
    #[error("no reply within the configured timeout")]
    Timeout,
}
