//! Domain model: the managed [`Record`] entity and its DTOs.

mod record;

pub use record::{Record, RecordFields, RecordItem};
