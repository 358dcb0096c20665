//! Core pipeline logic behind the API handlers: ingestion, suggestion
//! state machine, and chat context assembly.

pub mod chat;
pub mod ingest;
pub mod suggest;
