//! Message inbox service
//!
//! Read-only access to the messages renters send to listing owners.
//! Sending and read-state changes live outside this service.

mod service;

pub use service::MessageService;
