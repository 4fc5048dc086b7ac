//! Application use cases. Orchestrate domain logic via ports.

pub mod calendar_service;

pub use calendar_service::CalendarService;
