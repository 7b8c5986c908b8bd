//! Domain logic for the gated book site, shared by the HTTP service and the
//! browser application.

pub mod access;
pub mod analytics;
pub mod content;
pub mod navigation;
pub mod qualification;
pub mod subscription;

pub use access::{FlagStore, Gate, GateDecision, Session};
pub use content::{book, Book, Chapter, Page};
pub use navigation::{resolve, Navigation};
pub use qualification::QualificationFlow;
