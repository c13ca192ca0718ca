//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **memory**: the directory store, held in process memory and seeded from
//!   a JSON file read through `cap-std`.
//! - **gemini**: the skill suggestion source, calling Gemini over `reqwest`.
//!
//! Adapters are thin translators between domain types and infrastructure
//! representations. They contain no business logic.

pub mod gemini;
pub mod memory;
