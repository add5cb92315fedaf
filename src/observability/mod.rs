//! Observability subsystem.
//!
//! # Data Flow
//! ```text
//! Library code (routing, server, lifecycle)
//!     → tracing macros (structured fields, no subscriber assumed)
//!
//! Binary startup:
//!     → logging.rs (install subscriber: EnvFilter + fmt layer)
//! ```
//!
//! # Design Decisions
//! - The library only emits events; installing a subscriber is the binary's job
//! - `RUST_LOG` overrides the configured level

pub mod logging;

pub use logging::init_logging;
