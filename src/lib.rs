#![warn(clippy::all, clippy::pedantic)]
#![allow(
    clippy::missing_errors_doc,
    clippy::missing_panics_doc,
    clippy::module_name_repetitions,
    clippy::struct_field_names,
    clippy::must_use_candidate,
    clippy::return_self_not_must_use,
    clippy::cast_possible_truncation
)]

//! Normalized, timeout-bounded access to the Viking memory service.
//!
//! [`VikingMemory`] speaks the service's wire format; [`VikingMemoryClient`]
//! is what hosts call. Both return [`OperationResult`] values instead of
//! failing, so remote trouble never unwinds into the host.

pub mod client;
pub mod config;
pub mod error;
pub mod keywords;
pub mod memory;
pub mod tags;
pub mod viking;

pub use client::{ClientSettings, VikingMemoryClient};
pub use config::{Credentials, VikingConfig};
pub use error::{ConfigError, MemoryError};
pub use keywords::KeywordDetector;
pub use memory::{MemoryBackend, OperationResult};
pub use viking::VikingMemory;
