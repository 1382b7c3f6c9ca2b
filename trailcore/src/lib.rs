//! Shared trail geometry for the viewer and tests.
//!
//! This crate intentionally avoids any Bevy rendering types. It exposes a
//! small, serializable config schema and a pure ribbon generator the viewer
//! translates into meshes each frame.

mod config;
pub use config::{TrailSpec, TrailSpecError};

pub mod ribbon;
pub use ribbon::{catmull_rom, RibbonGeometry, Sample, SampleHistory, TrailRibbon};
