//! Procedural ribbon generation for saber trails.
//!
//! A fixed-capacity history of anchor-pair samples is resampled along
//! normalized arc-length with Catmull-Rom interpolation into a triangle-list
//! ribbon, rebuilt in place once per simulation tick.

mod generator;
mod history;
mod mesh;
mod spline;

pub use generator::TrailRibbon;
pub use history::{Sample, SampleHistory};
pub use mesh::RibbonGeometry;
pub use spline::catmull_rom;
