//! WebGPU rendering module
//!
//! Flat-coloured triangles in screen space. `scene` decides what to draw,
//! `pipeline` owns the GPU objects and draws it.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::{HudLabel, Scene};
pub use vertex::Vertex;
