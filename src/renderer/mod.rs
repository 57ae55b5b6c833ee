//! Rendering module
//!
//! `scene` builds world-space triangles from game state, `pipeline` puts them
//! on a WebGPU surface, `text` dumps the board for terminals.

pub mod pipeline;
pub mod scene;
pub mod shapes;
pub mod text;
pub mod vertex;

pub use pipeline::RenderState;
pub use scene::build_scene;
pub use text::render_text;
pub use vertex::Vertex;
