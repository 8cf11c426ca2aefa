//! Rendering module
//!
//! The level draws through the `Canvas` trait. `DrawList` is the bundled
//! implementation: it batches quads and circles into screen-space vertices.

pub mod canvas;
pub mod draw_list;
pub mod font;
pub mod shapes;
pub mod vertex;
pub mod viewport;

pub use canvas::{Canvas, Font, Resources, TransformScope};
pub use draw_list::DrawList;
pub use font::{BlockFont, FontBook};
pub use vertex::{Vertex, colors};
pub use viewport::{Rect, Viewport};
