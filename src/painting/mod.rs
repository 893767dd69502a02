pub mod color;
pub mod display_list;
pub mod painter;
pub mod raster;

pub use color::Color;
pub use display_list::{DisplayList, DrawCommand, DrawKind};
pub use painter::{Painter, Pen};
pub use raster::Rasterizer;
