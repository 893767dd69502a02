pub mod bounds;

pub use bounds::Rect;
