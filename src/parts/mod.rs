pub mod interaction;
pub mod part;
pub mod payload;

pub use interaction::{Interaction, PartDelta, Reply};
pub use part::{Part, PartKind};
pub use payload::{Bitmap, Payload};
