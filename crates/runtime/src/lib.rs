pub mod clock;
pub mod frame;
pub mod redraw;

pub use clock::*;
pub use frame::*;
pub use redraw::*;
