pub mod ecef;
pub mod geodesy;
pub mod local;
pub mod quat;
pub mod vec;

pub use ecef::*;
pub use geodesy::*;
pub use local::*;
pub use quat::*;
pub use vec::*;
