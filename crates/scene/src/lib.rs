pub mod components;
pub mod entity;
pub mod world;

pub use entity::*;
pub use world::*;
