pub mod error;
pub mod file_loader;
pub mod loader;
pub mod pending;
pub mod request;
pub mod state;

pub use error::*;
pub use file_loader::*;
pub use loader::*;
pub use pending::*;
pub use request::*;
pub use state::*;
