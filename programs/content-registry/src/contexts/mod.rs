pub mod content;
pub mod registry;
pub mod reserve;

pub use content::*;
pub use registry::*;
pub use reserve::*;
