pub mod engine;
pub mod expire;
pub mod fulfill;
pub mod mint;
pub mod read;

pub use engine::*;
pub use expire::*;
pub use fulfill::*;
pub use mint::*;
pub use read::*;
