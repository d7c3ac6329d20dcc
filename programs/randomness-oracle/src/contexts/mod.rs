pub mod deliver;
pub mod oracle;
pub mod request;

pub use deliver::*;
pub use oracle::*;
pub use request::*;
