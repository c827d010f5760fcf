pub mod dates;
pub mod dimensions;
pub mod language;
pub mod roles;

pub use dates::*;
pub use dimensions::*;
pub use language::*;
pub use roles::*;
