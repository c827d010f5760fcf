pub mod categories;
pub mod fields;
pub mod filename;
pub mod license;

pub use categories::*;
pub use fields::*;
pub use filename::*;
pub use license::*;
