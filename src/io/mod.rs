pub mod input;
pub mod output;
pub mod xml;

pub use input::*;
pub use output::*;
pub use xml::*;
