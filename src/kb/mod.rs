pub mod client;
pub mod index;
pub mod queries;

pub use client::*;
pub use index::*;
pub use queries::*;
