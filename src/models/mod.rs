pub mod entity;
pub mod reconcile;
pub mod record;
pub mod run;

pub use entity::*;
pub use reconcile::*;
pub use record::*;
pub use run::*;
