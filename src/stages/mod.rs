pub mod stage0_normalize;
pub mod stage1_select;
pub mod stage2_reconcile;
pub mod stage3_render;

pub use stage0_normalize::*;
pub use stage1_select::*;
pub use stage2_reconcile::*;
pub use stage3_render::*;
