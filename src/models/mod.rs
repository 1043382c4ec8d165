pub mod item;
pub mod receipt;

pub use item::*;
pub use receipt::*;
