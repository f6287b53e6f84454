pub mod cart;
pub mod catalog;
pub mod common;
pub mod selection;

pub use cart::*;
pub use catalog::*;
pub use common::*;
pub use selection::*;
