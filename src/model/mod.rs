//! Table metadata model and assembly

mod builder;
mod elements;
mod loader;

pub use builder::assemble_table;
pub use elements::*;
pub use loader::MetaLoader;
