mod memory_manager;

pub use memory_manager::*;
