mod alloc;
mod global;

pub mod primitives;
pub mod composable;

pub use alloc::*;
pub use global::*;

pub use core::alloc::Layout;

use allocvec_logging::LogCategory;

pub(crate) const LOG_CAT : LogCategory = LogCategory::new("Alloc");
