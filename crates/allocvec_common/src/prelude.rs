pub use crate::bytes::*;

pub use crate::alloc::{Allocator, Global};
pub use crate::collections::{Vector, Error};
pub use crate::vector;
