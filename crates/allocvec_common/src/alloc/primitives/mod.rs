mod mallocator;
mod linear_allocator;

pub use mallocator::*;
pub use linear_allocator::*;
