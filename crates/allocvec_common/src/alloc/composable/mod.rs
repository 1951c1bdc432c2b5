mod budget_allocator;
mod counting_allocator;
mod fallback_allocator;

pub use budget_allocator::*;
pub use counting_allocator::*;
pub use fallback_allocator::*;
