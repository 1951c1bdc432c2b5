//! Core building blocks of allocvec: allocators, memory management, and the allocator-aware [`Vector`](collections::Vector).

mod bytes;

pub mod alloc;
pub mod mem;
pub mod collections;

pub mod prelude;

pub use bytes::*;
