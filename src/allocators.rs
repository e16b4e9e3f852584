//! Helper traits for allocator trait bounds.
pub use fenris_traits::allocators::*;
