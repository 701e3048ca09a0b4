//! In-memory host
//!
//! A complete implementation of the adapter traits backed by plain Rust
//! values. Useful for tools that edit presets offline, and as the reference
//! host the rest of the crate is tested against.

mod asset;
mod input;
mod parameter;

pub use asset::{MemoryAsset, MemoryFactory};
pub use input::MemoryInput;
pub use parameter::{MemoryParameter, MemoryValue};
