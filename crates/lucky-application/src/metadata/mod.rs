//! Metadata source implementations

pub mod in_memory;
pub mod linked;

pub use in_memory::InMemoryMetadataSource;
pub use linked::LinkedMetadataSource;
