mod access;
pub mod layout;
mod locks;
mod process;

#[cfg(test)]
pub mod mock;

pub use access::{MemoryAccessor, find_item};
pub use locks::ProcessLocks;
pub use process::*;

#[cfg(test)]
pub use mock::{MockMemory, MockMemoryBuilder};
