//! Savemap decoding.
//!
//! [`SaveMap::decode`] turns a raw snapshot into typed fields. Decoding is
//! pure; [`MemorySnapshot::capture`] is the only part that touches a process.

mod colors;
mod map;
mod record;
mod snapshot;
pub mod text;

pub use colors::{MenuColors, Rgb, WindowColors};
pub use map::{SaveMap, SaveSummary, read_u24};
pub use record::CharacterRecord;
pub use snapshot::MemorySnapshot;
