//! Selector Infrastructure
//!
//! Locates candidate reference nodes on a page. Matchers are plain CSS
//! selectors compiled at scan time, so a selector the engine cannot parse
//! only disables itself.

pub mod cascade;

pub use cascade::Cascade;
