//! The two presentation surfaces of the transport: the compact bar under the
//! track list and the full-screen expanded view.

mod compact;
mod expanded;
mod sync;

pub use compact::CompactBar;
pub use expanded::{ExpandedView, SeekDrag};
pub use sync::{DualViewSync, NowPlaying};

#[cfg(test)]
mod tests;
