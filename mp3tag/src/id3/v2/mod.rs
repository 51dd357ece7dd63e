//! ID3v2 items and utilities
//!
//! ## Important notes
//!
//! See:
//!
//! * [`Id3v2Tag`]
//! * [`Frame`]
//! * [`frame_info`] for the table of known frames

mod frame;
pub(crate) mod header;
mod items;
pub(crate) mod read;
mod registry;
mod tag;
pub(crate) mod util;
pub(crate) mod write;

// Exports

pub use header::{Id3v2TagFlags, Id3v2Version};
pub use registry::{FrameInfo, frame_info};

pub use tag::Id3v2Tag;

pub use items::*;

pub use frame::header::FrameId;
pub use frame::{Frame, FrameFlags, FrameValue, SecondaryKey};
