//! ID3v1 items
//!
//! # ID3v1 notes
//!
//! An ID3v1 tag is a fixed 128 byte block at the very end of a file, made up of a handful of
//! fixed-width fields. See [`Id3v1Tag`] for the limits of each field.
//!
//! ## Genres
//!
//! Genres are stored as a single byte index into [`GENRES`]. An index outside of the table
//! (`0xFF` by convention) means no genre.

pub(crate) mod constants;
pub(crate) mod read;
pub(crate) mod tag;
pub(crate) mod write;

pub use constants::GENRES;
pub use tag::{Id3v1Field, Id3v1Tag, Id3v1Value, Id3v1Version};
