//! Read and edit ID3 tags in MP3 files.
//!
//! An MP3 file can carry an [ID3v2 tag](id3::v2::Id3v2Tag) at its start and an
//! [ID3v1 tag](id3::v1::Id3v1Tag) at its end. Both are read into memory by [`Mp3File`](mp3::Mp3File),
//! edited there, and written back with [`Mp3File::save`](mp3::Mp3File::save). The audio data
//! between the tags is never interpreted, and is preserved byte for byte.
//!
//! # Examples
//!
//! ## Reading a file
//!
//! ```rust,no_run
//! # fn main() -> mp3tag::error::Result<()> {
//! use mp3tag::mp3::Mp3File;
//! use mp3tag::prelude::*;
//!
//! let file = Mp3File::open("test.mp3")?;
//!
//! // The two tags are never merged, pick the one you trust
//! if let Some(id3v2) = file.id3v2() {
//! 	println!("Title: {:?}", id3v2.title());
//! } else if let Some(id3v1) = file.id3v1() {
//! 	println!("Title: {:?}", id3v1.title());
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Editing frames
//!
//! ```rust
//! # fn main() -> mp3tag::error::Result<()> {
//! use mp3tag::TextEncoding;
//! use mp3tag::id3::v2::{FrameId, Id3v2Tag, PlayCounterFrame, TextInformationFrame};
//!
//! let mut tag = Id3v2Tag::new();
//!
//! let title = FrameId::from_name("title").unwrap();
//! tag.set(title.clone(), TextInformationFrame::new(TextEncoding::UTF8, "Foo title"))?;
//! assert_eq!(tag.get_text(&title), Some("Foo title"));
//!
//! // A title is text, it can't hold a play counter
//! let err = tag.set(title, PlayCounterFrame::new(5)).unwrap_err();
//! assert!(err.is_type_mismatch());
//! # Ok(())
//! # }
//! ```
//!
//! ## Saving
//!
//! ```rust,no_run
//! # fn main() -> mp3tag::error::Result<()> {
//! use mp3tag::config::WriteOptions;
//! use mp3tag::mp3::Mp3File;
//! use mp3tag::prelude::*;
//!
//! let mut file = Mp3File::open("test.mp3")?;
//! file.get_or_insert_id3v2().set_artist(String::from("Foo artist"));
//!
//! // Leave plenty of room for later edits, so they don't require rewriting the file
//! file.save(WriteOptions::new().preferred_padding(4096))?;
//! # Ok(())
//! # }
//! ```
#![cfg_attr(docsrs, feature(doc_auto_cfg))]

pub mod config;
pub mod error;
pub mod id3;
pub(crate) mod macros;
pub mod mp3;
pub mod picture;
pub mod tag;
mod util;

pub use util::text::{TextEncoding, Utf16ByteOrder};

pub mod prelude {
	//! A prelude for commonly used items in the library.
	//!
	//! This module is intended to be wildcard imported.
	//!
	//! ```rust
	//! use mp3tag::prelude::*;
	//! ```

	pub use crate::tag::Accessor;
}
