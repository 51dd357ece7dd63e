//! Items shared between the tag formats

mod accessor;

pub use accessor::Accessor;

use std::fmt::{Display, Formatter};

/// The tag formats mp3tag handles
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum TagType {
	/// A fixed-size trailing ID3v1 tag
	Id3v1,
	/// A leading ID3v2 tag
	Id3v2,
}

/// The kind of payload an identifier holds
///
/// Every ID3v2 frame ID and every ID3v1 field declares exactly one kind.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum PayloadKind {
	/// Text, including URLs, comments, and lyrics
	Text,
	/// Opaque bytes, such as pictures and frames mp3tag doesn't interpret
	Binary,
	/// A single unsigned integer
	Integer,
}

impl Display for PayloadKind {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			PayloadKind::Text => f.write_str("text"),
			PayloadKind::Binary => f.write_str("binary"),
			PayloadKind::Integer => f.write_str("integer"),
		}
	}
}

/// The exact version of a tag
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum TagVersion {
	/// An ID3v1 tag, see [`Id3v1Version`](crate::id3::v1::Id3v1Version)
	Id3v1(crate::id3::v1::Id3v1Version),
	/// An ID3v2 tag, see [`Id3v2Version`](crate::id3::v2::Id3v2Version)
	Id3v2(crate::id3::v2::Id3v2Version),
}

impl TagVersion {
	/// The format this version belongs to
	pub fn tag_type(self) -> TagType {
		match self {
			TagVersion::Id3v1(_) => TagType::Id3v1,
			TagVersion::Id3v2(_) => TagType::Id3v2,
		}
	}
}

impl Display for TagVersion {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			TagVersion::Id3v1(crate::id3::v1::Id3v1Version::V1_0) => f.write_str("1.0"),
			TagVersion::Id3v1(crate::id3::v1::Id3v1Version::V1_1) => f.write_str("1.1"),
			TagVersion::Id3v2(crate::id3::v2::Id3v2Version::V2) => f.write_str("2.2"),
			TagVersion::Id3v2(crate::id3::v2::Id3v2Version::V3) => f.write_str("2.3"),
			TagVersion::Id3v2(crate::id3::v2::Id3v2Version::V4) => f.write_str("2.4"),
		}
	}
}
