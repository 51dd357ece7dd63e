//! Frame ID conversions between ID3v2.3 and ID3v2.4
//!
//! ID3v2.2 IDs are upgraded to their four character counterparts through the
//! [frame registry](crate::id3::v2::frame_info) instead.

use crate::id3::v2::Id3v2Version;
use crate::id3::v2::registry::downgrade_to_v2;

// ID3v2.3 => ID3v2.4
const RENAMED: &[(&str, &str)] = &[
	("IPLS", "TIPL"),
	("TORY", "TDOR"),
	("TYER", "TDRC"),
];

// Frames with no counterpart in ID3v2.4
const V3_ONLY: &[&str] = &["EQUA", "RVAD", "TDAT", "TIME", "TRDA", "TSIZ"];

// Frames with no counterpart in ID3v2.3
const V4_ONLY: &[&str] = &[
	"ASPI", "EQU2", "RVA2", "SEEK", "SIGN", "TDEN", "TDRL", "TDTG", "TMCL", "TMOO", "TPRO", "TSST",
];

/// Upgrade an ID3v2.3 key to an ID3v2.4 key
///
/// Returns `None` if the frame doesn't exist in ID3v2.4.
pub(crate) fn upgrade_v3(key: &str) -> Option<&str> {
	if V3_ONLY.contains(&key) {
		return None;
	}

	Some(
		RENAMED
			.iter()
			.find(|(v3, _)| *v3 == key)
			.map_or(key, |(_, v4)| *v4),
	)
}

/// Downgrade an ID3v2.4 key to an ID3v2.3 key
///
/// Returns `None` if the frame doesn't exist in ID3v2.3.
pub(crate) fn downgrade_v4(key: &str) -> Option<&str> {
	if V4_ONLY.contains(&key) {
		return None;
	}

	Some(
		RENAMED
			.iter()
			.find(|(_, v4)| *v4 == key)
			.map_or(key, |(v3, _)| *v3),
	)
}

/// Convert a four character key used in a tag of version `from` to one usable in `to`
///
/// ID3v2.2 tags are held with ID3v2.3 keys in memory, so the two are treated the same here.
pub(crate) fn convert_key(key: &str, from: Id3v2Version, to: Id3v2Version) -> Option<&str> {
	match (from, to) {
		(Id3v2Version::V4, Id3v2Version::V4) => Some(key),
		(Id3v2Version::V4, _) => downgrade_v4(key),
		(_, Id3v2Version::V4) => upgrade_v3(key),
		_ => Some(key),
	}
}

/// The ID a frame with `key` is written with in a tag of `version`
///
/// Returns `None` if `version` has no such frame. Three character keys are ID3v2.2 frames
/// that were never upgraded, and only fit in an ID3v2.2 tag.
pub(crate) fn key_for_version(key: &str, version: Id3v2Version) -> Option<&str> {
	match (key.len(), version) {
		(3, Id3v2Version::V2) => Some(key),
		(3, _) => None,
		(_, Id3v2Version::V2) => downgrade_to_v2(key),
		(_, Id3v2Version::V3) => (!V4_ONLY.contains(&key)).then_some(key),
		(_, Id3v2Version::V4) => (!V3_ONLY.contains(&key)).then_some(key),
	}
}
