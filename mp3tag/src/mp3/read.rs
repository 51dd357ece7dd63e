use super::Mp3File;
use crate::config::ParseOptions;
use crate::error::Result;
use crate::id3::v1::Id3v1Tag;
use crate::id3::v1::constants::ID3V1_TAG_SIZE;
use crate::id3::v2::read::parse_id3v2;
use crate::id3::v2::Id3v2Tag;
use crate::id3::{ID3FindResults, find_id3v1, find_id3v2};
use crate::macros::format_err;

use std::io::{Read, Seek, SeekFrom};
use std::ops::Range;
use std::path::PathBuf;

/// Where the tags and audio sit in a file
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub(super) struct Regions {
	/// The full size of the ID3v2 tag, `0` if there is none
	pub(super) id3v2_len: u64,
	pub(super) has_id3v1: bool,
	pub(super) file_len: u64,
}

impl Regions {
	/// The range of the audio data, everything between the two tags
	pub(super) fn audio(&self) -> Range<u64> {
		let end = if self.has_id3v1 {
			self.file_len - ID3V1_TAG_SIZE
		} else {
			self.file_len
		};

		self.id3v2_len..end
	}
}

struct FoundTags {
	id3v2: Option<Id3v2Tag>,
	id3v1: Option<Id3v1Tag>,
	regions: Regions,
}

pub(super) fn read_from<R>(
	reader: &mut R,
	path: PathBuf,
	parse_options: ParseOptions,
) -> Result<Mp3File>
where
	R: Read + Seek,
{
	let FoundTags {
		id3v2,
		id3v1,
		regions,
	} = find_tags(reader, true, parse_options)?;

	log::debug!(
		"Read {}, ID3v2: {} bytes, ID3v1: {}, audio: {:?}",
		path.display(),
		regions.id3v2_len,
		regions.has_id3v1,
		regions.audio()
	);

	Ok(Mp3File {
		path,
		id3v2_tag: id3v2,
		id3v1_tag: id3v1,
	})
}

/// Locate both tags without parsing them
pub(super) fn find_regions<R>(reader: &mut R) -> Result<Regions>
where
	R: Read + Seek,
{
	Ok(find_tags(reader, false, ParseOptions::default())?.regions)
}

fn find_tags<R>(reader: &mut R, read: bool, parse_options: ParseOptions) -> Result<FoundTags>
where
	R: Read + Seek,
{
	let file_len = reader.seek(SeekFrom::End(0))?;

	let mut regions = Regions {
		file_len,
		..Regions::default()
	};

	let mut id3v2 = None;
	let ID3FindResults(id3v2_header, id3v2_body) =
		find_id3v2(reader, file_len, read, parse_options)?;
	if let Some(header) = id3v2_header {
		regions.id3v2_len = header.full_tag_size();

		if let Some(body) = id3v2_body {
			id3v2 = Some(parse_id3v2(&body, header, parse_options)?);
		}
	}

	let ID3FindResults(id3v1_header, id3v1) = find_id3v1(reader, read, parse_options)?;
	regions.has_id3v1 = id3v1_header.is_some();

	if regions.has_id3v1 && regions.id3v2_len > file_len - ID3V1_TAG_SIZE {
		log::debug!(
			"ID3v2 tag ({} bytes) overlaps the ID3v1 tag (file: {file_len} bytes)",
			regions.id3v2_len
		);
		return Err(format_err!(Id3v2, BadTagSize));
	}

	Ok(FoundTags {
		id3v2,
		id3v1,
		regions,
	})
}

#[cfg(test)]
mod tests {
	use super::{Regions, find_regions, read_from};
	use crate::config::{ParseOptions, ParsingMode};
	use crate::error::{ErrorKind, FormatErrorKind};
	use crate::tag::Accessor;

	use std::io::Cursor;
	use std::path::PathBuf;

	const AUDIO: [u8; 8] = [0xFF, 0xFB, 0x90, 0x64, 1, 2, 3, 4];

	fn id3v1(title: &[u8]) -> [u8; 128] {
		let mut tag = [0; 128];
		tag[..3].copy_from_slice(b"TAG");
		tag[3..3 + title.len()].copy_from_slice(title);
		tag[127] = 0xFF;
		tag
	}

	fn id3v2() -> Vec<u8> {
		let mut tag = b"ID3\x03\x00\x00\x00\x00\x00\x18".to_vec();
		tag.extend(b"TIT2\x00\x00\x00\x04\x00\x00\x00Foo");
		tag.extend([0; 10]);
		tag
	}

	#[test_log::test]
	fn both_tags() {
		let mut content = id3v2();
		content.extend(AUDIO);
		content.extend(id3v1(b"Bar"));

		let mut reader = Cursor::new(content);
		let file = read_from(&mut reader, PathBuf::from("foo.mp3"), ParseOptions::new()).unwrap();

		// Never merged
		assert_eq!(file.id3v2().unwrap().title().as_deref(), Some("Foo"));
		assert_eq!(file.id3v1().unwrap().title().as_deref(), Some("Bar"));

		let regions = find_regions(&mut reader).unwrap();
		assert_eq!(
			regions,
			Regions {
				id3v2_len: 34,
				has_id3v1: true,
				file_len: 34 + 8 + 128,
			}
		);
		assert_eq!(regions.audio(), 34..42);
	}

	#[test_log::test]
	fn allocation_limit() {
		let mut content = id3v2();
		content.extend(AUDIO);

		let mut reader = Cursor::new(content);
		let err = read_from(
			&mut reader,
			PathBuf::from("foo.mp3"),
			ParseOptions::new().allocation_limit(16),
		)
		.unwrap_err();
		assert!(matches!(err.kind(), ErrorKind::TooMuchData));

		// Saving only needs the regions
		assert_eq!(find_regions(&mut reader).unwrap().id3v2_len, 34);
	}

	#[test_log::test]
	fn no_tags() {
		let mut reader = Cursor::new(AUDIO.to_vec());
		let file = read_from(&mut reader, PathBuf::from("foo.mp3"), ParseOptions::new()).unwrap();

		assert!(file.id3v2().is_none());
		assert!(file.id3v1().is_none());

		let regions = find_regions(&mut reader).unwrap();
		assert_eq!(regions.audio(), 0..8);
	}

	#[test_log::test]
	fn id3v2_overlapping_id3v1() {
		let mut content = id3v2();
		// Claims to cover the ID3v1 tag
		content[9] = 0x18 + 100;
		content.extend(id3v1(b"Bar"));

		let mut reader = Cursor::new(content);
		let err = read_from(
			&mut reader,
			PathBuf::from("foo.mp3"),
			ParseOptions::new().parsing_mode(ParsingMode::Relaxed),
		)
		.unwrap_err();

		let ErrorKind::Format(format) = err.kind() else {
			panic!("Expected a format error, got: {err:?}");
		};
		assert!(matches!(format.kind(), FormatErrorKind::BadTagSize));
	}
}
