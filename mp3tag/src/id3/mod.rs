//! ID3 specific items
//!
//! An MP3 file can carry two independent tags:
//!
//! * [`v2::Id3v2Tag`] - A variable length tag at the very start of the file
//! * [`v1::Id3v1Tag`] - A fixed 128 byte tag at the very end of the file
//!
//! The two are never merged. When both exist and disagree, it is up to the caller to pick one.

pub mod v1;
pub mod v2;

use crate::config::ParseOptions;
use crate::error::Result;
use crate::macros::format_err;
use crate::util::alloc::fallible_vec_from_element;
use v1::constants::{ID3V1_TAG_MARKER, ID3V1_TAG_SIZE};
use v2::header::Id3v2Header;

use std::io::{Read, Seek, SeekFrom};

#[derive(Debug)]
pub(crate) struct ID3FindResults<Header, Content>(pub Option<Header>, pub Content);

/// Search for an ID3v1 tag in the last 128 bytes of `data`
///
/// The reader is left at the start of the tag if one was found.
pub(crate) fn find_id3v1<R>(
	data: &mut R,
	read: bool,
	parse_options: ParseOptions,
) -> Result<ID3FindResults<(), Option<v1::Id3v1Tag>>>
where
	R: Read + Seek,
{
	log::debug!("Searching for an ID3v1 tag");

	let mut id3v1 = None;
	let mut header = None;

	// Reader is too small to contain an ID3v1 tag
	if data.seek(SeekFrom::End(-(ID3V1_TAG_SIZE as i64))).is_err() {
		data.seek(SeekFrom::End(0))?;
		return Ok(ID3FindResults(header, id3v1));
	}

	let mut id3v1_header = [0; 3];
	data.read_exact(&mut id3v1_header)?;

	data.seek(SeekFrom::Current(-3))?;

	// No ID3v1 tag found
	if id3v1_header != ID3V1_TAG_MARKER {
		data.seek(SeekFrom::End(0))?;
		return Ok(ID3FindResults(header, id3v1));
	}

	log::debug!("Found an ID3v1 tag, parsing");

	header = Some(());

	if read {
		let mut id3v1_tag = [0; ID3V1_TAG_SIZE as usize];
		data.read_exact(&mut id3v1_tag)?;

		data.seek(SeekFrom::End(-(ID3V1_TAG_SIZE as i64)))?;

		id3v1 = Some(v1::Id3v1Tag::parse(id3v1_tag, parse_options.parsing_mode)?);
	}

	Ok(ID3FindResults(header, id3v1))
}

/// Search for an ID3v2 tag at the start of `data`
///
/// Returns the header along with the tag body (everything between the header and the footer).
/// The reader is left at the end of the tag, or at the start of the stream if no tag was found.
///
/// A stream starting with "ID3" is always treated as a tag, a bad header is an error.
pub(crate) fn find_id3v2<R>(
	data: &mut R,
	stream_len: u64,
	read: bool,
	parse_options: ParseOptions,
) -> Result<ID3FindResults<Id3v2Header, Option<Vec<u8>>>>
where
	R: Read + Seek,
{
	log::debug!("Searching for an ID3v2 tag");

	data.rewind()?;

	let mut header_bytes = [0; Id3v2Header::LEN as usize];
	let mut header_len = 0;
	while header_len < header_bytes.len() {
		match data.read(&mut header_bytes[header_len..])? {
			0 => break,
			n => header_len += n,
		}
	}

	if header_len < 3 || &header_bytes[..3] != b"ID3" {
		data.rewind()?;
		return Ok(ID3FindResults(None, None));
	}

	if header_len < header_bytes.len() {
		return Err(format_err!(Id3v2, TruncatedHeader));
	}

	let header = Id3v2Header::parse(header_bytes)?;

	log::debug!(
		"Found an {} tag, size: {}",
		header.version,
		header.full_tag_size()
	);

	if header.full_tag_size() > stream_len {
		log::debug!(
			"ID3v2 tag ends past the end of the stream ({} > {stream_len})",
			header.full_tag_size()
		);
		return Err(format_err!(Id3v2, BadTagSize));
	}

	let mut id3v2 = None;
	if read {
		let mut body = fallible_vec_from_element(
			0_u8,
			header.size as usize,
			parse_options.allocation_limit,
		)?;
		data.read_exact(&mut body)?;

		id3v2 = Some(body);
	} else {
		data.seek(SeekFrom::Current(i64::from(header.size)))?;
	}

	if header.flags.footer {
		let mut footer = [0; Id3v2Header::LEN as usize];
		data.read_exact(&mut footer)?;

		// The footer is a copy of the header, with the identifier reversed
		if &footer[..3] != b"3DI" || footer[3..] != header_bytes[3..] {
			return Err(format_err!(Id3v2, BadFooter));
		}
	}

	Ok(ID3FindResults(Some(header), id3v2))
}

#[cfg(test)]
mod tests {
	use super::{find_id3v1, find_id3v2};
	use crate::config::ParseOptions;
	use crate::error::{ErrorKind, FormatErrorKind};

	use std::io::{Cursor, Seek};

	#[test_log::test]
	fn no_id3v2() {
		let mut reader = Cursor::new(vec![0xFF, 0xFB, 0x90, 0x00, 1, 2, 3, 4, 5, 6, 7, 8]);
		let len = reader.get_ref().len() as u64;

		let results = find_id3v2(&mut reader, len, true, ParseOptions::new()).unwrap();
		assert!(results.0.is_none());
		assert_eq!(reader.stream_position().unwrap(), 0);
	}

	#[test_log::test]
	fn id3v2_past_eof() {
		// Claims 100 bytes of content, but only has 2
		let mut reader = Cursor::new(b"ID3\x04\x00\x00\x00\x00\x00\x64AB".to_vec());
		let len = reader.get_ref().len() as u64;

		let err = find_id3v2(&mut reader, len, true, ParseOptions::new()).unwrap_err();
		let ErrorKind::Format(format) = err.kind() else {
			panic!("Expected a format error, got: {err:?}");
		};
		assert!(matches!(format.kind(), FormatErrorKind::BadTagSize));
	}

	#[test_log::test]
	fn truncated_id3v2_header() {
		let mut reader = Cursor::new(b"ID3\x04\x00".to_vec());
		let len = reader.get_ref().len() as u64;

		let err = find_id3v2(&mut reader, len, true, ParseOptions::new()).unwrap_err();
		let ErrorKind::Format(format) = err.kind() else {
			panic!("Expected a format error, got: {err:?}");
		};
		assert!(matches!(format.kind(), FormatErrorKind::TruncatedHeader));
	}

	#[test_log::test]
	fn id3v2_with_footer() {
		let mut content = b"ID3\x04\x00\x10\x00\x00\x00\x02AB".to_vec();
		content.extend(b"3DI\x04\x00\x10\x00\x00\x00\x02");
		content.extend([0xFF, 0xFB]);
		let len = content.len() as u64;

		let mut reader = Cursor::new(content);
		let results = find_id3v2(&mut reader, len, true, ParseOptions::new()).unwrap();
		assert_eq!(results.1.as_deref(), Some(&b"AB"[..]));
		assert_eq!(reader.stream_position().unwrap(), 22);
	}

	#[test_log::test]
	fn id3v2_allocation_limit() {
		let mut content = b"ID3\x04\x00\x00\x00\x00\x00\x08".to_vec();
		content.extend([0; 8]);
		let len = content.len() as u64;

		let err = find_id3v2(
			&mut Cursor::new(content.clone()),
			len,
			true,
			ParseOptions::new().allocation_limit(4),
		)
		.unwrap_err();
		assert!(matches!(err.kind(), ErrorKind::TooMuchData));

		// Nothing is allocated when the body is skipped
		let results = find_id3v2(
			&mut Cursor::new(content),
			len,
			false,
			ParseOptions::new().allocation_limit(4),
		)
		.unwrap();
		assert!(results.0.is_some());
	}

	#[test_log::test]
	fn id3v2_bad_footer() {
		let mut content = b"ID3\x04\x00\x10\x00\x00\x00\x02AB".to_vec();
		content.extend(b"ID3\x04\x00\x10\x00\x00\x00\x02");
		let len = content.len() as u64;

		let err = find_id3v2(&mut Cursor::new(content), len, true, ParseOptions::new()).unwrap_err();
		assert!(err.is_format_error());
	}

	#[test_log::test]
	fn id3v1_too_small() {
		let mut reader = Cursor::new(b"TAG".to_vec());
		let results = find_id3v1(&mut reader, true, ParseOptions::new()).unwrap();
		assert!(results.0.is_none());
	}
}
