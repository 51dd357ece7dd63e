mod frame;

use super::header::{Id3v2Header, Id3v2TagFlags, Id3v2Version};
use super::tag::Id3v2Tag;
use super::util::crc::crc_32;
use super::util::synchsafe::SynchsafeInteger;
use crate::config::WriteOptions;
use crate::error::Result;
use crate::macros::{err, try_vec};

use std::io::{Cursor, Read, Seek, SeekFrom, Write};

use byteorder::{BigEndian, WriteBytesExt};

// Offset of the first byte after the extended header size
const EXTENDED_HEADER_START: u64 = Id3v2Header::LEN;

/// Serialize `tag`, header to footer
///
/// With `existing_len` (the full size of the tag currently in the file), the tag is padded to
/// fill that space exactly when it fits, so the file doesn't have to be rewritten. Otherwise
/// it gets [`WriteOptions::preferred_padding`], rounded up to
/// [`WriteOptions::padding_alignment`].
pub(crate) fn create_tag(
	tag: &Id3v2Tag,
	existing_len: Option<u64>,
	write_options: WriteOptions,
) -> Result<Vec<u8>> {
	let version = tag.version();
	let mut flags = *tag.flags();

	// Neither exists in ID3v2.2
	if version == Id3v2Version::V2 && flags.crc {
		log::warn!("CRC-32 requested for an ID3v2.2 tag, ignoring");
		flags.crc = false;
	}

	flags.footer &= version == Id3v2Version::V4;

	let (mut id3v2, extended_header_len) = create_tag_header(flags, version)?;
	let header_len = id3v2.get_ref().len();

	frame::create_items(&mut id3v2, tag.iter(), version, write_options)?;

	let frames_len = (id3v2.get_ref().len() - header_len) as u64;
	let content_len = u64::from(extended_header_len) + frames_len;

	let padding_len = padding_len(content_len, flags.footer, existing_len, write_options);

	let tag_size = content_len + padding_len;
	let Ok(tag_size) = u32::try_from(tag_size) else {
		err!(TooMuchData);
	};

	// Go back to the start and write the final size
	id3v2.seek(SeekFrom::Start(6))?;
	id3v2.write_u32::<BigEndian>(tag_size.synch()?)?;

	id3v2.seek(SeekFrom::End(0))?;
	if padding_len > 0 {
		log::trace!("Padding tag with {padding_len} bytes");
		id3v2.write_all(&try_vec![0; padding_len as usize])?;
	}

	if flags.crc {
		write_crc(&mut id3v2, version, padding_len)?;
	}

	if flags.footer {
		log::trace!("Writing footer");

		id3v2.seek(SeekFrom::Start(3))?;

		let mut header_without_identifier = [0; 7];
		id3v2.read_exact(&mut header_without_identifier)?;
		id3v2.seek(SeekFrom::End(0))?;

		// The footer is the same as the header, but with the identifier reversed
		id3v2.write_all(b"3DI")?;
		id3v2.write_all(&header_without_identifier)?;
	}

	Ok(id3v2.into_inner())
}

// "[A tag] MUST NOT have any padding when a tag footer is added to the tag"
fn padding_len(
	content_len: u64,
	has_footer: bool,
	existing_len: Option<u64>,
	write_options: WriteOptions,
) -> u64 {
	let footer_len = if has_footer { Id3v2Header::LEN } else { 0 };
	let unpadded_len = Id3v2Header::LEN + content_len + footer_len;

	if let Some(existing_len) = existing_len {
		if existing_len == unpadded_len || (!has_footer && existing_len > unpadded_len) {
			log::trace!("Filling the existing {existing_len} byte tag region");
			return existing_len - unpadded_len;
		}
	}

	if has_footer {
		log::trace!("Footer requested, not padding tag");
		return 0;
	}

	let Some(preferred_padding) = write_options.preferred_padding else {
		log::trace!("No padding requested, writing tag as-is");
		return 0;
	};

	let padded_len = unpadded_len + u64::from(preferred_padding);

	let alignment = u64::from(write_options.padding_alignment);
	if alignment <= 1 {
		return u64::from(preferred_padding);
	}

	padded_len.div_ceil(alignment) * alignment - unpadded_len
}

fn create_tag_header(
	flags: Id3v2TagFlags,
	version: Id3v2Version,
) -> Result<(Cursor<Vec<u8>>, u32)> {
	let mut header = Cursor::new(Vec::new());

	header.write_all(b"ID3")?;

	// Revision is always 0
	header.write_all(&[version.major(), 0])?;

	let tag_flags = match version {
		// Unsynchronisation and compression are never written
		Id3v2Version::V2 => 0,
		Id3v2Version::V3 => flags.as_id3v23_byte(),
		Id3v2Version::V4 => flags.as_id3v24_byte(),
	};

	header.write_u8(tag_flags)?;
	header.write_u32::<BigEndian>(0)?;

	if !flags.crc {
		return Ok((header, 0));
	}

	// The CRC itself is filled in once the frames are written
	let extended_header_len = match version {
		// Size (4), flags (2), padding size (4), CRC (4)
		//
		// The size doesn't include itself
		Id3v2Version::V3 => {
			header.write_u32::<BigEndian>(10)?;
			header.write_u16::<BigEndian>(0x8000)?;
			header.write_u32::<BigEndian>(0)?;
			header.write_u32::<BigEndian>(0)?;
			14
		},
		// Size (4), number of flag bytes (1), flags (1), CRC length (1), CRC (5)
		_ => {
			header.write_u32::<BigEndian>(12_u32.synch()?)?;
			header.write_u8(1)?;
			header.write_u8(0x20)?;
			header.write_u8(5)?;
			header.write_all(&[0; 5])?;
			12
		},
	};

	Ok((header, extended_header_len))
}

// ID3v2.3 covers the frames only, ID3v2.4 everything after the extended header
fn write_crc(id3v2: &mut Cursor<Vec<u8>>, version: Id3v2Version, padding_len: u64) -> Result<()> {
	let content = id3v2.get_ref();

	match version {
		Id3v2Version::V3 => {
			let content_start = (EXTENDED_HEADER_START + 14) as usize;
			let content_end = content.len() - padding_len as usize;
			let crc = crc_32(&content[content_start..content_end]);

			// Past the extended header size and flags
			id3v2.seek(SeekFrom::Start(EXTENDED_HEADER_START + 6))?;
			id3v2.write_u32::<BigEndian>(padding_len as u32)?;
			id3v2.write_u32::<BigEndian>(crc)?;
		},
		_ => {
			let content_start = (EXTENDED_HEADER_START + 12) as usize;
			let crc = crc_32(&content[content_start..]);

			// Past the extended header size, flags, and CRC length
			id3v2.seek(SeekFrom::Start(EXTENDED_HEADER_START + 7))?;
			id3v2.write_all(&encode_crc(crc))?;
		},
	}

	id3v2.seek(SeekFrom::End(0))?;
	Ok(())
}

// The CRC-32 is stored as an 35 bit synchsafe integer, leaving the upper
// four bits always zeroed.
fn encode_crc(crc: u32) -> [u8; 5] {
	let mut encoded_crc = [0; 5];
	for (i, b) in encoded_crc.iter_mut().enumerate() {
		*b = (crc >> ((4 - i) * 7)) as u8 & 0x7F;
	}

	encoded_crc
}

#[cfg(test)]
mod tests {
	use super::create_tag;
	use crate::config::{ParseOptions, WriteOptions};
	use crate::id3::v2::header::Id3v2Header;
	use crate::id3::v2::read::parse_id3v2;
	use crate::id3::v2::{Id3v2Tag, Id3v2TagFlags, Id3v2Version};
	use crate::tag::Accessor;

	fn tag_with_artist(version: Id3v2Version) -> Id3v2Tag {
		let mut tag = Id3v2Tag::with_version(version);
		tag.set_artist(String::from("Foo artist"));
		tag
	}

	fn reparse(bytes: &[u8]) -> Id3v2Tag {
		let header = Id3v2Header::parse(bytes[..10].try_into().unwrap()).unwrap();
		let end = 10 + header.size as usize;
		parse_id3v2(&bytes[10..end], header, ParseOptions::new()).unwrap()
	}

	#[test_log::test]
	fn id3v2_write_crc32() {
		let mut tag = tag_with_artist(Id3v2Version::V4);
		tag.set_flags(Id3v2TagFlags {
			crc: true,
			..Id3v2TagFlags::default()
		});

		let writer = create_tag(&tag, None, WriteOptions::default()).unwrap();

		assert_eq!(writer[5], 0x40);
		assert_eq!(&writer[10..16], &[0, 0, 0, 12, 1, 0x20]);
		assert_eq!(writer[16], 5);

		let mut unsynch_crc = 0_u32;
		for (i, b) in writer[17..22].iter().enumerate() {
			unsynch_crc |= u32::from(b & 0x7F) << ((4 - i) * 7);
		}

		assert_eq!(unsynch_crc, crate::id3::v2::util::crc::crc_32(&writer[22..]));

		let reparsed = reparse(&writer);
		assert!(reparsed.flags().crc);
		assert_eq!(reparsed.artist().as_deref(), Some("Foo artist"));
	}

	#[test_log::test]
	fn id3v23_write_crc32() {
		let mut tag = tag_with_artist(Id3v2Version::V3);
		tag.set_flags(Id3v2TagFlags {
			crc: true,
			..Id3v2TagFlags::default()
		});

		let writer = create_tag(&tag, None, WriteOptions::default().preferred_padding(0)).unwrap();

		assert_eq!(&writer[10..20], &[0, 0, 0, 10, 0x80, 0, 0, 0, 0, 0]);

		let crc = u32::from_be_bytes(writer[20..24].try_into().unwrap());
		assert_eq!(crc, crate::id3::v2::util::crc::crc_32(&writer[24..]));
	}

	#[test_log::test]
	fn padding_is_aligned() {
		let tag = tag_with_artist(Id3v2Version::V4);

		let writer = create_tag(&tag, None, WriteOptions::default()).unwrap();
		assert_eq!(writer.len(), 2048);

		let writer = create_tag(
			&tag,
			None,
			WriteOptions::default()
				.preferred_padding(100)
				.padding_alignment(1),
		)
		.unwrap();

		// Header (10) + TPE1 frame (10 + 11) + padding (100)
		assert_eq!(writer.len(), 131);

		let writer = create_tag(&tag, None, WriteOptions::default().preferred_padding(0)).unwrap();
		assert_eq!(writer.len(), 31);
	}

	#[test_log::test]
	fn padding_fills_existing_region() {
		let tag = tag_with_artist(Id3v2Version::V3);

		let writer = create_tag(&tag, Some(500), WriteOptions::default()).unwrap();
		assert_eq!(writer.len(), 500);
		assert!(writer[31..].iter().all(|b| *b == 0));

		// Doesn't fit, fall back to the preferred padding
		let writer = create_tag(&tag, Some(20), WriteOptions::default()).unwrap();
		assert_eq!(writer.len(), 2048);

		let reparsed = reparse(&writer);
		assert_eq!(reparsed.artist().as_deref(), Some("Foo artist"));
	}

	#[test_log::test]
	fn footer_forbids_padding() {
		let mut tag = tag_with_artist(Id3v2Version::V4);
		tag.set_flags(Id3v2TagFlags {
			footer: true,
			..Id3v2TagFlags::default()
		});

		let writer = create_tag(&tag, Some(4096), WriteOptions::default()).unwrap();
		assert_eq!(writer.len(), 41);
		assert_eq!(&writer[31..34], b"3DI");
		assert_eq!(&writer[34..], &writer[3..10]);
	}

	#[test_log::test]
	fn empty_tag_is_header_and_padding() {
		let tag = Id3v2Tag::new();

		let writer = create_tag(&tag, Some(1034), WriteOptions::default()).unwrap();
		assert_eq!(writer.len(), 1034);
		assert_eq!(&writer[..10], &[b'I', b'D', b'3', 4, 0, 0, 0, 0, 0x08, 0x00]);
	}

	#[test_log::test]
	fn v22_tag() {
		let tag = tag_with_artist(Id3v2Version::V2);

		let writer = create_tag(&tag, None, WriteOptions::default().preferred_padding(0)).unwrap();
		assert_eq!(&writer[..6], &[b'I', b'D', b'3', 2, 0, 0]);
		assert_eq!(&writer[10..13], b"TP1");

		let reparsed = reparse(&writer);
		assert_eq!(reparsed.version(), Id3v2Version::V2);
		assert_eq!(reparsed.artist().as_deref(), Some("Foo artist"));
	}
}
