use super::frame::read::ParsedFrame;
use super::header::{Id3v2Header, Id3v2Version};
use super::tag::Id3v2Tag;
use super::util::crc::crc_32;
use super::util::synchsafe::{SynchsafeInteger, decode_unsynchronisation};
use crate::config::ParseOptions;
use crate::error::Result;
use crate::macros::format_err;

use std::borrow::Cow;
use std::io::Read;

use byteorder::{BigEndian, ReadBytesExt};

// ID3v2.3 extended header flags
const V3_CRC: u16 = 0x8000;

// ID3v2.4 extended header flags
const V4_UPDATE: u8 = 0x40;
const V4_CRC: u8 = 0x20;
const V4_RESTRICTIONS: u8 = 0x10;

#[derive(Debug, PartialEq, Eq)]
struct ExtendedHeader {
	/// The full size of the extended header
	len: usize,
	crc: Option<u32>,
	/// The padding size, only stored by ID3v2.3
	padding: u32,
}

/// Parse an ID3v2 tag from its body (everything between the header and the footer)
pub(crate) fn parse_id3v2(
	body: &[u8],
	header: Id3v2Header,
	parse_options: ParseOptions,
) -> Result<Id3v2Tag> {
	log::debug!(
		"Parsing ID3v2 tag, size: {}, version: {}",
		header.size,
		header.version
	);

	let mut body = Cow::Borrowed(body);

	// ID3v2.4 unsynchronises on the frame level, the flag only tells us that every frame is
	// unsynchronised.
	let tag_unsynchronised = header.flags.unsynchronisation;
	if tag_unsynchronised && header.version != Id3v2Version::V4 {
		log::trace!("Removing tag-level unsynchronisation");
		body = Cow::Owned(decode_unsynchronisation(&body, parse_options.parsing_mode)?);
	}

	let mut flags = header.flags;
	let mut frames = &body[..];

	if header.extended_header {
		let extended_header = parse_extended_header(&body, header.version)?;
		frames = &body[extended_header.len..];

		if let Some(stored_crc) = extended_header.crc {
			flags.crc = true;
			verify_crc(frames, &extended_header, stored_crc)?;
		}
	}

	let mut tag = Id3v2Tag::with_version(header.version);
	flags.unsynchronisation = false;
	tag.set_flags(flags);

	loop {
		match ParsedFrame::read(
			&mut frames,
			header.version,
			tag_unsynchronised,
			parse_options,
		)? {
			ParsedFrame::Next(frame) => insert_parsed_frame(&mut tag, frame),
			ParsedFrame::Skip => {},
			ParsedFrame::Eof => break,
		}
	}

	log::debug!("Read {} frames", tag.len());

	Ok(tag)
}

fn insert_parsed_frame(tag: &mut Id3v2Tag, frame: super::Frame) {
	let frame_value_is_empty = frame.value().is_empty();

	if let Some(replaced_frame) = tag.insert_frame(frame) {
		// Duplicate frames are not allowed, but if this occurs we try to keep the frame
		// with content. Superfluous duplicate frames are often empty.
		if frame_value_is_empty && !replaced_frame.value().is_empty() {
			log::warn!(
				"Restoring non-empty frame with ID \"{id}\" that has been replaced by an empty \
				 frame with the same ID",
				id = replaced_frame.id()
			);
			let _ = tag.insert_frame(replaced_frame);
		} else {
			log::warn!(
				"Replaced frame with ID \"{id}\" by a frame with the same ID",
				id = replaced_frame.id()
			);
		}
	}
}

fn parse_extended_header(body: &[u8], version: Id3v2Version) -> Result<ExtendedHeader> {
	fn read_v3(reader: &mut &[u8]) -> std::io::Result<ExtendedHeader> {
		// The size doesn't include itself
		let size = reader.read_u32::<BigEndian>()? as usize;
		let flags = reader.read_u16::<BigEndian>()?;
		let padding = reader.read_u32::<BigEndian>()?;

		let mut crc = None;
		if flags & V3_CRC == V3_CRC {
			crc = Some(reader.read_u32::<BigEndian>()?);
		}

		Ok(ExtendedHeader {
			len: size + 4,
			crc,
			padding,
		})
	}

	fn read_v4(reader: &mut &[u8]) -> std::io::Result<ExtendedHeader> {
		let size = reader.read_u32::<BigEndian>()?.unsynch() as usize;

		// Useless byte since there's only 1 byte for flags
		let _num_flag_bytes = reader.read_u8()?;
		let flags = reader.read_u8()?;

		// Every flag's data is preceded by its length
		if flags & V4_UPDATE == V4_UPDATE {
			let _data_length = reader.read_u8()?;
		}

		let mut crc = None;
		if flags & V4_CRC == V4_CRC {
			let _data_length = reader.read_u8()?;

			// Stored as a 35 bit synchsafe integer
			let mut encoded = [0; 5];
			reader.read_exact(&mut encoded)?;
			crc = Some(
				encoded
					.iter()
					.fold(0_u64, |crc, b| (crc << 7) | u64::from(b & 0x7F)) as u32,
			);
		}

		if flags & V4_RESTRICTIONS == V4_RESTRICTIONS {
			// Restrictions only apply to the tag's author, nothing to enforce when reading
			let _data_length = reader.read_u8()?;
			let _restrictions = reader.read_u8()?;
		}

		Ok(ExtendedHeader {
			len: size,
			crc,
			padding: 0,
		})
	}

	log::trace!("Parsing extended header");

	let mut reader = body;
	let parsed = match version {
		Id3v2Version::V3 => read_v3(&mut reader),
		Id3v2Version::V4 => read_v4(&mut reader),
		// ID3v2.2 has no extended header
		Id3v2Version::V2 => return Err(format_err!(Id3v2, BadExtendedHeaderSize)),
	};

	let Ok(extended_header) = parsed else {
		return Err(format_err!(Id3v2, BadExtendedHeaderSize));
	};

	let consumed = body.len() - reader.len();
	if extended_header.len < 6
		|| extended_header.len < consumed
		|| extended_header.len > body.len()
	{
		log::debug!(
			"Extended header size {} is invalid (tag body: {} bytes)",
			extended_header.len,
			body.len()
		);
		return Err(format_err!(Id3v2, BadExtendedHeaderSize));
	}

	Ok(extended_header)
}

// The CRC covers the frames, ID3v2.4 includes the padding as well
fn verify_crc(frames: &[u8], extended_header: &ExtendedHeader, stored_crc: u32) -> Result<()> {
	let Some(covered_len) = frames.len().checked_sub(extended_header.padding as usize) else {
		return Err(format_err!(Id3v2, BadExtendedHeaderSize));
	};

	let crc = crc_32(&frames[..covered_len]);
	if crc != stored_crc {
		log::warn!("Tag CRC-32 mismatch (stored: {stored_crc:#010x}, calculated: {crc:#010x})");
	}

	Ok(())
}
