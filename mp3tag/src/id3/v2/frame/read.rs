use super::content::parse_content;
use super::{Frame, FrameFlags, FrameValue};
use crate::config::{ParseOptions, ParsingMode};
use crate::error::Result;
use crate::id3::v2::header::Id3v2Version;
use crate::id3::v2::items::BinaryFrame;
use crate::id3::v2::registry::upgrade_v2;
use crate::id3::v2::util::synchsafe::{SynchsafeInteger, decode_unsynchronisation};
use crate::id3::v2::FrameId;
use crate::macros::{err, format_err, parse_mode_choice};

use std::borrow::Cow;

pub(crate) enum ParsedFrame {
	Next(Frame),
	Skip,
	Eof,
}

impl ParsedFrame {
	/// Read the next frame, advancing `reader` past it
	///
	/// `reader` is the remainder of the (tag-level de-unsynchronised) tag body.
	pub(crate) fn read(
		reader: &mut &[u8],
		version: Id3v2Version,
		tag_unsynchronised: bool,
		parse_options: ParseOptions,
	) -> Result<Self> {
		let parse_mode = parse_options.parsing_mode;

		let header_len = if version == Id3v2Version::V2 { 6 } else { 10 };

		// Assume we just started reading padding
		if reader.len() < header_len || reader[0] == 0 {
			return Ok(Self::Eof);
		}

		let (header, rest) = reader.split_at(header_len);
		*reader = rest;

		let (id_bytes, size, raw_flags) = match version {
			Id3v2Version::V2 => (
				&header[..3],
				u32::from_be_bytes([0, header[3], header[4], header[5]]),
				0,
			),
			Id3v2Version::V3 | Id3v2Version::V4 => {
				let mut size = u32::from_be_bytes([header[4], header[5], header[6], header[7]]);
				if version == Id3v2Version::V4 {
					size = size.unsynch();
				}

				// For some reason, some apps make v3 tags with v2 frame IDs.
				// The actual frame header is v3 though
				let mut id_end = 4;
				if version == Id3v2Version::V3 && header[3] == 0 {
					log::warn!("Found a v2 frame ID in a v3 tag, attempting to upgrade");
					id_end = 3;
				}

				(
					&header[..id_end],
					size,
					u16::from_be_bytes([header[8], header[9]]),
				)
			},
		};
		let size = size as usize;

		if !FrameId::is_valid_id(id_bytes) {
			let err = format_err!(Id3v2, BadFrameId(id_bytes.to_vec()));
			if parse_mode == ParsingMode::Strict {
				return Err(err);
			}

			if size > reader.len() {
				log::warn!("{}, stopping", err);
				return Ok(Self::Eof);
			}

			log::warn!("{}, skipping", err);
			*reader = &reader[size..];
			return Ok(Self::Skip);
		}

		if size > reader.len() {
			parse_mode_choice!(
				parse_mode,
				STRICT: return Err(format_err!(Id3v2, BadFrameLength)),
				DEFAULT: {
					log::warn!(
						"Frame size ({size}) exceeds the remaining tag size ({}), stopping",
						reader.len()
					);
					return Ok(Self::Eof);
				},
			);
		}

		let (content, rest) = reader.split_at(size);
		*reader = rest;

		let id = frame_id(id_bytes)?;

		if size == 0 {
			if parse_mode == ParsingMode::Strict {
				return Err(format_err!(Id3v2, EmptyFrame(id)));
			}

			log::warn!("Encountered a zero length frame ({id}), skipping");
			return Ok(Self::Skip);
		}

		let flags = match version {
			Id3v2Version::V2 => FrameFlags::default(),
			Id3v2Version::V3 => FrameFlags::parse_id3v23(raw_flags),
			Id3v2Version::V4 => FrameFlags::parse_id3v24(raw_flags),
		};

		match read_content(content, id, flags, version, tag_unsynchronised, parse_options) {
			Ok(Some(frame)) => Ok(Self::Next(frame)),
			Ok(None) => Ok(Self::Skip),
			Err(err) => parse_mode_choice!(
				parse_mode,
				STRICT: Err(err),
				DEFAULT: {
					log::warn!("Failed to read frame content, skipping: {}", err);
					Ok(Self::Skip)
				},
			),
		}
	}
}

// Upgrades ID3v2.2 IDs, keeping the ones without a counterpart as-is
fn frame_id(id_bytes: &[u8]) -> Result<FrameId> {
	let id = id_bytes.iter().copied().map(char::from).collect::<String>();
	if id.len() == 3 {
		if let Some(upgraded) = upgrade_v2(&id) {
			return Ok(FrameId::new_unchecked(upgraded));
		}
	}

	FrameId::new(id)
}

fn read_content(
	mut content: &[u8],
	id: FrameId,
	mut flags: FrameFlags,
	version: Id3v2Version,
	tag_unsynchronised: bool,
	parse_options: ParseOptions,
) -> Result<Option<Frame>> {
	if content.len() > parse_options.allocation_limit {
		err!(TooMuchData);
	}

	// The additional data is stored in the order of the flags, which differs between versions
	match version {
		Id3v2Version::V2 => {},
		Id3v2Version::V3 => {
			if flags.compression {
				log::trace!("Reading data length indicator");
				flags.data_length_indicator = Some(take_u32(&mut content)?);
			}

			if let Some(method) = flags.encryption.as_mut() {
				log::trace!("Reading encryption method symbol");
				*method = take_u8(&mut content)?;
			}

			if let Some(group) = flags.grouping_identity.as_mut() {
				log::trace!("Reading group identifier");
				*group = take_u8(&mut content)?;
			}
		},
		Id3v2Version::V4 => {
			if let Some(group) = flags.grouping_identity.as_mut() {
				log::trace!("Reading group identifier");
				*group = take_u8(&mut content)?;
			}

			if let Some(method) = flags.encryption.as_mut() {
				log::trace!("Reading encryption method symbol");
				*method = take_u8(&mut content)?;
			}

			if flags.data_length_indicator.is_some() {
				log::trace!("Reading data length indicator");
				flags.data_length_indicator = Some(take_u32(&mut content)?.unsynch());
			}
		},
	}

	// Frames must have at least 1 byte, *after* all of the additional data flags can provide
	if content.is_empty() {
		return Err(format_err!(Id3v2, BadFrameLength));
	}

	let mut content = Cow::Borrowed(content);

	if flags.unsynchronisation || (version == Id3v2Version::V4 && tag_unsynchronised) {
		content = Cow::Owned(decode_unsynchronisation(
			&content,
			parse_options.parsing_mode,
		)?);
		flags.unsynchronisation = false;
	}

	if (flags.compression || flags.encryption.is_some())
		&& version == Id3v2Version::V4
		&& flags.data_length_indicator.is_none()
	{
		return Err(format_err!(Id3v2, MissingDataLengthIndicator));
	}

	// Nothing can be done with encrypted frames, they're kept as-is
	if flags.encryption.is_some() {
		log::debug!("Keeping encrypted frame ({id}) as binary");
		return Ok(Some(Frame::new_unchecked(
			id,
			flags,
			FrameValue::Binary(BinaryFrame::new(content.into_owned())),
		)));
	}

	if flags.compression {
		content = Cow::Owned(decompress(&content, parse_options.allocation_limit)?);
	}

	let flags = flags.plain();
	let value = parse_content(&mut &*content, &id, version, parse_options.parsing_mode)?;

	Ok(value.map(|value| Frame::new_unchecked(id, flags, value)))
}

fn take_u8(content: &mut &[u8]) -> Result<u8> {
	let Some((&byte, rest)) = content.split_first() else {
		return Err(format_err!(Id3v2, BadFrameLength));
	};

	*content = rest;
	Ok(byte)
}

fn take_u32(content: &mut &[u8]) -> Result<u32> {
	let Some((bytes, rest)) = content.split_first_chunk::<4>() else {
		return Err(format_err!(Id3v2, BadFrameLength));
	};

	*content = rest;
	Ok(u32::from_be_bytes(*bytes))
}

#[cfg(feature = "id3v2_compression_support")]
fn decompress(content: &[u8], allocation_limit: usize) -> Result<Vec<u8>> {
	use std::io::Read as _;

	log::trace!("Decompressing frame content");

	let mut decompressed = Vec::new();
	flate2::read::ZlibDecoder::new(content)
		.take(allocation_limit as u64 + 1)
		.read_to_end(&mut decompressed)
		.map_err(|err| format_err!(Id3v2, Decompression(err)))?;

	if decompressed.len() > allocation_limit {
		err!(TooMuchData);
	}

	Ok(decompressed)
}

#[cfg(not(feature = "id3v2_compression_support"))]
fn decompress(_: &[u8], _: usize) -> Result<Vec<u8>> {
	Err(format_err!(Id3v2, CompressedFrameEncountered))
}

#[cfg(test)]
mod tests {
	use super::ParsedFrame;
	use crate::config::{ParseOptions, ParsingMode};
	use crate::id3::v2::{FrameValue, Id3v2Version};

	fn read(mut content: &[u8], version: Id3v2Version, mode: ParsingMode) -> ParsedFrame {
		ParsedFrame::read(
			&mut content,
			version,
			false,
			ParseOptions::new().parsing_mode(mode),
		)
		.unwrap()
	}

	#[test_log::test]
	fn v22_ids_are_upgraded() {
		let content = b"TT2\x00\x00\x04\x00Foo";
		let ParsedFrame::Next(frame) = read(content, Id3v2Version::V2, ParsingMode::Strict) else {
			panic!("Expected a frame");
		};

		assert_eq!(frame.id().as_str(), "TIT2");
	}

	#[test_log::test]
	fn unknown_v22_ids_are_kept() {
		let content = b"ZZZ\x00\x00\x03abc";
		let ParsedFrame::Next(frame) = read(content, Id3v2Version::V2, ParsingMode::Strict) else {
			panic!("Expected a frame");
		};

		assert_eq!(frame.id().as_str(), "ZZZ");
		assert!(matches!(frame.value(), FrameValue::Binary(b) if b.data == b"abc"));
	}

	#[test_log::test]
	fn padding() {
		let content = [0; 20];
		assert!(matches!(
			read(&content, Id3v2Version::V4, ParsingMode::Strict),
			ParsedFrame::Eof
		));
	}

	#[test_log::test]
	fn frame_too_large() {
		let mut content: &[u8] = b"TALB\x00\x00\x00\x7F\x00\x00\x00Foo";
		assert!(
			ParsedFrame::read(
				&mut content,
				Id3v2Version::V4,
				false,
				ParseOptions::new()
			)
			.is_err()
		);

		assert!(matches!(
			read(
				b"TALB\x00\x00\x00\x7F\x00\x00\x00Foo",
				Id3v2Version::V4,
				ParsingMode::BestAttempt
			),
			ParsedFrame::Eof
		));
	}

	#[test_log::test]
	fn bad_id_is_skipped() {
		let mut content: &[u8] = b"T@LB\x00\x00\x00\x02\x00\x00\x00AQAAA";
		let parse_options = ParseOptions::new().parsing_mode(ParsingMode::Relaxed);

		let parsed = ParsedFrame::read(&mut content, Id3v2Version::V3, false, parse_options);
		assert!(matches!(parsed, Ok(ParsedFrame::Skip)));
		assert_eq!(content, b"AAA");
	}

	#[test_log::test]
	fn empty_frame() {
		let mut content: &[u8] = b"TALB\x00\x00\x00\x00\x00\x00";
		assert!(
			ParsedFrame::read(&mut content, Id3v2Version::V3, false, ParseOptions::new()).is_err()
		);

		assert!(matches!(
			read(
				b"TALB\x00\x00\x00\x00\x00\x00",
				Id3v2Version::V3,
				ParsingMode::BestAttempt
			),
			ParsedFrame::Skip
		));
	}

	#[test_log::test]
	fn encrypted_frames_are_binary() {
		// Encryption method 0x80, group 0x01
		let content = b"TALB\x00\x00\x00\x05\x00\x60\x80\x01\xDE\xAD\xBE";
		let ParsedFrame::Next(frame) = read(content, Id3v2Version::V3, ParsingMode::Strict) else {
			panic!("Expected a frame");
		};

		assert_eq!(frame.flags().encryption, Some(0x80));
		assert_eq!(frame.flags().grouping_identity, Some(0x01));
		assert!(matches!(frame.value(), FrameValue::Binary(b) if b.data == [0xDE, 0xAD, 0xBE]));
	}

	#[test_log::test]
	fn unsynchronised_v24_frame() {
		let content = b"TALB\x00\x00\x00\x05\x00\x02\x00\xFF\x00\xFEa";
		let parsed = read(content, Id3v2Version::V4, ParsingMode::Strict);

		let ParsedFrame::Next(frame) = parsed else {
			panic!("Expected a frame");
		};

		let FrameValue::Text(text) = frame.value() else {
			panic!("Expected a text frame");
		};
		assert_eq!(text.value, "\u{FF}\u{FE}a");
		assert!(!frame.flags().unsynchronisation);
	}

	#[cfg(feature = "id3v2_compression_support")]
	#[test_log::test]
	fn compressed_v23_frame() {
		use flate2::Compression;
		use flate2::write::ZlibEncoder;
		use std::io::Write;

		let mut encoder = ZlibEncoder::new(Vec::new(), Compression::default());
		encoder.write_all(b"\x00Compressed").unwrap();
		let compressed = encoder.finish().unwrap();

		let mut content = b"TALB".to_vec();
		content.extend((compressed.len() as u32 + 4).to_be_bytes());
		content.extend([0x00, 0x80]);
		content.extend(11_u32.to_be_bytes());
		content.extend(compressed);

		let ParsedFrame::Next(frame) = read(&content, Id3v2Version::V3, ParsingMode::Strict) else {
			panic!("Expected a frame");
		};

		assert!(!frame.flags().compression);
		assert_eq!(frame.flags().data_length_indicator, None);
		let FrameValue::Text(text) = frame.value() else {
			panic!("Expected a text frame");
		};
		assert_eq!(text.value, "Compressed");
	}
}
