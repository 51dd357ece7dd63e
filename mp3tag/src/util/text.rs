use crate::error::Result;
use crate::id3::v2::Id3v2Version;
use crate::macros::format_err;

use std::io::Read;

use byteorder::ReadBytesExt;

/// Errors that can occur while encoding text
#[derive(Copy, Clone, Debug)]
pub struct TextEncodingError {
	encoding: TextEncoding,
	valid_up_to: usize,
	version: Option<Id3v2Version>,
}

impl TextEncodingError {
	pub(crate) fn unsupported_in(encoding: TextEncoding, version: Id3v2Version) -> Self {
		Self {
			encoding,
			valid_up_to: 0,
			version: Some(version),
		}
	}

	/// The target text encoding
	pub fn encoding(&self) -> TextEncoding {
		self.encoding
	}

	/// The byte index in the provided string up to which the encoding was valid
	pub fn valid_up_to(&self) -> usize {
		self.valid_up_to
	}

	/// The tag version that is unable to hold [`TextEncodingError::encoding`], if that is the cause
	pub fn unsupported_version(&self) -> Option<Id3v2Version> {
		self.version
	}
}

impl std::fmt::Display for TextEncodingError {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		let encoding = match self.encoding {
			TextEncoding::Latin1 => "Latin-1",
			TextEncoding::UTF16 => "UTF-16",
			TextEncoding::UTF8 => "UTF-8",
			TextEncoding::UTF16BE => "UTF-16 BE",
		};

		if let Some(version) = self.version {
			return write!(f, "{encoding} can not be written to an {version} tag");
		}

		write!(
			f,
			"invalid {encoding} sequence from index {}",
			self.valid_up_to
		)
	}
}

impl std::error::Error for TextEncodingError {}

/// The text encoding for use in ID3v2 frames
#[derive(Debug, Clone, Eq, PartialEq, Copy, Hash)]
#[repr(u8)]
pub enum TextEncoding {
	/// ISO-8859-1
	Latin1 = 0,
	/// UTF-16 with a byte order mark
	///
	/// The byte order is kept alongside the encoding in each frame, see [`Utf16ByteOrder`].
	UTF16 = 1,
	/// UTF-16 big endian, ID3v2.4 only
	UTF16BE = 2,
	/// UTF-8, ID3v2.4 only
	UTF8 = 3,
}

/// The byte order of [`TextEncoding::UTF16`] text, as given by its byte order mark
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Utf16ByteOrder {
	/// `FF FE`, used for new frames
	#[default]
	LittleEndian,
	/// `FE FF`
	BigEndian,
}

impl Utf16ByteOrder {
	pub(crate) fn from_bom(bom: &[u8]) -> Option<Self> {
		match bom {
			[0xFF, 0xFE, ..] => Some(Self::LittleEndian),
			[0xFE, 0xFF, ..] => Some(Self::BigEndian),
			_ => None,
		}
	}

	pub(crate) fn decoder(self) -> fn([u8; 2]) -> u16 {
		match self {
			Self::LittleEndian => u16::from_le_bytes,
			Self::BigEndian => u16::from_be_bytes,
		}
	}

	fn encoder(self) -> fn(u16) -> [u8; 2] {
		match self {
			Self::LittleEndian => u16::to_le_bytes,
			Self::BigEndian => u16::to_be_bytes,
		}
	}
}

impl TextEncoding {
	/// Get a `TextEncoding` from a u8, must be 0-3 inclusive
	pub fn from_u8(byte: u8) -> Option<Self> {
		match byte {
			0 => Some(Self::Latin1),
			1 => Some(Self::UTF16),
			2 => Some(Self::UTF16BE),
			3 => Some(Self::UTF8),
			_ => None,
		}
	}

	/// Whether an ID3v2 tag of `version` can hold this encoding
	pub fn supported_in(self, version: Id3v2Version) -> bool {
		match self {
			Self::Latin1 | Self::UTF16 => true,
			Self::UTF16BE | Self::UTF8 => version == Id3v2Version::V4,
		}
	}

	pub(crate) fn verify_latin1(text: &str) -> bool {
		text.chars().all(|c| u32::from(c) <= 255)
	}

	/// Resolve the encoding a frame is written with in a tag of `version`
	///
	/// Unless `convert` is set, an encoding the version can't hold is an error.
	pub(crate) fn for_version(
		self,
		version: Id3v2Version,
		convert: bool,
	) -> std::result::Result<Self, TextEncodingError> {
		if self.supported_in(version) {
			return Ok(self);
		}

		if !convert {
			return Err(TextEncodingError::unsupported_in(self, version));
		}

		log::warn!(
			"Text encoding {:?} is not supported in {}, substituting with UTF-16",
			self,
			version
		);
		Ok(Self::UTF16)
	}

	pub(crate) fn encode(
		self,
		text: &str,
		terminated: bool,
		lossy: bool,
	) -> std::result::Result<Vec<u8>, TextEncodingError> {
		self.encode_with_byte_order(text, Utf16ByteOrder::default(), terminated, lossy)
	}

	/// Encode `text`, with `byte_order` deciding the byte order mark of [`TextEncoding::UTF16`]
	pub(crate) fn encode_with_byte_order(
		self,
		text: &str,
		byte_order: Utf16ByteOrder,
		terminated: bool,
		lossy: bool,
	) -> std::result::Result<Vec<u8>, TextEncodingError> {
		match self {
			TextEncoding::Latin1 => {
				let mut out =
					latin1_encode(text, lossy).collect::<std::result::Result<Vec<u8>, _>>()?;
				if terminated {
					out.push(0)
				}

				Ok(out)
			},
			TextEncoding::UTF16 => Ok(utf16_encode(text, byte_order.encoder(), true, terminated)),
			TextEncoding::UTF16BE => Ok(utf16_encode(text, u16::to_be_bytes, false, terminated)),
			TextEncoding::UTF8 => {
				let mut out = text.as_bytes().to_vec();

				if terminated {
					out.push(0);
				}

				Ok(out)
			},
		}
	}
}

#[derive(Eq, PartialEq, Debug, Default)]
pub(crate) struct DecodeTextResult {
	pub(crate) content: String,
	pub(crate) bytes_read: usize,
	/// Only meaningful for [`TextEncoding::UTF16`]
	pub(crate) byte_order: Utf16ByteOrder,
}

/// Specify how to decode the provided text
///
/// By default, this will:
///
/// * Use [`TextEncoding::Latin1`] as the encoding
/// * Not expect the text to be null terminated
#[derive(Copy, Clone, Debug)]
pub(crate) struct TextDecodeOptions {
	pub encoding: TextEncoding,
	pub terminated: bool,
}

impl TextDecodeOptions {
	pub(crate) fn new() -> Self {
		Self::default()
	}

	pub(crate) fn encoding(mut self, encoding: TextEncoding) -> Self {
		self.encoding = encoding;
		self
	}

	pub(crate) fn terminated(mut self, terminated: bool) -> Self {
		self.terminated = terminated;
		self
	}
}

impl Default for TextDecodeOptions {
	fn default() -> Self {
		Self {
			encoding: TextEncoding::Latin1,
			terminated: false,
		}
	}
}

pub(crate) fn decode_text<R>(reader: &mut R, options: TextDecodeOptions) -> Result<DecodeTextResult>
where
	R: Read,
{
	let raw_bytes;
	let bytes_read;

	if options.terminated {
		let (bytes, terminator_len) = read_to_terminator(reader, options.encoding);

		if bytes.is_empty() {
			return Ok(DecodeTextResult {
				bytes_read: terminator_len,
				..DecodeTextResult::default()
			});
		}

		bytes_read = bytes.len() + terminator_len;
		raw_bytes = bytes;
	} else {
		let mut bytes = Vec::new();
		reader.read_to_end(&mut bytes)?;

		if bytes.is_empty() {
			return Ok(DecodeTextResult::default());
		}

		bytes_read = bytes.len();
		raw_bytes = bytes;
	}

	let mut byte_order = Utf16ByteOrder::default();
	let read_string = match options.encoding {
		TextEncoding::Latin1 => latin1_decode(&raw_bytes),
		TextEncoding::UTF16 => {
			if raw_bytes.len() < 2 {
				return Err(format_err!(
					Id3v2,
					TextDecode("UTF-16 string has an invalid length (< 2)")
				));
			}

			if raw_bytes.len() % 2 != 0 {
				return Err(format_err!(
					Id3v2,
					TextDecode("UTF-16 string has an odd length")
				));
			}

			let Some(bom_order) = Utf16ByteOrder::from_bom(&raw_bytes) else {
				return Err(format_err!(
					Id3v2,
					TextDecode("UTF-16 string has an invalid byte order mark")
				));
			};

			byte_order = bom_order;
			utf16_decode_bytes(&raw_bytes[2..], byte_order.decoder())?
		},
		TextEncoding::UTF16BE => {
			if raw_bytes.len() % 2 != 0 {
				return Err(format_err!(
					Id3v2,
					TextDecode("UTF-16 string has an odd length")
				));
			}

			utf16_decode_bytes(raw_bytes.as_slice(), u16::from_be_bytes)?
		},
		TextEncoding::UTF8 => utf8_decode(raw_bytes)?,
	};

	Ok(DecodeTextResult {
		content: read_string,
		bytes_read,
		byte_order,
	})
}

pub(crate) fn read_to_terminator<R>(reader: &mut R, encoding: TextEncoding) -> (Vec<u8>, usize)
where
	R: Read,
{
	let mut text_bytes = Vec::new();
	let mut terminator_len = 0;

	match encoding {
		TextEncoding::Latin1 | TextEncoding::UTF8 => {
			while let Ok(byte) = reader.read_u8() {
				if byte == 0 {
					terminator_len = 1;
					break;
				}

				text_bytes.push(byte)
			}
		},
		TextEncoding::UTF16 | TextEncoding::UTF16BE => {
			while let (Ok(b1), Ok(b2)) = (reader.read_u8(), reader.read_u8()) {
				if b1 == 0 && b2 == 0 {
					terminator_len = 2;
					break;
				}

				text_bytes.push(b1);
				text_bytes.push(b2)
			}
		},
	}

	(text_bytes, terminator_len)
}

pub(crate) fn latin1_decode(bytes: &[u8]) -> String {
	let mut text = bytes.iter().map(|c| char::from(*c)).collect::<String>();
	trim_end_nulls(&mut text);
	text
}

pub(crate) fn latin1_encode(
	s: &str,
	lossy: bool,
) -> impl Iterator<Item = std::result::Result<u8, TextEncodingError>> {
	s.chars().enumerate().map(move |(index, c)| {
		if let Ok(byte) = u8::try_from(c) {
			Ok(byte)
		} else if lossy {
			Ok(b'?')
		} else {
			Err(TextEncodingError {
				encoding: TextEncoding::Latin1,
				valid_up_to: index, // All characters up to this point are single-byte
				version: None,
			})
		}
	})
}

pub(crate) fn utf8_decode(bytes: Vec<u8>) -> Result<String> {
	String::from_utf8(bytes)
		.map(|mut text| {
			trim_end_nulls(&mut text);
			text
		})
		.map_err(|_| format_err!(Id3v2, TextDecode("Expected a UTF-8 string")))
}

pub(crate) fn utf16_decode_bytes(bytes: &[u8], endianness: fn([u8; 2]) -> u16) -> Result<String> {
	if bytes.is_empty() {
		return Ok(String::new());
	}

	let unverified: Vec<u16> = bytes
		.chunks_exact(2)
		// Multiple null separated strings can each carry their own BOM
		.filter_map(|c| match c {
			[0xFF, 0xFE] | [0xFE, 0xFF] => None,
			[b1, b2] => Some(endianness([*b1, *b2])),
			_ => None,
		})
		.collect();

	String::from_utf16(&unverified)
		.map(|mut text| {
			trim_end_nulls(&mut text);
			text
		})
		.map_err(|_| format_err!(Id3v2, TextDecode("Given an invalid UTF-16 string")))
}

/// Read a null-terminated UTF-16 string that may or may not have a BOM
///
/// Some encoders write a BOM for *only* the first string of a frame (the description in
/// COMM/USLT/TXXX), the rest are assumed to share its byte order. Without a BOM, `byte_order`
/// is used.
///
/// Returns the string along with the byte order it was decoded with.
pub(crate) fn utf16_decode_terminated_maybe_bom<R>(
	reader: &mut R,
	byte_order: Utf16ByteOrder,
) -> Result<(String, Utf16ByteOrder)>
where
	R: Read,
{
	let (raw_text, _) = read_to_terminator(reader, TextEncoding::UTF16);

	let byte_order = Utf16ByteOrder::from_bom(&raw_text).unwrap_or(byte_order);
	utf16_decode_bytes(&raw_text, byte_order.decoder()).map(|decoded| (decoded, byte_order))
}

pub(crate) fn trim_end_nulls(text: &mut String) {
	if text.ends_with('\0') {
		let new_len = text.trim_end_matches('\0').len();
		text.truncate(new_len);
	}
}

fn utf16_encode(
	text: &str,
	endianness: fn(u16) -> [u8; 2],
	bom: bool,
	terminated: bool,
) -> Vec<u8> {
	let mut encoded = Vec::<u8>::new();

	if bom {
		encoded.extend_from_slice(&endianness(0xFEFF_u16));
	}

	for ch in text.encode_utf16() {
		encoded.extend_from_slice(&endianness(ch));
	}

	if terminated {
		encoded.extend_from_slice(&[0, 0]);
	}

	encoded
}

#[cfg(test)]
mod tests {
	use crate::id3::v2::Id3v2Version;
	use crate::util::text::{TextDecodeOptions, TextEncoding, Utf16ByteOrder};
	use std::io::Cursor;

	const TEST_STRING: &str = "l\u{00f8}ft\u{00a5}";

	#[test_log::test]
	fn text_decode() {
		// No BOM
		let utf16_decode = super::utf16_decode_bytes(
			&[
				0x00, 0x6C, 0x00, 0xF8, 0x00, 0x66, 0x00, 0x74, 0x00, 0xA5, 0x00, 0x00,
			],
			u16::from_be_bytes,
		)
		.unwrap();

		assert_eq!(utf16_decode, TEST_STRING.to_string());

		// BOM test
		let be_utf16_decode = super::decode_text(
			&mut Cursor::new(&[
				0xFE, 0xFF, 0x00, 0x6C, 0x00, 0xF8, 0x00, 0x66, 0x00, 0x74, 0x00, 0xA5, 0x00, 0x00,
			]),
			TextDecodeOptions::new().encoding(TextEncoding::UTF16),
		)
		.unwrap();
		let le_utf16_decode = super::decode_text(
			&mut Cursor::new(&[
				0xFF, 0xFE, 0x6C, 0x00, 0xF8, 0x00, 0x66, 0x00, 0x74, 0x00, 0xA5, 0x00, 0x00, 0x00,
			]),
			TextDecodeOptions::new().encoding(TextEncoding::UTF16),
		)
		.unwrap();

		assert_eq!(be_utf16_decode.content, le_utf16_decode.content);
		assert_eq!(be_utf16_decode.bytes_read, le_utf16_decode.bytes_read);
		assert_eq!(be_utf16_decode.content, TEST_STRING.to_string());

		let utf8_decode = super::decode_text(
			&mut TEST_STRING.as_bytes(),
			TextDecodeOptions::new().encoding(TextEncoding::UTF8),
		)
		.unwrap();
		assert_eq!(utf8_decode.content, TEST_STRING.to_string());

		let empty_text_fragment = super::decode_text(
			&mut Cursor::new(&[0x00, 0x48, 0x65, 0x6C, 0x6C, 0x6F, 0x00]),
			TextDecodeOptions::new()
				.encoding(TextEncoding::UTF8)
				.terminated(true),
		)
		.unwrap();
		assert_eq!(empty_text_fragment.content, "");
		assert_eq!(empty_text_fragment.bytes_read, 1);
	}

	#[test_log::test]
	fn utf16_byte_order_is_kept() {
		let be = [0xFE, 0xFF, 0x00, 0x46, 0x00, 0x6F];
		let decoded = super::decode_text(
			&mut Cursor::new(&be),
			TextDecodeOptions::new().encoding(TextEncoding::UTF16),
		)
		.unwrap();

		assert_eq!(decoded.content, "Fo");
		assert_eq!(decoded.byte_order, Utf16ByteOrder::BigEndian);

		let encoded = TextEncoding::UTF16
			.encode_with_byte_order("Fo", decoded.byte_order, false, false)
			.unwrap();
		assert_eq!(encoded, be);

		// Other encodings don't carry one
		let decoded = super::decode_text(
			&mut Cursor::new(b"Fo"),
			TextDecodeOptions::new().encoding(TextEncoding::Latin1),
		)
		.unwrap();
		assert_eq!(decoded.byte_order, Utf16ByteOrder::LittleEndian);
	}

	#[test_log::test]
	fn utf16_without_bom_is_an_error() {
		let result = super::decode_text(
			&mut Cursor::new(&[0x00, 0x6C, 0x00, 0xF8]),
			TextDecodeOptions::new().encoding(TextEncoding::UTF16),
		);

		assert!(result.unwrap_err().is_format_error());
	}

	#[test_log::test]
	fn text_encode() {
		let le_utf16_encode = TextEncoding::UTF16
			.encode(TEST_STRING, false, false)
			.unwrap();
		let be_utf16_encode = TextEncoding::UTF16BE
			.encode(TEST_STRING, false, false)
			.unwrap();

		// TextEncoding::UTF16 is always little endian, with a BOM
		assert_eq!(
			le_utf16_encode.as_slice(),
			&[
				0xFF, 0xFE, 0x6C, 0x00, 0xF8, 0x00, 0x66, 0x00, 0x74, 0x00, 0xA5, 0x00
			]
		);
		// TextEncoding::UTF16BE has no BOM
		assert_eq!(
			be_utf16_encode.as_slice(),
			&[0x00, 0x6C, 0x00, 0xF8, 0x00, 0x66, 0x00, 0x74, 0x00, 0xA5]
		);

		let utf8_encode = TextEncoding::UTF8
			.encode(TEST_STRING, true, false)
			.unwrap();
		assert_eq!(&utf8_encode[..utf8_encode.len() - 1], TEST_STRING.as_bytes());
		assert_eq!(utf8_encode.last(), Some(&0));
	}

	#[test_log::test]
	fn latin1_encode_rejects_wide_characters() {
		let err = TextEncoding::Latin1
			.encode("a\u{4E2D}b", false, false)
			.unwrap_err();
		assert_eq!(err.valid_up_to(), 1);

		let lossy = TextEncoding::Latin1.encode("a\u{4E2D}b", false, true).unwrap();
		assert_eq!(lossy, b"a?b");
	}

	#[test_log::test]
	fn encoding_version_resolution() {
		assert_eq!(
			TextEncoding::UTF8
				.for_version(Id3v2Version::V4, false)
				.unwrap(),
			TextEncoding::UTF8
		);
		assert!(
			TextEncoding::UTF8
				.for_version(Id3v2Version::V3, false)
				.is_err()
		);
		assert_eq!(
			TextEncoding::UTF16BE
				.for_version(Id3v2Version::V2, true)
				.unwrap(),
			TextEncoding::UTF16
		);
	}
}
