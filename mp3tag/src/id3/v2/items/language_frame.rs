use crate::config::{ParsingMode, WriteOptions};
use crate::error::Result;
use crate::id3::v2::frame::content::verify_encoding;
use crate::id3::v2::header::Id3v2Version;
use crate::id3::v2::items::decode_description_and_content;
use crate::macros::{format_err, parse_mode_choice};
use crate::util::text::{TextEncoding, Utf16ByteOrder};

use byteorder::ReadBytesExt;

use std::io::Read;

/// The language used when one isn't known
pub(crate) const UNKNOWN_LANGUAGE: [u8; 3] = *b"XXX";

/// An `ID3v2` comment or unsynchronised lyrics frame (`COMM`/`USLT`)
///
/// Similar to `TXXX` and `WXXX` frames, these are told apart by their language and
/// description.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct CommentFrame {
	/// The encoding of the description and content
	pub encoding: TextEncoding,
	/// ISO-639-2 language code (3 bytes)
	pub language: [u8; 3],
	/// Unique content description
	pub description: String,
	/// The actual frame content
	pub content: String,
	/// The byte order [`TextEncoding::UTF16`] text is written with, ignored for other encodings
	pub byte_order: Utf16ByteOrder,
}

impl CommentFrame {
	/// Create a new [`CommentFrame`]
	pub fn new(
		encoding: TextEncoding,
		language: [u8; 3],
		description: impl Into<String>,
		content: impl Into<String>,
	) -> Self {
		Self {
			encoding,
			language,
			description: description.into(),
			content: content.into(),
			byte_order: Utf16ByteOrder::default(),
		}
	}

	/// Read a [`CommentFrame`] from a slice
	///
	/// NOTE: This expects the frame header to have already been skipped
	///
	/// # Errors
	///
	/// * Unable to decode the text
	/// * [`ParsingMode::Strict`] and `language` isn't made of printable characters
	///
	/// ID3v2.2:
	///
	/// * The encoding is not [`TextEncoding::Latin1`] or [`TextEncoding::UTF16`]
	pub(crate) fn parse<R>(
		reader: &mut R,
		version: Id3v2Version,
		parse_mode: ParsingMode,
	) -> Result<Option<Self>>
	where
		R: Read,
	{
		let Ok(encoding_byte) = reader.read_u8() else {
			return Ok(None);
		};

		let encoding = verify_encoding(encoding_byte, version)?;

		let mut language = [0; 3];
		reader.read_exact(&mut language)?;

		if !is_valid_language(language) {
			parse_mode_choice!(
				parse_mode,
				STRICT: return Err(format_err!(Id3v2, InvalidLanguage(language))),
				DEFAULT: log::warn!("Frame has an invalid language: {:?}", language),
			);
		}

		let (description, content, byte_order) =
			decode_description_and_content(reader, encoding)?;

		Ok(Some(Self {
			encoding,
			language,
			description,
			content,
			byte_order,
		}))
	}

	/// Convert a [`CommentFrame`] to a byte vec
	///
	/// NOTE: This does not include a frame header
	///
	/// # Errors
	///
	/// * `language` contains characters above 0x7F, or control characters other than NUL
	/// * The encoding can't be written to a tag of `version`, and [`WriteOptions::convert_text_encoding`] is disabled
	/// * [`WriteOptions::lossy_text_encoding()`] is disabled and the content cannot be encoded in the specified [`TextEncoding`].
	pub(crate) fn as_bytes(
		&self,
		version: Id3v2Version,
		write_options: WriteOptions,
	) -> Result<Vec<u8>> {
		if !is_valid_language(self.language) {
			return Err(format_err!(Id3v2, InvalidLanguage(self.language)));
		}

		let encoding = self
			.encoding
			.for_version(version, write_options.convert_text_encoding)?;
		let lossy = write_options.lossy_text_encoding;
		let order = self.byte_order;

		let mut bytes = vec![encoding as u8];
		bytes.extend(self.language);
		bytes.extend(encoding.encode_with_byte_order(&self.description, order, true, lossy)?);
		bytes.extend(encoding.encode_with_byte_order(&self.content, order, false, lossy)?);

		Ok(bytes)
	}
}

// Plenty of taggers write "\0\0\0" or "XXX" here, so only reject bytes that can't be text
fn is_valid_language(language: [u8; 3]) -> bool {
	language
		.iter()
		.all(|&c| c == 0 || (c.is_ascii() && !c.is_ascii_control()))
}

#[cfg(test)]
mod tests {
	use crate::config::{ParsingMode, WriteOptions};
	use crate::id3::v2::{CommentFrame, Id3v2Version};
	use crate::util::text::TextEncoding;

	#[test_log::test]
	fn parse_comment() {
		let content = b"\x00engdesc\x00Some comment";
		let frame = CommentFrame::parse(&mut &content[..], Id3v2Version::V4, ParsingMode::Strict)
			.unwrap()
			.unwrap();

		assert_eq!(
			frame,
			CommentFrame::new(TextEncoding::Latin1, *b"eng", "desc", "Some comment")
		);
	}

	#[test_log::test]
	fn null_language_is_accepted() {
		let content = b"\x00\x00\x00\x00\x00Some comment";
		let frame = CommentFrame::parse(&mut &content[..], Id3v2Version::V3, ParsingMode::Strict)
			.unwrap()
			.unwrap();

		assert_eq!(frame.language, [0; 3]);
		assert!(frame.description.is_empty());
		assert_eq!(frame.content, "Some comment");
	}

	#[test_log::test]
	fn invalid_language() {
		let content = b"\x00\x01\xFFgdesc\x00Some comment";
		assert!(
			CommentFrame::parse(&mut &content[..], Id3v2Version::V4, ParsingMode::Strict).is_err()
		);

		let frame =
			CommentFrame::parse(&mut &content[..], Id3v2Version::V4, ParsingMode::BestAttempt)
				.unwrap()
				.unwrap();
		assert_eq!(frame.content, "Some comment");

		// Never written back
		assert!(
			frame
				.as_bytes(Id3v2Version::V4, WriteOptions::default())
				.is_err()
		);
	}
}
