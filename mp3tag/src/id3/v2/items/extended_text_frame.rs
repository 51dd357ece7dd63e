use crate::config::WriteOptions;
use crate::error::Result;
use crate::id3::v2::frame::content::verify_encoding;
use crate::id3::v2::header::Id3v2Version;
use crate::id3::v2::items::decode_description_and_content;
use crate::util::text::{TextEncoding, Utf16ByteOrder};

use byteorder::ReadBytesExt;

use std::io::Read;

/// An extended `ID3v2` text frame (`TXXX`)
///
/// This is used to store user defined text, and frames are told apart by their
/// descriptions.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ExtendedTextFrame {
	/// The encoding of the description and content
	pub encoding: TextEncoding,
	/// Unique content description
	pub description: String,
	/// The actual frame content
	pub content: String,
	/// The byte order [`TextEncoding::UTF16`] text is written with, ignored for other encodings
	pub byte_order: Utf16ByteOrder,
}

impl ExtendedTextFrame {
	/// Create a new [`ExtendedTextFrame`]
	pub fn new(
		encoding: TextEncoding,
		description: impl Into<String>,
		content: impl Into<String>,
	) -> Self {
		Self {
			encoding,
			description: description.into(),
			content: content.into(),
			byte_order: Utf16ByteOrder::default(),
		}
	}

	/// Read an [`ExtendedTextFrame`] from a slice
	///
	/// NOTE: This expects the frame header to have already been skipped
	///
	/// # Errors
	///
	/// * Unable to decode the text
	///
	/// ID3v2.2:
	///
	/// * The encoding is not [`TextEncoding::Latin1`] or [`TextEncoding::UTF16`]
	pub(crate) fn parse<R>(reader: &mut R, version: Id3v2Version) -> Result<Option<Self>>
	where
		R: Read,
	{
		let Ok(encoding_byte) = reader.read_u8() else {
			return Ok(None);
		};

		let encoding = verify_encoding(encoding_byte, version)?;
		let (description, content, byte_order) =
			decode_description_and_content(reader, encoding)?;

		Ok(Some(ExtendedTextFrame {
			encoding,
			description,
			content,
			byte_order,
		}))
	}

	/// Convert an [`ExtendedTextFrame`] to a byte vec
	///
	/// # Errors
	///
	/// * The encoding can't be written to a tag of `version`, and [`WriteOptions::convert_text_encoding`] is disabled
	/// * [`WriteOptions::lossy_text_encoding()`] is disabled and the content cannot be encoded in the specified [`TextEncoding`].
	pub(crate) fn as_bytes(
		&self,
		version: Id3v2Version,
		write_options: WriteOptions,
	) -> Result<Vec<u8>> {
		let encoding = self
			.encoding
			.for_version(version, write_options.convert_text_encoding)?;
		let lossy = write_options.lossy_text_encoding;
		let order = self.byte_order;

		let mut bytes = vec![encoding as u8];
		bytes.extend(encoding.encode_with_byte_order(&self.description, order, true, lossy)?);
		bytes.extend(encoding.encode_with_byte_order(&self.content, order, false, lossy)?);

		Ok(bytes)
	}
}

#[cfg(test)]
mod tests {
	use crate::config::WriteOptions;
	use crate::id3::v2::{ExtendedTextFrame, Id3v2Version};
	use crate::util::text::{TextEncoding, Utf16ByteOrder};

	#[test_log::test]
	fn utf16_content_without_bom() {
		// Description has a big endian BOM, the content has none
		let content = b"\x01\xFE\xFF\x00F\x00o\x00o\x00\x00\x00B\x00a\x00r";
		let frame = ExtendedTextFrame::parse(&mut &content[..], Id3v2Version::V3)
			.unwrap()
			.unwrap();

		assert_eq!(frame.description, "Foo");
		assert_eq!(frame.content, "Bar");
		assert_eq!(frame.byte_order, Utf16ByteOrder::BigEndian);

		// Both strings are written with a BOM, in the byte order of the description
		let bytes = frame
			.as_bytes(Id3v2Version::V3, WriteOptions::default())
			.unwrap();
		assert_eq!(
			bytes,
			b"\x01\xFE\xFF\x00F\x00o\x00o\x00\x00\xFE\xFF\x00B\x00a\x00r"
		);
	}

	#[test_log::test]
	fn as_bytes() {
		let frame = ExtendedTextFrame::new(TextEncoding::Latin1, "MOOD", "Calm");
		let bytes = frame
			.as_bytes(Id3v2Version::V4, WriteOptions::default())
			.unwrap();

		assert_eq!(bytes, b"\x00MOOD\x00Calm");

		let parsed = ExtendedTextFrame::parse(&mut &bytes[..], Id3v2Version::V4)
			.unwrap()
			.unwrap();
		assert_eq!(parsed, frame);
	}
}
