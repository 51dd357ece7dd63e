use crate::config::WriteOptions;
use crate::error::Result;
use crate::id3::v2::frame::content::verify_encoding;
use crate::id3::v2::header::Id3v2Version;
use crate::util::text::{TextDecodeOptions, TextEncoding, Utf16ByteOrder, decode_text};

use byteorder::ReadBytesExt;

use std::io::Read;

/// An `ID3v2` text frame
///
/// This covers every "T..." frame other than `TXXX`, along with the few text frames that
/// don't follow the naming scheme (`IPLS`, `GRP1`, `MVNM`, `MVIN`). `ID3v2.4` allows multiple
/// values, they are kept null separated in `value`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct TextInformationFrame {
	/// The encoding of the text
	pub encoding: TextEncoding,
	/// The text itself
	pub value: String,
	/// The byte order [`TextEncoding::UTF16`] text is written with, ignored for other encodings
	pub byte_order: Utf16ByteOrder,
}

impl TextInformationFrame {
	/// Create a new [`TextInformationFrame`]
	pub fn new(encoding: TextEncoding, value: impl Into<String>) -> Self {
		Self {
			encoding,
			value: value.into(),
			byte_order: Utf16ByteOrder::default(),
		}
	}

	/// Read a [`TextInformationFrame`] from a slice
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
		let decoded = decode_text(reader, TextDecodeOptions::new().encoding(encoding))?;

		Ok(Some(TextInformationFrame {
			encoding,
			value: decoded.content,
			byte_order: decoded.byte_order,
		}))
	}

	/// Convert a [`TextInformationFrame`] to a byte vec
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

		let mut content = encoding.encode_with_byte_order(
			&self.value,
			self.byte_order,
			false,
			write_options.lossy_text_encoding,
		)?;
		content.insert(0, encoding as u8);
		Ok(content)
	}
}

#[cfg(test)]
mod tests {
	use crate::config::WriteOptions;
	use crate::id3::v2::{Id3v2Version, TextInformationFrame};
	use crate::util::text::{TextEncoding, Utf16ByteOrder};

	#[test_log::test]
	fn parse_text_frame() {
		let content = b"\x00Foo Bar\x00";
		let frame = TextInformationFrame::parse(&mut &content[..], Id3v2Version::V4)
			.unwrap()
			.unwrap();

		assert_eq!(frame, TextInformationFrame::new(TextEncoding::Latin1, "Foo Bar"));
	}

	#[test_log::test]
	fn empty_text_frame() {
		let content: &[u8] = &[];
		assert!(
			TextInformationFrame::parse(&mut &content[..], Id3v2Version::V4)
				.unwrap()
				.is_none()
		);
	}

	#[test_log::test]
	fn big_endian_utf16_is_written_back_as_is() {
		let content = b"\x01\xFE\xFF\x00F\x00o\x00o";
		let frame = TextInformationFrame::parse(&mut &content[..], Id3v2Version::V3)
			.unwrap()
			.unwrap();

		assert_eq!(frame.value, "Foo");
		assert_eq!(frame.byte_order, Utf16ByteOrder::BigEndian);
		assert_eq!(
			frame
				.as_bytes(Id3v2Version::V3, WriteOptions::default())
				.unwrap(),
			content
		);

		// New frames are little endian
		let frame = TextInformationFrame::new(TextEncoding::UTF16, "Foo");
		assert_eq!(
			frame
				.as_bytes(Id3v2Version::V3, WriteOptions::default())
				.unwrap(),
			b"\x01\xFF\xFEF\x00o\x00o\x00"
		);
	}

	#[test_log::test]
	fn v22_rejects_utf8() {
		let content = b"\x03Foo";
		assert!(TextInformationFrame::parse(&mut &content[..], Id3v2Version::V2).is_err());
	}

	#[test_log::test]
	fn utf8_in_v23() {
		let frame = TextInformationFrame::new(TextEncoding::UTF8, "Foo");

		assert!(frame.as_bytes(Id3v2Version::V4, WriteOptions::default()).is_ok());
		assert!(frame.as_bytes(Id3v2Version::V3, WriteOptions::default()).is_err());

		let converted = frame
			.as_bytes(
				Id3v2Version::V3,
				WriteOptions::default().convert_text_encoding(true),
			)
			.unwrap();
		assert_eq!(converted, b"\x01\xFF\xFEF\x00o\x00o\x00");
	}
}
