use crate::config::WriteOptions;
use crate::error::Result;
use crate::id3::v2::frame::content::verify_encoding;
use crate::id3::v2::header::Id3v2Version;
use crate::util::text::{TextDecodeOptions, TextEncoding, Utf16ByteOrder, decode_text};

use byteorder::ReadBytesExt;

use std::io::Read;

/// An extended `ID3v2` URL frame (`WXXX`)
///
/// This is used to store user defined URLs. The description follows the frame's encoding,
/// while the URL itself is always [`TextEncoding::Latin1`].
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct ExtendedUrlFrame {
	/// The encoding of the description
	pub encoding: TextEncoding,
	/// Unique content description
	pub description: String,
	/// The URL
	pub content: String,
	/// The byte order [`TextEncoding::UTF16`] descriptions are written with, ignored for other encodings
	pub byte_order: Utf16ByteOrder,
}

impl ExtendedUrlFrame {
	/// Create a new [`ExtendedUrlFrame`]
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

	/// Read an [`ExtendedUrlFrame`] from a slice
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
		let description = decode_text(
			reader,
			TextDecodeOptions::new().encoding(encoding).terminated(true),
		)?;
		let content = decode_text(
			reader,
			TextDecodeOptions::new().encoding(TextEncoding::Latin1),
		)?
		.content;

		Ok(Some(ExtendedUrlFrame {
			encoding,
			description: description.content,
			content,
			byte_order: description.byte_order,
		}))
	}

	/// Convert an [`ExtendedUrlFrame`] to a byte vec
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
		bytes.extend(TextEncoding::Latin1.encode(&self.content, false, lossy)?);

		Ok(bytes)
	}
}

#[cfg(test)]
mod tests {
	use crate::config::WriteOptions;
	use crate::id3::v2::{ExtendedUrlFrame, Id3v2Version};
	use crate::util::text::TextEncoding;

	#[test_log::test]
	fn url_stays_latin1() {
		let frame = ExtendedUrlFrame::new(TextEncoding::UTF16, "a", "http://x");
		let bytes = frame
			.as_bytes(Id3v2Version::V3, WriteOptions::default())
			.unwrap();

		assert_eq!(bytes, b"\x01\xFF\xFEa\x00\x00\x00http://x");

		let parsed = ExtendedUrlFrame::parse(&mut &bytes[..], Id3v2Version::V3)
			.unwrap()
			.unwrap();
		assert_eq!(parsed, frame);
	}
}
