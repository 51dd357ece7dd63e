use crate::config::WriteOptions;
use crate::error::Result;
use crate::id3::v2::frame::content::verify_encoding;
use crate::id3::v2::header::Id3v2Version;
use crate::macros::format_err;
use crate::picture::{MimeType, PictureType};
use crate::util::text::{TextDecodeOptions, TextEncoding, Utf16ByteOrder, decode_text};

use std::io::{Read, Write as _};

use byteorder::{ReadBytesExt as _, WriteBytesExt as _};

/// An `ID3v2` attached picture frame (`APIC`, or `PIC` in `ID3v2.2`)
///
/// Pictures are told apart by their descriptions.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct AttachedPictureFrame {
	/// The encoding of the description
	pub encoding: TextEncoding,
	/// The picture's MIME type
	pub mime_type: MimeType,
	/// The picture type
	pub picture_type: PictureType,
	/// Unique picture description
	pub description: String,
	/// The image data
	pub data: Vec<u8>,
	/// The byte order [`TextEncoding::UTF16`] descriptions are written with, ignored for other encodings
	pub byte_order: Utf16ByteOrder,
}

impl AttachedPictureFrame {
	/// Create a new [`AttachedPictureFrame`]
	pub fn new(
		encoding: TextEncoding,
		mime_type: MimeType,
		picture_type: PictureType,
		description: impl Into<String>,
		data: Vec<u8>,
	) -> Self {
		Self {
			encoding,
			mime_type,
			picture_type,
			description: description.into(),
			data,
			byte_order: Utf16ByteOrder::default(),
		}
	}

	/// Get an [`AttachedPictureFrame`] from ID3v2 A/PIC bytes:
	///
	/// NOTE: This expects *only* the frame content
	///
	/// # Errors
	///
	/// * There isn't enough data present
	/// * Unable to decode any of the text
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

		let mime_type = if version == Id3v2Version::V2 {
			let mut format = [0; 3];
			reader.read_exact(&mut format)?;

			MimeType::from_v22_format(format)
		} else {
			let mime_type_str = decode_text(
				reader,
				TextDecodeOptions::new()
					.encoding(TextEncoding::Latin1)
					.terminated(true),
			)?
			.content;

			MimeType::from_str(&mime_type_str)
		};

		let picture_type = PictureType::from_u8(reader.read_u8()?);

		let description = decode_text(
			reader,
			TextDecodeOptions::new().encoding(encoding).terminated(true),
		)?;

		let mut data = Vec::new();
		reader.read_to_end(&mut data)?;

		Ok(Some(Self {
			encoding,
			mime_type,
			picture_type,
			description: description.content,
			data,
			byte_order: description.byte_order,
		}))
	}

	/// Convert an [`AttachedPictureFrame`] to a ID3v2 A/PIC byte Vec
	///
	/// NOTE: This does not include the frame header
	///
	/// # Errors
	///
	/// * Too much data was provided
	/// * The encoding can't be written to a tag of `version`, and [`WriteOptions::convert_text_encoding`] is disabled
	/// * [`WriteOptions::lossy_text_encoding()`] is disabled and the content cannot be encoded in the specified [`TextEncoding`].
	///
	/// ID3v2.2:
	///
	/// * The MIME type has no three character image format, see [`FormatErrorKind::BadPictureFormat`](crate::error::FormatErrorKind::BadPictureFormat)
	pub(crate) fn as_bytes(
		&self,
		version: Id3v2Version,
		write_options: WriteOptions,
	) -> Result<Vec<u8>> {
		let encoding = self
			.encoding
			.for_version(version, write_options.convert_text_encoding)?;

		let mut data = vec![encoding as u8];

		if version == Id3v2Version::V2 {
			let Some(format) = self.mime_type.as_v22_format() else {
				return Err(format_err!(
					Id3v2,
					BadPictureFormat(self.mime_type.as_str().to_owned())
				));
			};

			data.write_all(&format)?;
		} else {
			data.write_all(&TextEncoding::Latin1.encode(
				self.mime_type.as_str(),
				true,
				write_options.lossy_text_encoding,
			)?)?;
		}

		data.write_u8(self.picture_type.as_u8())?;
		data.write_all(&encoding.encode_with_byte_order(
			&self.description,
			self.byte_order,
			true,
			write_options.lossy_text_encoding,
		)?)?;
		data.write_all(&self.data)?;

		Ok(data)
	}
}

#[cfg(test)]
mod tests {
	use crate::config::WriteOptions;
	use crate::id3::v2::{AttachedPictureFrame, Id3v2Version};
	use crate::picture::{MimeType, PictureType};
	use crate::util::text::TextEncoding;

	fn cover() -> AttachedPictureFrame {
		AttachedPictureFrame::new(
			TextEncoding::Latin1,
			MimeType::Png,
			PictureType::CoverFront,
			"cover",
			vec![0x89, b'P', b'N', b'G'],
		)
	}

	#[test_log::test]
	fn apic() {
		let bytes = cover()
			.as_bytes(Id3v2Version::V3, WriteOptions::default())
			.unwrap();
		assert_eq!(bytes, b"\x00image/png\x00\x03cover\x00\x89PNG");

		let parsed = AttachedPictureFrame::parse(&mut &bytes[..], Id3v2Version::V3)
			.unwrap()
			.unwrap();
		assert_eq!(parsed, cover());
	}

	#[test_log::test]
	fn pic() {
		let bytes = cover()
			.as_bytes(Id3v2Version::V2, WriteOptions::default())
			.unwrap();
		assert_eq!(bytes, b"\x00PNG\x03cover\x00\x89PNG");

		let parsed = AttachedPictureFrame::parse(&mut &bytes[..], Id3v2Version::V2)
			.unwrap()
			.unwrap();
		assert_eq!(parsed, cover());
	}

	#[test_log::test]
	fn pic_needs_a_short_format() {
		let mut picture = cover();
		picture.mime_type = MimeType::Unknown(String::from("image/webp"));

		assert!(
			picture
				.as_bytes(Id3v2Version::V2, WriteOptions::default())
				.is_err()
		);
	}
}
