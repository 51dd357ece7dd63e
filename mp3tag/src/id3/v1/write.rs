use super::constants::{ID3V1_TAG_MARKER, NO_GENRE};
use super::tag::Id3v1Tag;
use crate::config::WriteOptions;
use crate::error::Result;
use crate::util::text::latin1_encode;

use std::io::{Cursor, Write};

use byteorder::WriteBytesExt;

impl Id3v1Tag {
	/// Encode the tag into its 128 byte form
	///
	/// Text fields are written as Latin-1 and truncated to their maximum sizes. With a track
	/// number, the tag is written as ID3v1.1.
	///
	/// # Errors
	///
	/// A text field holds characters outside of Latin-1, and
	/// [`WriteOptions::lossy_text_encoding`] is disabled.
	pub fn encode(&self, write_options: WriteOptions) -> Result<[u8; 128]> {
		let mut writer = Cursor::new([0; 128]);

		writer.write_all(&ID3V1_TAG_MARKER)?;

		write_text(&mut writer, self.title.as_deref(), 30, write_options)?;
		write_text(&mut writer, self.artist.as_deref(), 30, write_options)?;
		write_text(&mut writer, self.album.as_deref(), 30, write_options)?;

		let mut year = [0; 4];
		if let Some(year_num) = self.year {
			let mut year_num = std::cmp::min(year_num, 9999);

			for digit in year.iter_mut().rev() {
				*digit = b'0' + (year_num % 10) as u8;
				year_num /= 10;
			}
		}

		writer.write_all(&year)?;

		match self.track_number {
			Some(track_number) => {
				write_text(&mut writer, self.comment.as_deref(), 28, write_options)?;
				writer.write_u8(0)?;
				writer.write_u8(track_number)?;
			},
			None => write_text(&mut writer, self.comment.as_deref(), 30, write_options)?,
		}

		writer.write_u8(self.genre.unwrap_or(NO_GENRE))?;

		Ok(writer.into_inner())
	}
}

// Writes exactly `size` bytes, truncating or NUL padding the text
fn write_text<W>(
	writer: &mut W,
	value: Option<&str>,
	size: usize,
	write_options: WriteOptions,
) -> Result<()>
where
	W: Write,
{
	let mut field = vec![0; size];

	if let Some(val) = value {
		for (slot, b) in field
			.iter_mut()
			.zip(latin1_encode(val, write_options.lossy_text_encoding))
		{
			*slot = b?;
		}

		if val.chars().count() > size {
			log::warn!("ID3v1 text field is longer than {size} bytes, truncating");
		}
	}

	writer.write_all(&field)?;
	Ok(())
}

#[cfg(test)]
mod tests {
	use crate::config::{ParsingMode, WriteOptions};
	use crate::id3::v1::{Id3v1Tag, Id3v1Version};

	#[test_log::test]
	fn truncates_long_fields() {
		let tag = Id3v1Tag {
			title: Some("t".repeat(40)),
			comment: Some("c".repeat(40)),
			track_number: Some(3),
			..Id3v1Tag::default()
		};

		let encoded = tag.encode(WriteOptions::default()).unwrap();
		assert_eq!(&encoded[3..33], "t".repeat(30).as_bytes());
		assert_eq!(&encoded[97..125], "c".repeat(28).as_bytes());
		assert_eq!(encoded[125], 0);
		assert_eq!(encoded[126], 3);
		assert_eq!(encoded[127], 0xFF);

		let parsed = Id3v1Tag::parse(encoded, ParsingMode::Strict).unwrap();
		assert_eq!(parsed.version(), Id3v1Version::V1_1);
		assert_eq!(parsed.comment, Some("c".repeat(28)));
	}

	#[test_log::test]
	fn v1_0_uses_full_comment() {
		let tag = Id3v1Tag {
			comment: Some("c".repeat(30)),
			year: Some(7),
			..Id3v1Tag::default()
		};

		let encoded = tag.encode(WriteOptions::default()).unwrap();
		assert_eq!(&encoded[93..97], b"0007");
		assert_eq!(&encoded[97..127], "c".repeat(30).as_bytes());

		let parsed = Id3v1Tag::parse(encoded, ParsingMode::Strict).unwrap();
		assert_eq!(parsed, tag);
	}

	#[test_log::test]
	fn empty_tag() {
		let encoded = Id3v1Tag::new().encode(WriteOptions::default()).unwrap();
		assert_eq!(&encoded[..3], b"TAG");
		assert!(encoded[3..127].iter().all(|b| *b == 0));
		assert_eq!(encoded[127], 0xFF);
	}

	#[test_log::test]
	fn non_latin1() {
		let tag = Id3v1Tag {
			artist: Some(String::from("Art\u{4E00}st")),
			..Id3v1Tag::default()
		};

		assert!(tag.encode(WriteOptions::default()).is_err());

		let encoded = tag
			.encode(WriteOptions::default().lossy_text_encoding(true))
			.unwrap();
		assert_eq!(&encoded[33..39], b"Art?st");
	}
}
