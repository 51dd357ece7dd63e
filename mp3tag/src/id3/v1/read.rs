use super::constants::{GENRES, ID3V1_TAG_MARKER};
use super::tag::Id3v1Tag;
use crate::config::ParsingMode;
use crate::error::Result;
use crate::macros::format_err;
use crate::util::text::latin1_decode;

impl Id3v1Tag {
	/// Parse an ID3v1 tag from its 128 bytes
	///
	/// A comment with a NUL in its 29th byte followed by a non-zero byte is an ID3v1.1 tag,
	/// that byte being the track number.
	///
	/// # Errors
	///
	/// * `reader` does not start with "TAG"
	/// * [`ParsingMode::Strict`]: the year is neither empty nor four ASCII digits
	pub fn parse(reader: [u8; 128], parse_mode: ParsingMode) -> Result<Self> {
		let mut tag = Self::default();

		if reader[..3] != ID3V1_TAG_MARKER {
			format_err!(@BAIL Id3v1, BadMarker);
		}

		let reader = &reader[3..];

		tag.title = decode_text(&reader[..30]);
		tag.artist = decode_text(&reader[30..60]);
		tag.album = decode_text(&reader[60..90]);

		tag.year = try_parse_year(&reader[90..94], parse_mode)?;

		let range = if reader[122] == 0 && reader[123] != 0 {
			tag.track_number = Some(reader[123]);

			94_usize..122
		} else {
			94..124
		};

		tag.comment = decode_text(&reader[range]);

		if usize::from(reader[124]) < GENRES.len() {
			tag.genre = Some(reader[124]);
		}

		log::trace!("Parsed an ID3v1 tag with {} fields", tag.len());

		Ok(tag)
	}
}

fn decode_text(data: &[u8]) -> Option<String> {
	let mut first_null_pos = data.len();
	if let Some(null_pos) = data.iter().position(|&b| b == 0) {
		if null_pos == 0 {
			return None;
		}

		if data[null_pos..].iter().any(|b| *b != b'\0') {
			log::warn!("ID3v1 text field contains trailing junk, skipping");
		}

		first_null_pos = null_pos;
	}

	Some(latin1_decode(&data[..first_null_pos]))
}

fn try_parse_year(input: &[u8], parse_mode: ParsingMode) -> Result<Option<u16>> {
	// Most writers leave an empty year as "\0\0\0\0" rather than "0000"
	if input.iter().all(|b| *b == 0) {
		return Ok(None);
	}

	let (num_digits, year) = input
		.iter()
		.take_while(|c| (**c).is_ascii_digit())
		.fold((0usize, 0u16), |(num_digits, year), c| {
			(num_digits + 1, year * 10 + u16::from(*c - b'0'))
		});

	if num_digits != 4 {
		if parse_mode == ParsingMode::Strict {
			format_err!(@BAIL Id3v1, TextDecode(
				"ID3v1 year field contains non-ASCII digit characters"
			));
		}

		log::warn!("ID3v1 year field is not four ASCII digits, discarding");
		return Ok(None);
	}

	Ok(Some(year))
}
