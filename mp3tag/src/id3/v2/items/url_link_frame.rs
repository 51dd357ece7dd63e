use crate::config::WriteOptions;
use crate::error::Result;
use crate::util::text::{TextDecodeOptions, TextEncoding, decode_text};

use std::io::Read;

/// An `ID3v2` URL frame
///
/// URLs are always [`TextEncoding::Latin1`] and carry no encoding byte.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct UrlLinkFrame {
	/// The URL itself
	pub content: String,
}

impl UrlLinkFrame {
	/// Create a new [`UrlLinkFrame`]
	pub fn new(content: impl Into<String>) -> Self {
		Self {
			content: content.into(),
		}
	}

	/// Read a [`UrlLinkFrame`] from a slice
	///
	/// NOTE: This expects the frame header to have already been skipped
	pub(crate) fn parse<R>(reader: &mut R) -> Result<Option<Self>>
	where
		R: Read,
	{
		let url = decode_text(
			reader,
			TextDecodeOptions::new().encoding(TextEncoding::Latin1),
		)?;
		if url.bytes_read == 0 {
			return Ok(None);
		}

		Ok(Some(UrlLinkFrame {
			content: url.content,
		}))
	}

	/// Convert a [`UrlLinkFrame`] to a byte vec
	///
	/// # Errors
	///
	/// * [`WriteOptions::lossy_text_encoding()`] is disabled and the URL isn't Latin-1
	pub(crate) fn as_bytes(&self, write_options: WriteOptions) -> Result<Vec<u8>> {
		Ok(TextEncoding::Latin1.encode(
			&self.content,
			false,
			write_options.lossy_text_encoding,
		)?)
	}
}
