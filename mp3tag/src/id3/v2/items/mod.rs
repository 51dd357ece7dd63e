mod attached_picture_frame;
mod binary_frame;
mod extended_text_frame;
mod extended_url_frame;
mod language_frame;
mod play_counter_frame;
mod text_information_frame;
mod url_link_frame;

pub use attached_picture_frame::AttachedPictureFrame;
pub use binary_frame::BinaryFrame;
pub use extended_text_frame::ExtendedTextFrame;
pub use extended_url_frame::ExtendedUrlFrame;
pub use language_frame::CommentFrame;
pub(crate) use language_frame::UNKNOWN_LANGUAGE;
pub use play_counter_frame::PlayCounterFrame;
pub use text_information_frame::TextInformationFrame;
pub use url_link_frame::UrlLinkFrame;

use crate::error::Result;
use crate::util::text::{
	TextDecodeOptions, TextEncoding, Utf16ByteOrder, decode_text, utf16_decode_bytes,
	utf16_decode_terminated_maybe_bom,
};

use std::io::Read;

// Reads a terminated description followed by the rest of the frame as content
//
// With UTF-16, the content may omit its BOM and share the byte order of the description.
// The byte order of the description is the one the frame is written back with.
pub(super) fn decode_description_and_content<R>(
	reader: &mut R,
	encoding: TextEncoding,
) -> Result<(String, String, Utf16ByteOrder)>
where
	R: Read,
{
	if encoding != TextEncoding::UTF16 {
		let description = decode_text(
			reader,
			TextDecodeOptions::new().encoding(encoding).terminated(true),
		)?
		.content;
		let content = decode_text(reader, TextDecodeOptions::new().encoding(encoding))?.content;
		return Ok((description, content, Utf16ByteOrder::default()));
	}

	let (description, byte_order) =
		utf16_decode_terminated_maybe_bom(reader, Utf16ByteOrder::LittleEndian)?;

	let mut raw_content = Vec::new();
	reader.read_to_end(&mut raw_content)?;

	let content_order = Utf16ByteOrder::from_bom(&raw_content).unwrap_or(byte_order);
	let content = utf16_decode_bytes(&raw_content, content_order.decoder())?;

	Ok((description, content, byte_order))
}
