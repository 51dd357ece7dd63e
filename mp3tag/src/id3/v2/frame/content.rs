use crate::config::ParsingMode;
use crate::error::Result;
use crate::id3::v2::frame::FrameValue;
use crate::id3::v2::header::Id3v2Version;
use crate::id3::v2::items::{
	AttachedPictureFrame, BinaryFrame, CommentFrame, ExtendedTextFrame, ExtendedUrlFrame,
	PlayCounterFrame, TextInformationFrame, UrlLinkFrame,
};
use crate::id3::v2::registry::FrameLayout;
use crate::id3::v2::FrameId;
use crate::macros::format_err;
use crate::util::text::TextEncoding;

use std::io::Read;

#[rustfmt::skip]
pub(super) fn parse_content<R: Read>(
	reader: &mut R,
	id: &FrameId,
	version: Id3v2Version,
	parse_mode: ParsingMode,
) -> Result<Option<FrameValue>> {
	log::trace!("Parsing frame content for ID: {}", id);

	// The ID may have been upgraded, but the content is laid out according to `version`
	Ok(match id.layout() {
		FrameLayout::Text => TextInformationFrame::parse(reader, version)?.map(FrameValue::Text),
		FrameLayout::UserText => ExtendedTextFrame::parse(reader, version)?.map(FrameValue::UserText),
		FrameLayout::Url => UrlLinkFrame::parse(reader)?.map(FrameValue::Url),
		FrameLayout::UserUrl => ExtendedUrlFrame::parse(reader, version)?.map(FrameValue::UserUrl),
		FrameLayout::Comment => CommentFrame::parse(reader, version, parse_mode)?.map(FrameValue::Comment),
		FrameLayout::Picture => AttachedPictureFrame::parse(reader, version)?.map(FrameValue::Picture),
		FrameLayout::Counter => PlayCounterFrame::parse(reader)?.map(FrameValue::Counter),
		// SYLT, GEOB, and any unknown frames
		FrameLayout::Binary => {
			let mut data = Vec::new();
			reader.read_to_end(&mut data)?;
			Some(FrameValue::Binary(BinaryFrame::new(data)))
		},
	})
}

pub(in crate::id3::v2) fn verify_encoding(
	encoding: u8,
	version: Id3v2Version,
) -> Result<TextEncoding> {
	if version == Id3v2Version::V2 && (encoding != 0 && encoding != 1) {
		return Err(format_err!(Id3v2, V2InvalidTextEncoding));
	}

	match TextEncoding::from_u8(encoding) {
		None => Err(format_err!(Id3v2, BadTextEncoding(encoding))),
		Some(e) => Ok(e),
	}
}
