pub(super) mod content;
pub(super) mod header;
pub(super) mod read;

use crate::config::WriteOptions;
use crate::error::{Identifier, Result, TypeMismatchError};
use crate::id3::v2::header::Id3v2Version;
use crate::id3::v2::items::{
	AttachedPictureFrame, BinaryFrame, CommentFrame, ExtendedTextFrame, ExtendedUrlFrame,
	PlayCounterFrame, TextInformationFrame, UrlLinkFrame,
};
use crate::id3::v2::registry::FrameLayout;
use crate::tag::PayloadKind;
use header::FrameId;

macro_rules! define_values {
	(
		$(#[$meta:meta])*
		pub enum $name:ident {
			$(
				$(#[$variant_meta:meta])*
				$variant:ident($type:ty) => $layout:ident, $kind:ident
			),+ $(,)?
		}
	) => {
		$(#[$meta])*
		pub enum $name {
			$(
				$(#[$variant_meta])*
				$variant($type),
			)+
		}

		impl $name {
			/// The kind of payload this value holds
			pub fn payload_kind(&self) -> PayloadKind {
				match self {
					$(
						$name::$variant(_) => PayloadKind::$kind,
					)+
				}
			}

			fn fits(&self, layout: FrameLayout) -> bool {
				match self {
					$(
						$name::$variant(_) => layout == FrameLayout::$layout,
					)+
				}
			}
		}

		$(
			impl From<$type> for $name {
				fn from(value: $type) -> Self {
					$name::$variant(value)
				}
			}
		)+
	}
}

define_values! {
	/// The content of an `ID3v2` frame
	///
	/// Which variant a frame can hold is decided by its [`FrameId`], see [`FrameId::payload_kind`].
	#[non_exhaustive]
	#[derive(Clone, Debug, PartialEq, Eq, Hash)]
	pub enum FrameValue {
		/// Represents a "T..." (excluding TXXX) frame
		Text(TextInformationFrame) => Text, Text,
		/// Represents a "TXXX" frame
		UserText(ExtendedTextFrame) => UserText, Text,
		/// Represents a "W..." (excluding WXXX) frame
		Url(UrlLinkFrame) => Url, Text,
		/// Represents a "WXXX" frame
		UserUrl(ExtendedUrlFrame) => UserUrl, Text,
		/// Represents a "COMM" or "USLT" frame
		Comment(CommentFrame) => Comment, Text,
		/// Represents an "APIC" or "PIC" frame
		Picture(AttachedPictureFrame) => Picture, Binary,
		/// Represents a "PCNT" or "CNT" frame
		Counter(PlayCounterFrame) => Counter, Integer,
		/// Binary data
		///
		/// Used for every frame that isn't interpreted, along with encrypted frames.
		Binary(BinaryFrame) => Binary, Binary,
	}
}

impl FrameValue {
	pub(crate) fn as_bytes(
		&self,
		version: Id3v2Version,
		write_options: WriteOptions,
	) -> Result<Vec<u8>> {
		Ok(match self {
			FrameValue::Text(frame) => frame.as_bytes(version, write_options)?,
			FrameValue::UserText(frame) => frame.as_bytes(version, write_options)?,
			FrameValue::Url(frame) => frame.as_bytes(write_options)?,
			FrameValue::UserUrl(frame) => frame.as_bytes(version, write_options)?,
			FrameValue::Comment(frame) => frame.as_bytes(version, write_options)?,
			FrameValue::Picture(frame) => frame.as_bytes(version, write_options)?,
			FrameValue::Counter(frame) => frame.as_bytes(),
			FrameValue::Binary(frame) => frame.data.clone(),
		})
	}

	/// The content description, for values that have one
	pub fn description(&self) -> Option<&str> {
		match self {
			FrameValue::UserText(frame) => Some(&frame.description),
			FrameValue::UserUrl(frame) => Some(&frame.description),
			FrameValue::Comment(frame) => Some(&frame.description),
			FrameValue::Picture(frame) => Some(&frame.description),
			_ => None,
		}
	}

	/// The language, for values that have one
	pub fn language(&self) -> Option<[u8; 3]> {
		match self {
			FrameValue::Comment(frame) => Some(frame.language),
			_ => None,
		}
	}

	pub(crate) fn is_empty(&self) -> bool {
		match self {
			FrameValue::Text(text) => text.value.is_empty(),
			FrameValue::UserText(extended_text) => extended_text.content.is_empty(),
			FrameValue::Url(link) => link.content.is_empty(),
			FrameValue::UserUrl(extended_url) => extended_url.content.is_empty(),
			FrameValue::Comment(comment) => comment.content.is_empty(),
			FrameValue::Picture(picture) => picture.data.is_empty(),
			FrameValue::Counter(_) => false,
			FrameValue::Binary(binary) => binary.data.is_empty(),
		}
	}
}

/// A secondary key used to tell apart frames that share an ID
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SecondaryKey<'a> {
	/// The description of a `TXXX`, `WXXX`, `COMM`, `USLT` or `APIC` frame
	Description(&'a str),
	/// The language of a `COMM` or `USLT` frame
	Language([u8; 3]),
	/// Both the language and description of a `COMM` or `USLT` frame
	LanguageDescription([u8; 3], &'a str),
}

/// Represents an `ID3v2` frame
///
/// A frame is only ever created with a value its ID can hold:
///
/// ```rust
/// use mp3tag::id3::v2::{Frame, FrameId, FrameValue, PlayCounterFrame, TextInformationFrame};
/// use mp3tag::TextEncoding;
///
/// # fn main() -> mp3tag::error::Result<()> {
/// let title = Frame::new(
/// 	FrameId::new("TIT2")?,
/// 	TextInformationFrame::new(TextEncoding::UTF8, "Foo"),
/// )?;
/// assert_eq!(title.id().as_str(), "TIT2");
///
/// let mismatch = Frame::new(FrameId::new("TIT2")?, PlayCounterFrame::new(5));
/// assert!(mismatch.unwrap_err().is_type_mismatch());
/// # Ok(()) }
/// ```
///
/// ## Outdated Frames
///
/// ### ID3v2.2
///
/// `ID3v2.2` frame IDs are 3 characters. When reading these tags, IDs are upgraded to their
/// four character counterparts. Anything that can't be upgraded is kept as-is in a
/// [`FrameValue::Binary`], and will only be written back to an `ID3v2.2` tag.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct Frame {
	pub(crate) id: FrameId,
	pub(crate) flags: FrameFlags,
	pub(crate) value: FrameValue,
}

impl Frame {
	/// Create a new frame
	///
	/// # Errors
	///
	/// `value` cannot be held by a frame with `id`, see [`FrameId::payload_kind`].
	pub fn new(id: FrameId, value: impl Into<FrameValue>) -> Result<Self> {
		let value = value.into();
		verify_value(&id, &value)?;

		Ok(Self {
			id,
			flags: FrameFlags::default(),
			value,
		})
	}

	pub(crate) fn new_unchecked(id: FrameId, flags: FrameFlags, value: FrameValue) -> Self {
		Self { id, flags, value }
	}

	/// Get the ID for the frame
	pub fn id(&self) -> &FrameId {
		&self.id
	}

	/// Get the flags for the frame
	pub fn flags(&self) -> FrameFlags {
		self.flags
	}

	/// Set the flags for the frame
	pub fn set_flags(&mut self, flags: FrameFlags) {
		self.flags = flags;
	}

	/// Get the frame's value
	pub fn value(&self) -> &FrameValue {
		&self.value
	}

	/// Replace the frame's value, returning the old one
	///
	/// # Errors
	///
	/// `value` cannot be held by a frame with this ID, see [`FrameId::payload_kind`].
	pub fn set_value(&mut self, value: impl Into<FrameValue>) -> Result<FrameValue> {
		let value = value.into();
		verify_value(&self.id, &value)?;

		Ok(std::mem::replace(&mut self.value, value))
	}

	/// Consume the frame, returning its value
	pub fn into_value(self) -> FrameValue {
		self.value
	}

	/// The kind of payload the frame holds
	pub fn payload_kind(&self) -> PayloadKind {
		self.value.payload_kind()
	}

	pub(crate) fn is_encrypted(&self) -> bool {
		self.flags.encryption.is_some() && matches!(self.value, FrameValue::Binary(_))
	}

	// Whether `other` would take the place of this frame in a tag
	pub(crate) fn same_slot(&self, other: &Frame) -> bool {
		if self.id != other.id {
			return false;
		}

		match (&self.value, &other.value) {
			(FrameValue::Binary(_), _) | (_, FrameValue::Binary(_)) => false,
			(FrameValue::Comment(a), FrameValue::Comment(b)) => {
				a.language == b.language && a.description == b.description
			},
			(a, b) => a.description() == b.description(),
		}
	}

	pub(crate) fn matches(&self, key: &SecondaryKey<'_>) -> bool {
		match *key {
			SecondaryKey::Description(description) => {
				self.value.description() == Some(description)
			},
			SecondaryKey::Language(language) => self.value.language() == Some(language),
			SecondaryKey::LanguageDescription(language, description) => {
				self.value.language() == Some(language)
					&& self.value.description() == Some(description)
			},
		}
	}
}

fn verify_value(id: &FrameId, value: &FrameValue) -> Result<()> {
	let layout = id.layout();
	if value.fits(layout) {
		return Ok(());
	}

	Err(TypeMismatchError::new(
		Identifier::Frame(id.clone()),
		layout.kind(),
		value.payload_kind(),
	)
	.into())
}

/// Various flags to describe the content of an item
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct FrameFlags {
	/// Preserve frame on tag edit
	pub tag_alter_preservation: bool,
	/// Preserve frame on file edit
	pub file_alter_preservation: bool,
	/// Item cannot be written to
	pub read_only: bool,
	/// The group identifier the frame belongs to
	///
	/// All frames with the same group identifier byte belong to the same group.
	pub grouping_identity: Option<u8>,
	/// Frame is zlib compressed
	///
	/// Compressed frames are decompressed when read, this is only retained for encrypted frames.
	pub compression: bool,
	/// Frame encryption method symbol
	///
	/// NOTE: Since the encryption method is unknown, mp3tag cannot do anything with these frames.
	/// They are kept as [`FrameValue::Binary`] and written back as-is.
	pub encryption: Option<u8>,
	/// Frame is unsynchronised
	///
	/// This is only used when reading, unsynchronisation is never written.
	pub unsynchronisation: bool,
	/// Frame has a data length indicator
	///
	/// The data length indicator is the size of the frame if the flags were all zeroed out.
	/// This is only retained for encrypted frames.
	pub data_length_indicator: Option<u32>,
}

// ID3v2.4 frame flags
const V4_TAG_ALTER_PRESERVATION: u16 = 0x4000;
const V4_FILE_ALTER_PRESERVATION: u16 = 0x2000;
const V4_READ_ONLY: u16 = 0x1000;
const V4_GROUPING_IDENTITY: u16 = 0x0040;
const V4_COMPRESSION: u16 = 0x0008;
const V4_ENCRYPTION: u16 = 0x0004;
const V4_UNSYNCHRONISATION: u16 = 0x0002;
const V4_DATA_LENGTH_INDICATOR: u16 = 0x0001;

// ID3v2.3 frame flags
const V3_TAG_ALTER_PRESERVATION: u16 = 0x8000;
const V3_FILE_ALTER_PRESERVATION: u16 = 0x4000;
const V3_READ_ONLY: u16 = 0x2000;
const V3_COMPRESSION: u16 = 0x0080;
const V3_ENCRYPTION: u16 = 0x0040;
const V3_GROUPING_IDENTITY: u16 = 0x0020;

impl FrameFlags {
	/// Parse the flags from an ID3v2.4 frame
	///
	/// NOTE: If any of the following flags are set, they will be set to `Some(0)`:
	/// * `grouping_identity`
	/// * `encryption`
	/// * `data_length_indicator`
	pub fn parse_id3v24(flags: u16) -> Self {
		FrameFlags {
			tag_alter_preservation: flags & V4_TAG_ALTER_PRESERVATION != 0,
			file_alter_preservation: flags & V4_FILE_ALTER_PRESERVATION != 0,
			read_only: flags & V4_READ_ONLY != 0,
			grouping_identity: (flags & V4_GROUPING_IDENTITY != 0).then_some(0),
			compression: flags & V4_COMPRESSION != 0,
			encryption: (flags & V4_ENCRYPTION != 0).then_some(0),
			unsynchronisation: flags & V4_UNSYNCHRONISATION != 0,
			data_length_indicator: (flags & V4_DATA_LENGTH_INDICATOR != 0).then_some(0),
		}
	}

	/// Parse the flags from an ID3v2.3 frame
	///
	/// NOTE: If any of the following flags are set, they will be set to `Some(0)`:
	/// * `grouping_identity`
	/// * `encryption`
	/// * `data_length_indicator` (implied by `compression`)
	pub fn parse_id3v23(flags: u16) -> Self {
		let compression = flags & V3_COMPRESSION != 0;

		FrameFlags {
			tag_alter_preservation: flags & V3_TAG_ALTER_PRESERVATION != 0,
			file_alter_preservation: flags & V3_FILE_ALTER_PRESERVATION != 0,
			read_only: flags & V3_READ_ONLY != 0,
			grouping_identity: (flags & V3_GROUPING_IDENTITY != 0).then_some(0),
			compression,
			encryption: (flags & V3_ENCRYPTION != 0).then_some(0),
			unsynchronisation: false,
			data_length_indicator: compression.then_some(0),
		}
	}

	/// Get the ID3v2.4 byte representation of the flags
	pub fn as_id3v24_bytes(&self) -> u16 {
		[
			(self.tag_alter_preservation, V4_TAG_ALTER_PRESERVATION),
			(self.file_alter_preservation, V4_FILE_ALTER_PRESERVATION),
			(self.read_only, V4_READ_ONLY),
			(self.grouping_identity.is_some(), V4_GROUPING_IDENTITY),
			(self.compression, V4_COMPRESSION),
			(self.encryption.is_some(), V4_ENCRYPTION),
			(self.unsynchronisation, V4_UNSYNCHRONISATION),
			(self.data_length_indicator.is_some(), V4_DATA_LENGTH_INDICATOR),
		]
		.into_iter()
		.filter(|(set, _)| *set)
		.fold(0, |flags, (_, bit)| flags | bit)
	}

	/// Get the ID3v2.3 byte representation of the flags
	///
	/// NOTE: `ID3v2.3` has no unsynchronisation or data length indicator flags, the data
	/// length indicator is implied by `compression`.
	pub fn as_id3v23_bytes(&self) -> u16 {
		[
			(self.tag_alter_preservation, V3_TAG_ALTER_PRESERVATION),
			(self.file_alter_preservation, V3_FILE_ALTER_PRESERVATION),
			(self.read_only, V3_READ_ONLY),
			(self.grouping_identity.is_some(), V3_GROUPING_IDENTITY),
			(self.compression, V3_COMPRESSION),
			(self.encryption.is_some(), V3_ENCRYPTION),
		]
		.into_iter()
		.filter(|(set, _)| *set)
		.fold(0, |flags, (_, bit)| flags | bit)
	}

	// The flags kept when a frame's content is decoded or re-encoded
	pub(crate) fn plain(self) -> Self {
		FrameFlags {
			compression: false,
			encryption: None,
			unsynchronisation: false,
			data_length_indicator: None,
			..self
		}
	}
}
