//! Contains the errors that can arise within mp3tag
//!
//! The primary error is [`Mp3TagError`]. The type of error is determined by [`ErrorKind`],
//! which can be extended at any time.

use crate::id3::v2::FrameId;
use crate::tag::{PayloadKind, TagType};
pub use crate::util::text::TextEncodingError;

use std::collections::TryReserveError;
use std::fmt::{Debug, Display, Formatter};

/// Alias for `Result<T, Mp3TagError>`
pub type Result<T> = std::result::Result<T, Mp3TagError>;

/// The types of errors that can occur
#[derive(Debug)]
#[non_exhaustive]
pub enum ErrorKind {
	/// A tag is malformed or truncated
	Format(FormatError),
	/// A payload does not match the type declared for its identifier
	TypeMismatch(TypeMismatchError),
	/// A tag declares a version this crate does not implement
	UnsupportedVersion(UnsupportedVersionError),
	/// Errors that arise while encoding text
	TextEncode(TextEncodingError),
	/// Attempting to read/write an abnormally large amount of data
	TooMuchData,

	// Conversions for external errors
	/// Represents all cases of [`std::io::Error`].
	Io(std::io::Error),
	/// Failure to allocate enough memory
	Alloc(TryReserveError),
	/// This should **never** be encountered
	Infallible(std::convert::Infallible),
}

/// The specific reason a tag failed to parse
#[derive(Debug)]
#[non_exhaustive]
pub enum FormatErrorKind {
	// Tag layout
	/// The tag does not start with its identifier ("TAG" or "ID3")
	BadMarker,
	/// The tag's declared size doesn't fit within the file
	BadTagSize,
	/// The tag ended before its header could be read
	TruncatedHeader,
	/// The tag header has flags set that are undefined for its version
	BadTagFlags(u8),
	/// The tag footer is not a copy of the header
	BadFooter,
	/// Arises when an extended header has an invalid size (must be >= 6 bytes and less than the total tag size)
	BadExtendedHeaderSize,
	/// Arises when a compressed ID3v2.2 tag is encountered
	///
	/// At the time the ID3v2.2 specification was written, a compression scheme wasn't decided.
	/// As such, it is recommended to ignore the tag entirely.
	V2Compression,

	// Frame
	/// Arises when a frame ID contains invalid characters (must be within `'A'..'Z'` or `'0'..'9'`)
	/// or if the ID is too short/long.
	BadFrameId(Vec<u8>),
	/// Arises when a frame doesn't have enough data
	BadFrameLength,
	/// Arises when a frame with no content is found
	EmptyFrame(FrameId),
	/// Arises when reading a compressed or encrypted frame with no data length indicator
	MissingDataLengthIndicator,
	/// Arises when a frame or tag has its unsynchronisation flag set, but the content is not actually synchsafe
	InvalidUnsynchronisation,
	/// Arises when a text encoding byte is not one of the four defined encodings
	BadTextEncoding(u8),
	/// Arises when a text encoding other than Latin-1 or UTF-16 appears in an ID3v2.2 tag
	V2InvalidTextEncoding,
	/// Arises when an invalid picture format is parsed. Only applicable to [`Id3v2Version::V2`](crate::id3::v2::Id3v2Version::V2)
	BadPictureFormat(String),
	/// Arises when a comment or lyrics frame has an invalid language
	InvalidLanguage([u8; 3]),
	/// A text field could not be decoded
	TextDecode(&'static str),

	// Compression
	#[cfg(feature = "id3v2_compression_support")]
	/// Arises when a compressed frame is unable to be decompressed
	Decompression(std::io::Error),
	#[cfg(not(feature = "id3v2_compression_support"))]
	/// Arises when a compressed frame is encountered, but support is disabled
	CompressedFrameEncountered,
}

impl Display for FormatErrorKind {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Self::BadMarker => write!(f, "Tag does not start with its identifier"),
			Self::BadTagSize => write!(f, "Tag size is inconsistent with the file size"),
			Self::TruncatedHeader => write!(f, "Tag header is truncated"),
			Self::BadTagFlags(flags) => write!(f, "Tag header has undefined flags set: {flags:#04x}"),
			Self::BadFooter => write!(f, "Tag footer does not match the header"),
			Self::BadExtendedHeaderSize => {
				write!(f, "Found an extended header with an invalid size")
			},
			Self::V2Compression => write!(f, "Encountered a compressed ID3v2.2 tag"),

			Self::BadFrameId(frame_id) => write!(f, "Failed to parse a frame ID: 0x{frame_id:x?}"),
			Self::BadFrameLength => write!(
				f,
				"Frame isn't long enough to extract the necessary information"
			),
			Self::EmptyFrame(id) => write!(f, "Frame `{id}` is empty"),
			Self::MissingDataLengthIndicator => write!(
				f,
				"Encountered an encrypted or compressed frame without a data length indicator"
			),
			Self::InvalidUnsynchronisation => write!(f, "Encountered an invalid unsynchronisation"),
			Self::BadTextEncoding(byte) => write!(f, "Found an invalid text encoding ({byte})"),
			Self::V2InvalidTextEncoding => {
				write!(f, "ID3v2.2 only supports Latin-1 and UTF-16 encodings")
			},
			Self::BadPictureFormat(format) => {
				write!(f, "Picture: Found unexpected format \"{format}\"")
			},
			Self::InvalidLanguage(lang) => write!(
				f,
				"Invalid frame language found: {lang:?} (expected 3 ascii characters)"
			),
			Self::TextDecode(message) => write!(f, "Text decoding: {message}"),

			#[cfg(feature = "id3v2_compression_support")]
			Self::Decompression(err) => write!(f, "Failed to decompress frame: {err}"),
			#[cfg(not(feature = "id3v2_compression_support"))]
			Self::CompressedFrameEncountered => write!(
				f,
				"Encountered a compressed ID3v2 frame, support is disabled"
			),
		}
	}
}

/// An error that arises while parsing a tag
pub struct FormatError {
	tag_type: TagType,
	kind: FormatErrorKind,
}

impl FormatError {
	/// Create a `FormatError` from a [`TagType`] and [`FormatErrorKind`]
	#[must_use]
	pub const fn new(tag_type: TagType, kind: FormatErrorKind) -> Self {
		Self { tag_type, kind }
	}

	/// Returns the type of tag that failed to parse
	pub fn tag_type(&self) -> TagType {
		self.tag_type
	}

	/// Returns the [`FormatErrorKind`]
	pub fn kind(&self) -> &FormatErrorKind {
		&self.kind
	}
}

impl Debug for FormatError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{:?}: {:?}", self.tag_type, self.kind)
	}
}

impl Display for FormatError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{:?}: {}", self.tag_type, self.kind)
	}
}

/// The identifier a mismatched payload was given for
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Identifier {
	/// An ID3v2 frame ID
	Frame(FrameId),
	/// The name of an ID3v1 field
	Field(&'static str),
}

impl Display for Identifier {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self {
			Identifier::Frame(id) => write!(f, "{id}"),
			Identifier::Field(name) => f.write_str(name),
		}
	}
}

/// A payload was given to an identifier that declares a different type
pub struct TypeMismatchError {
	identifier: Identifier,
	expected: PayloadKind,
	found: PayloadKind,
}

impl TypeMismatchError {
	/// Create a new `TypeMismatchError`
	#[must_use]
	pub const fn new(identifier: Identifier, expected: PayloadKind, found: PayloadKind) -> Self {
		Self {
			identifier,
			expected,
			found,
		}
	}

	/// The identifier the payload was given for
	pub fn identifier(&self) -> &Identifier {
		&self.identifier
	}

	/// The payload kind the identifier declares
	pub fn expected(&self) -> PayloadKind {
		self.expected
	}

	/// The payload kind that was provided
	pub fn found(&self) -> PayloadKind {
		self.found
	}
}

impl Debug for TypeMismatchError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(
			f,
			"{}: expected {:?}, found {:?}",
			self.identifier, self.expected, self.found
		)
	}
}

impl Display for TypeMismatchError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		// Same kind, different layout (ex. a plain text value given to `TXXX`)
		if self.expected == self.found {
			return write!(
				f,
				"`{}` can not hold a {} payload of this layout",
				self.identifier, self.found
			);
		}

		write!(
			f,
			"`{}` expects a {} payload, found a {} payload",
			self.identifier, self.expected, self.found
		)
	}
}

/// A tag declared a version outside of what is implemented
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct UnsupportedVersionError {
	major: u8,
	revision: u8,
}

impl UnsupportedVersionError {
	/// Create a new `UnsupportedVersionError` from the raw version bytes
	#[must_use]
	pub const fn new(major: u8, revision: u8) -> Self {
		Self { major, revision }
	}

	/// The major version found in the tag header
	pub fn major(&self) -> u8 {
		self.major
	}

	/// The revision found in the tag header
	pub fn revision(&self) -> u8 {
		self.revision
	}
}

impl Display for UnsupportedVersionError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(
			f,
			"Found an unsupported ID3v2 version (v2.{}.{}), expected any major revision in: (2, \
			 3, 4)",
			self.major, self.revision
		)
	}
}

/// Errors that could occur within mp3tag
pub struct Mp3TagError {
	pub(crate) kind: ErrorKind,
}

impl Mp3TagError {
	/// Create an `Mp3TagError` from an [`ErrorKind`]
	///
	/// # Examples
	///
	/// ```rust
	/// use mp3tag::error::{ErrorKind, Mp3TagError};
	///
	/// let too_much_data = Mp3TagError::new(ErrorKind::TooMuchData);
	/// ```
	#[must_use]
	pub const fn new(kind: ErrorKind) -> Self {
		Self { kind }
	}

	/// Returns the [`ErrorKind`]
	///
	/// # Examples
	///
	/// ```rust
	/// use mp3tag::error::{ErrorKind, Mp3TagError};
	///
	/// let too_much_data = Mp3TagError::new(ErrorKind::TooMuchData);
	/// if let ErrorKind::TooMuchData = too_much_data.kind() {
	/// 	println!("That's a big tag!");
	/// }
	/// ```
	pub fn kind(&self) -> &ErrorKind {
		&self.kind
	}

	/// Whether this is a [`ErrorKind::Format`] error
	pub fn is_format_error(&self) -> bool {
		matches!(self.kind, ErrorKind::Format(_))
	}

	/// Whether this is a [`ErrorKind::TypeMismatch`] error
	pub fn is_type_mismatch(&self) -> bool {
		matches!(self.kind, ErrorKind::TypeMismatch(_))
	}
}

impl std::error::Error for Mp3TagError {
	fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
		match self.kind {
			ErrorKind::Io(ref err) => Some(err),
			ErrorKind::TextEncode(ref err) => Some(err),
			_ => None,
		}
	}
}

impl Debug for Mp3TagError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "{:?}", self.kind)
	}
}

impl From<FormatError> for Mp3TagError {
	fn from(input: FormatError) -> Self {
		Self {
			kind: ErrorKind::Format(input),
		}
	}
}

impl From<TypeMismatchError> for Mp3TagError {
	fn from(input: TypeMismatchError) -> Self {
		Self {
			kind: ErrorKind::TypeMismatch(input),
		}
	}
}

impl From<UnsupportedVersionError> for Mp3TagError {
	fn from(input: UnsupportedVersionError) -> Self {
		Self {
			kind: ErrorKind::UnsupportedVersion(input),
		}
	}
}

impl From<TextEncodingError> for Mp3TagError {
	fn from(input: TextEncodingError) -> Self {
		Self {
			kind: ErrorKind::TextEncode(input),
		}
	}
}

impl From<std::io::Error> for Mp3TagError {
	fn from(input: std::io::Error) -> Self {
		Self {
			kind: ErrorKind::Io(input),
		}
	}
}

impl From<tempfile::PersistError> for Mp3TagError {
	fn from(input: tempfile::PersistError) -> Self {
		Self {
			kind: ErrorKind::Io(input.error),
		}
	}
}

impl From<std::collections::TryReserveError> for Mp3TagError {
	fn from(input: TryReserveError) -> Self {
		Self {
			kind: ErrorKind::Alloc(input),
		}
	}
}

impl From<std::convert::Infallible> for Mp3TagError {
	fn from(input: std::convert::Infallible) -> Self {
		Self {
			kind: ErrorKind::Infallible(input),
		}
	}
}

impl Display for Mp3TagError {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		match self.kind {
			// Conversions
			ErrorKind::Io(ref err) => write!(f, "{err}"),
			ErrorKind::Alloc(ref err) => write!(f, "{err}"),

			ErrorKind::Format(ref err) => write!(f, "{err}"),
			ErrorKind::TypeMismatch(ref err) => write!(f, "{err}"),
			ErrorKind::UnsupportedVersion(ref err) => write!(f, "{err}"),
			ErrorKind::TextEncode(ref err) => write!(f, "Text encoding: {err}"),
			ErrorKind::TooMuchData => write!(
				f,
				"Attempted to read/write an abnormally large amount of data"
			),

			ErrorKind::Infallible(_) => write!(f, "A expected condition was not upheld"),
		}
	}
}

