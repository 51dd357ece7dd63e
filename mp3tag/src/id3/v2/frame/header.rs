use crate::error::Result;
use crate::id3::v2::registry::{self, FrameInfo, FrameLayout};
use crate::macros::format_err;
use crate::tag::PayloadKind;

use std::borrow::Cow;
use std::fmt::{Display, Formatter};

/// An `ID3v2` frame ID
///
/// IDs are always four characters, with the exception of `ID3v2.2` IDs that have no
/// four character counterpart. Those are three characters, and can only be written back
/// to an `ID3v2.2` tag.
#[derive(PartialEq, Clone, Debug, Eq, Hash, PartialOrd, Ord)]
pub struct FrameId(Cow<'static, str>);

impl FrameId {
	/// Attempts to create a `FrameId` from an ID string
	///
	/// NOTE: This will not upgrade IDs.
	///
	/// # Errors
	///
	/// * `id` contains invalid characters (must be 'A'..='Z' and '0'..='9')
	/// * `id` is an invalid length (must be 3 or 4)
	///
	/// # Examples
	///
	/// ```rust
	/// use mp3tag::id3::v2::FrameId;
	///
	/// # fn main() -> mp3tag::error::Result<()> {
	/// let title = FrameId::new("TIT2")?;
	/// assert_eq!(title.as_str(), "TIT2");
	///
	/// assert!(FrameId::new("tit2").is_err());
	/// assert!(FrameId::new("TITLE").is_err());
	/// # Ok(()) }
	/// ```
	pub fn new<I>(id: I) -> Result<Self>
	where
		I: Into<Cow<'static, str>>,
	{
		Self::new_cow(id.into())
	}

	fn new_cow(id: Cow<'static, str>) -> Result<Self> {
		if !Self::is_valid_id(id.as_bytes()) {
			return Err(format_err!(Id3v2, BadFrameId(id.into_owned().into_bytes())));
		}

		Ok(Self(id))
	}

	/// Create a `FrameId` without verifying it
	///
	/// The ID **must** be 3 or 4 characters within 'A'..='Z' and '0'..='9'.
	pub const fn new_unchecked(id: &'static str) -> Self {
		Self(Cow::Borrowed(id))
	}

	pub(crate) fn is_valid_id(id: &[u8]) -> bool {
		(id.len() == 3 || id.len() == 4)
			&& id
				.iter()
				.all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
	}

	/// Resolve a shorthand field name, such as `"title"` or `"leadartist"`
	///
	/// Names are case-sensitive. Renamed frames resolve to their `ID3v2.3` ID, for
	/// example `"year"` is `TYER`, see [`Id3v2Tag::set_version`](crate::id3::v2::Id3v2Tag::set_version).
	///
	/// # Examples
	///
	/// ```rust
	/// use mp3tag::id3::v2::FrameId;
	///
	/// assert_eq!(FrameId::from_name("title").unwrap().as_str(), "TIT2");
	/// assert_eq!(FrameId::from_name("artist"), FrameId::from_name("leadartist"));
	/// assert!(FrameId::from_name("unknown").is_none());
	/// ```
	pub fn from_name(name: &str) -> Option<Self> {
		registry::frame_info_by_name(name).map(|info| Self::new_unchecked(info.id))
	}

	/// Whether this is an `ID3v2.2` ID with no four character counterpart
	///
	/// These are only written to `ID3v2.2` tags.
	pub fn is_outdated(&self) -> bool {
		self.0.len() == 3
	}

	/// Extracts the string from the ID
	pub fn as_str(&self) -> &str {
		&self.0
	}

	/// The registry entry for this ID, if it is a known frame
	pub fn info(&self) -> Option<&'static FrameInfo> {
		if self.is_outdated() {
			return None;
		}

		registry::frame_info(&self.0)
	}

	/// The kind of payload a frame with this ID holds
	///
	/// # Examples
	///
	/// ```rust
	/// use mp3tag::id3::v2::FrameId;
	/// use mp3tag::tag::PayloadKind;
	///
	/// # fn main() -> mp3tag::error::Result<()> {
	/// assert_eq!(FrameId::new("TALB")?.payload_kind(), PayloadKind::Text);
	/// assert_eq!(FrameId::new("APIC")?.payload_kind(), PayloadKind::Binary);
	/// assert_eq!(FrameId::new("PCNT")?.payload_kind(), PayloadKind::Integer);
	///
	/// // Unknown IDs are classified by their prefix
	/// assert_eq!(FrameId::new("TZZZ")?.payload_kind(), PayloadKind::Text);
	/// assert_eq!(FrameId::new("ZZZZ")?.payload_kind(), PayloadKind::Binary);
	/// # Ok(()) }
	/// ```
	pub fn payload_kind(&self) -> PayloadKind {
		self.layout().kind()
	}

	pub(crate) fn layout(&self) -> FrameLayout {
		registry::frame_layout(&self.0)
	}
}

impl Display for FrameId {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.as_str())
	}
}

impl AsRef<str> for FrameId {
	fn as_ref(&self) -> &str {
		self.as_str()
	}
}
