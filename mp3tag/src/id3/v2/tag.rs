
use super::frame::{Frame, FrameFlags, FrameValue, SecondaryKey};
use super::header::{Id3v2TagFlags, Id3v2Version};
use super::items::{
	AttachedPictureFrame, CommentFrame, ExtendedTextFrame, TextInformationFrame, UNKNOWN_LANGUAGE,
};
use super::util::upgrade::{convert_key, key_for_version};
use super::FrameId;
use crate::config::WriteOptions;
use crate::error::Result;
use crate::id3::v1::GENRES;
use crate::macros::format_err;
use crate::tag::{Accessor, TagType};
use crate::util::text::TextEncoding;

use std::borrow::Cow;
use std::io::Write;

const TITLE_ID: FrameId = FrameId::new_unchecked("TIT2");
const ARTIST_ID: FrameId = FrameId::new_unchecked("TPE1");
const ALBUM_ID: FrameId = FrameId::new_unchecked("TALB");
const GENRE_ID: FrameId = FrameId::new_unchecked("TCON");
const TRACK_ID: FrameId = FrameId::new_unchecked("TRCK");
const DISC_ID: FrameId = FrameId::new_unchecked("TPOS");
const COMMENT_ID: FrameId = FrameId::new_unchecked("COMM");
const USER_TEXT_ID: FrameId = FrameId::new_unchecked("TXXX");
// ID3v2.4 merged the date frames into TDRC
const YEAR_ID: FrameId = FrameId::new_unchecked("TYER");
const RECORDING_TIME_ID: FrameId = FrameId::new_unchecked("TDRC");

const NUMBER_PAIR_SEPARATOR: char = '/';

macro_rules! impl_accessor {
	($($name:ident => $id:ident;)+) => {
		paste::paste! {
			$(
				fn $name(&self) -> Option<Cow<'_, str>> {
					self.get_text(&$id).map(Cow::Borrowed)
				}

				fn [<set_ $name>](&mut self, value: String) {
					self.insert_text($id, value);
				}

				fn [<remove_ $name>](&mut self) {
					let _ = self.remove(&$id);
				}
			)+
		}
	}
}

/// An `ID3v2` tag
///
/// The tag is an ordered list of [`Frame`]s. Frames are written in that order.
///
/// ## Frame uniqueness
///
/// Inserting a frame replaces the frame it would collide with, in place:
///
/// * `TXXX`, `WXXX` and `APIC` frames collide when their descriptions match
/// * `COMM` and `USLT` frames collide when their languages and descriptions match
/// * Frames that mp3tag doesn't interpret ([`FrameValue::Binary`]) never collide
/// * Everything else collides on its ID alone
///
/// ## Versions
///
/// A tag is written in its own [`Id3v2Version`]. Frames read from an `ID3v2.2` tag are upgraded
/// to their `ID3v2.3` IDs when possible, and downgraded again when written. To write a tag
/// as another version, see [`Id3v2Tag::set_version`].
///
/// ## [`Accessor`] Methods
///
/// The year is read from `TDRC` or `TYER`, whichever is present, and written to the one
/// matching the tag's version. Track and disc numbers are stored as `"number/total"`.
#[derive(PartialEq, Eq, Debug, Clone)]
pub struct Id3v2Tag {
	flags: Id3v2TagFlags,
	version: Id3v2Version,
	pub(crate) frames: Vec<Frame>,
}

impl IntoIterator for Id3v2Tag {
	type Item = Frame;
	type IntoIter = std::vec::IntoIter<Self::Item>;

	fn into_iter(self) -> Self::IntoIter {
		self.frames.into_iter()
	}
}

impl<'a> IntoIterator for &'a Id3v2Tag {
	type Item = &'a Frame;
	type IntoIter = std::slice::Iter<'a, Frame>;

	fn into_iter(self) -> Self::IntoIter {
		self.frames.iter()
	}
}

impl Default for Id3v2Tag {
	fn default() -> Self {
		Self {
			flags: Id3v2TagFlags::default(),
			version: Id3v2Version::V4,
			frames: Vec::new(),
		}
	}
}

impl Id3v2Tag {
	/// Create a new empty `ID3v2.4` tag
	///
	/// # Examples
	///
	/// ```rust
	/// use mp3tag::id3::v2::{Id3v2Tag, Id3v2Version};
	///
	/// let id3v2_tag = Id3v2Tag::new();
	/// assert!(id3v2_tag.is_empty());
	/// assert_eq!(id3v2_tag.version(), Id3v2Version::V4);
	/// ```
	pub fn new() -> Self {
		Self::default()
	}

	/// Create a new empty tag of `version`
	pub fn with_version(version: Id3v2Version) -> Self {
		Self {
			version,
			..Self::default()
		}
	}

	/// The tag type, always [`TagType::Id3v2`]
	pub fn tag_type(&self) -> TagType {
		TagType::Id3v2
	}

	/// Returns the [`Id3v2TagFlags`]
	pub fn flags(&self) -> &Id3v2TagFlags {
		&self.flags
	}

	/// Restrict the tag's and its frames' abilities
	pub fn set_flags(&mut self, flags: Id3v2TagFlags) {
		self.flags = flags
	}

	/// The version the tag was read as, and will be written as
	pub fn version(&self) -> Id3v2Version {
		self.version
	}

	/// Change the version the tag will be written as
	///
	/// Frame IDs are renamed to their counterparts in `version` (for example `TYER` and `TDRC`).
	/// Frames that `version` can't hold are removed and returned.
	///
	/// # Examples
	///
	/// ```rust
	/// use mp3tag::id3::v2::{FrameId, Id3v2Tag, Id3v2Version, TextInformationFrame};
	/// use mp3tag::TextEncoding;
	///
	/// # fn main() -> mp3tag::error::Result<()> {
	/// let mut tag = Id3v2Tag::with_version(Id3v2Version::V3);
	/// tag.set(FrameId::new("TYER")?, TextInformationFrame::new(TextEncoding::Latin1, "1984"))?;
	/// tag.set(FrameId::new("TDAT")?, TextInformationFrame::new(TextEncoding::Latin1, "0101"))?;
	///
	/// let dropped = tag.set_version(Id3v2Version::V4);
	///
	/// // TYER became TDRC, TDAT doesn't exist in ID3v2.4
	/// assert_eq!(tag.get_text(&FrameId::new("TDRC")?), Some("1984"));
	/// assert_eq!(dropped.len(), 1);
	/// assert_eq!(dropped[0].id().as_str(), "TDAT");
	/// # Ok(()) }
	/// ```
	pub fn set_version(&mut self, version: Id3v2Version) -> Vec<Frame> {
		let from = std::mem::replace(&mut self.version, version);
		if from == version {
			return Vec::new();
		}

		log::debug!("Converting tag from {from} to {version}");

		let mut dropped = Vec::new();
		let mut kept = Vec::with_capacity(self.frames.len());
		for mut frame in std::mem::take(&mut self.frames) {
			let converted = if frame.id.is_outdated() {
				None
			} else {
				convert_key(frame.id.as_str(), from, version)
					.filter(|key| key_for_version(key, version).is_some())
					.and_then(|key| FrameId::new(key.to_owned()).ok())
			};

			match converted {
				Some(id) => {
					frame.id = id;
					kept.push(frame);
				},
				None => {
					log::warn!("Dropping frame {}, it has no counterpart in {version}", frame.id);
					dropped.push(frame);
				},
			}
		}

		self.frames = kept;
		dropped
	}
}

impl Id3v2Tag {
	/// The number of frames in the tag
	pub fn len(&self) -> usize {
		self.frames.len()
	}

	/// Whether the tag has no frames
	pub fn is_empty(&self) -> bool {
		self.frames.is_empty()
	}

	/// Returns an iterator over the frames, in order
	pub fn iter(&self) -> std::slice::Iter<'_, Frame> {
		self.frames.iter()
	}

	/// The frames, in order
	pub fn frames(&self) -> &[Frame] {
		&self.frames
	}

	/// Whether any frame has the ID `id`
	pub fn contains(&self, id: &FrameId) -> bool {
		self.frames.iter().any(|frame| frame.id() == id)
	}

	/// Gets the first [`Frame`] with the ID `id`
	pub fn get(&self, id: &FrameId) -> Option<&Frame> {
		self.frames.iter().find(|frame| frame.id() == id)
	}

	/// Gets a [`Frame`] by its ID and a secondary key
	///
	/// Use this for frames that can appear more than once, such as `TXXX` or `COMM`.
	///
	/// # Examples
	///
	/// ```rust
	/// use mp3tag::id3::v2::{CommentFrame, FrameId, Id3v2Tag, SecondaryKey};
	/// use mp3tag::TextEncoding;
	///
	/// # fn main() -> mp3tag::error::Result<()> {
	/// let comment_id = FrameId::new("COMM")?;
	///
	/// let mut tag = Id3v2Tag::new();
	/// tag.set(
	/// 	comment_id.clone(),
	/// 	CommentFrame::new(TextEncoding::Latin1, *b"eng", "", "English"),
	/// )?;
	/// tag.set(
	/// 	comment_id.clone(),
	/// 	CommentFrame::new(TextEncoding::Latin1, *b"deu", "", "Deutsch"),
	/// )?;
	///
	/// let german = tag.get_by(&comment_id, &SecondaryKey::Language(*b"deu"));
	/// assert!(german.is_some());
	/// assert_eq!(tag.len(), 2);
	/// # Ok(()) }
	/// ```
	pub fn get_by(&self, id: &FrameId, key: &SecondaryKey<'_>) -> Option<&Frame> {
		self.position_by(id, key).map(|pos| &self.frames[pos])
	}

	/// The index of the first [`Frame`] with the ID `id`
	pub fn position(&self, id: &FrameId) -> Option<usize> {
		self.frames.iter().position(|frame| frame.id() == id)
	}

	/// The index of the first [`Frame`] matching `id` and `key`
	pub fn position_by(&self, id: &FrameId, key: &SecondaryKey<'_>) -> Option<usize> {
		self.frames
			.iter()
			.position(|frame| frame.id() == id && frame.matches(key))
	}

	/// Gets the text of a text information frame
	///
	/// NOTE: This will not work for `TXXX` frames, use [`Id3v2Tag::get_user_text`] for that.
	///
	/// NOTE: `ID3v2.4` allows multiple values separated by null characters (`'\0'`), these are
	/// kept as-is.
	pub fn get_text(&self, id: &FrameId) -> Option<&str> {
		match self.get(id).map(Frame::value) {
			Some(FrameValue::Text(TextInformationFrame { value, .. })) => Some(value),
			_ => None,
		}
	}

	/// Gets the content of a `TXXX` frame by its description
	///
	/// # Examples
	///
	/// ```rust
	/// use mp3tag::id3::v2::{ExtendedTextFrame, FrameId, Id3v2Tag};
	/// use mp3tag::TextEncoding;
	///
	/// # fn main() -> mp3tag::error::Result<()> {
	/// let mut tag = Id3v2Tag::new();
	/// tag.set(
	/// 	FrameId::new("TXXX")?,
	/// 	ExtendedTextFrame::new(TextEncoding::UTF8, "MOOD", "Calm"),
	/// )?;
	///
	/// assert_eq!(tag.get_user_text("MOOD"), Some("Calm"));
	/// assert_eq!(tag.get_user_text("OTHER"), None);
	/// # Ok(()) }
	/// ```
	pub fn get_user_text(&self, description: &str) -> Option<&str> {
		match self
			.get_by(&USER_TEXT_ID, &SecondaryKey::Description(description))
			.map(Frame::value)
		{
			Some(FrameValue::UserText(ExtendedTextFrame { content, .. })) => Some(content),
			_ => None,
		}
	}

	/// Returns all `COMM` frames
	pub fn comments(&self) -> impl Iterator<Item = &CommentFrame> {
		self.language_frames("COMM")
	}

	/// Returns all `USLT` frames
	pub fn lyrics(&self) -> impl Iterator<Item = &CommentFrame> {
		self.language_frames("USLT")
	}

	fn language_frames(&self, id: &'static str) -> impl Iterator<Item = &CommentFrame> {
		self.frames
			.iter()
			.filter(move |frame| frame.id().as_str() == id)
			.filter_map(|frame| match frame.value() {
				FrameValue::Comment(comment) => Some(comment),
				_ => None,
			})
	}

	/// Returns all `APIC` frames
	pub fn pictures(&self) -> impl Iterator<Item = &AttachedPictureFrame> {
		self.frames.iter().filter_map(|frame| match frame.value() {
			FrameValue::Picture(picture) => Some(picture),
			_ => None,
		})
	}

	/// Set a frame's value, creating the frame if necessary
	///
	/// See [`Id3v2Tag::insert`].
	///
	/// # Errors
	///
	/// * `value` cannot be held by a frame with `id`, see [`FrameId::payload_kind`]
	/// * See [`Id3v2Tag::insert`]
	///
	/// # Examples
	///
	/// ```rust
	/// use mp3tag::id3::v2::{FrameId, Id3v2Tag, PlayCounterFrame, TextInformationFrame};
	/// use mp3tag::TextEncoding;
	///
	/// # fn main() -> mp3tag::error::Result<()> {
	/// let title_id = FrameId::new("TIT2")?;
	///
	/// let mut tag = Id3v2Tag::new();
	/// tag.set(title_id.clone(), TextInformationFrame::new(TextEncoding::UTF8, "Foo"))?;
	/// assert_eq!(tag.get_text(&title_id), Some("Foo"));
	///
	/// // A title can't be a number
	/// let err = tag.set(title_id.clone(), PlayCounterFrame::new(5)).unwrap_err();
	/// assert!(err.is_type_mismatch());
	/// # Ok(()) }
	/// ```
	pub fn set(&mut self, id: FrameId, value: impl Into<FrameValue>) -> Result<Option<Frame>> {
		self.insert(Frame::new(id, value)?)
	}

	/// Inserts a [`Frame`]
	///
	/// This replaces the frame it collides with (see [Frame uniqueness](Id3v2Tag#frame-uniqueness)),
	/// keeping its position, and returns it. Otherwise, the frame is appended.
	///
	/// # Errors
	///
	/// The frame has a three character `ID3v2.2` ID, and this isn't an `ID3v2.2` tag.
	pub fn insert(&mut self, frame: Frame) -> Result<Option<Frame>> {
		self.verify_id(&frame)?;
		Ok(self.insert_frame(frame))
	}

	/// Inserts a [`Frame`] at `index`, shifting the frames after it
	///
	/// The frame it collides with (see [Frame uniqueness](Id3v2Tag#frame-uniqueness)) is removed
	/// first and returned. `index` is a position in the resulting frame list, an index past the
	/// end appends the frame.
	///
	/// # Errors
	///
	/// See [`Id3v2Tag::insert`]
	///
	/// # Examples
	///
	/// ```rust
	/// use mp3tag::id3::v2::{Frame, FrameId, Id3v2Tag, TextInformationFrame};
	/// use mp3tag::TextEncoding;
	///
	/// # fn main() -> mp3tag::error::Result<()> {
	/// let mut tag = Id3v2Tag::new();
	/// tag.set(FrameId::new("TPE1")?, TextInformationFrame::new(TextEncoding::UTF8, "Foo artist"))?;
	///
	/// let title = Frame::new(
	/// 	FrameId::new("TIT2")?,
	/// 	TextInformationFrame::new(TextEncoding::UTF8, "Foo title"),
	/// )?;
	/// tag.insert_at(0, title)?;
	///
	/// assert_eq!(tag.frames()[0].id().as_str(), "TIT2");
	/// # Ok(()) }
	/// ```
	pub fn insert_at(&mut self, index: usize, frame: Frame) -> Result<Option<Frame>> {
		self.verify_id(&frame)?;

		let replaced = self
			.frames
			.iter()
			.position(|existing| existing.same_slot(&frame))
			.map(|pos| self.frames.remove(pos));

		let index = index.min(self.frames.len());
		self.frames.insert(index, frame);

		Ok(replaced)
	}

	fn verify_id(&self, frame: &Frame) -> Result<()> {
		if frame.id().is_outdated() && self.version != Id3v2Version::V2 {
			return Err(format_err!(
				Id3v2,
				BadFrameId(frame.id().as_str().as_bytes().to_vec())
			));
		}

		Ok(())
	}

	pub(crate) fn insert_frame(&mut self, frame: Frame) -> Option<Frame> {
		match self
			.frames
			.iter_mut()
			.find(|existing| existing.same_slot(&frame))
		{
			Some(existing) => Some(std::mem::replace(existing, frame)),
			None => {
				self.frames.push(frame);
				None
			},
		}
	}

	/// Removes every [`Frame`] with the ID `id`
	///
	/// This is a no-op if there are none.
	///
	/// # Examples
	///
	/// ```rust
	/// use mp3tag::id3::v2::{FrameId, Id3v2Tag, TextInformationFrame};
	/// use mp3tag::TextEncoding;
	///
	/// # fn main() -> mp3tag::error::Result<()> {
	/// let mood_id = FrameId::new("TMOO")?;
	///
	/// let mut tag = Id3v2Tag::new();
	/// tag.set(mood_id.clone(), TextInformationFrame::new(TextEncoding::Latin1, "Calm"))?;
	///
	/// let removed = tag.remove(&mood_id);
	/// assert_eq!(removed.len(), 1);
	/// assert!(tag.is_empty());
	///
	/// assert!(tag.remove(&mood_id).is_empty());
	/// # Ok(()) }
	/// ```
	pub fn remove(&mut self, id: &FrameId) -> Vec<Frame> {
		let (removed, kept) = std::mem::take(&mut self.frames)
			.into_iter()
			.partition(|frame| frame.id() == id);

		self.frames = kept;
		removed
	}

	/// Removes the first [`Frame`] matching `id` and `key`
	///
	/// This is a no-op if there is none.
	pub fn remove_by(&mut self, id: &FrameId, key: &SecondaryKey<'_>) -> Option<Frame> {
		self.position_by(id, key).map(|pos| self.frames.remove(pos))
	}

	/// Removes the [`Frame`] at `index`, shifting the frames after it
	///
	/// Returns `None` if `index` is out of bounds.
	pub fn remove_at(&mut self, index: usize) -> Option<Frame> {
		(index < self.frames.len()).then(|| self.frames.remove(index))
	}

	/// Retains [`Frame`]s by evaluating the predicate
	pub fn retain<P>(&mut self, predicate: P)
	where
		P: FnMut(&Frame) -> bool,
	{
		self.frames.retain(predicate)
	}

	/// Removes every frame
	pub fn clear(&mut self) {
		self.frames.clear();
	}

	/// The track number and total, from `TRCK`
	///
	/// # Examples
	///
	/// ```rust
	/// use mp3tag::id3::v2::Id3v2Tag;
	/// use mp3tag::tag::Accessor;
	///
	/// let mut tag = Id3v2Tag::new();
	/// tag.set_track(3);
	/// assert_eq!(tag.track_pair(), Some((3, None)));
	///
	/// tag.set_track_total(12);
	/// assert_eq!(tag.track_pair(), Some((3, Some(12))));
	/// ```
	pub fn track_pair(&self) -> Option<(u32, Option<u32>)> {
		self.number_pair(&TRACK_ID)
	}

	/// The disc number and total, from `TPOS`
	pub fn disk_pair(&self) -> Option<(u32, Option<u32>)> {
		self.number_pair(&DISC_ID)
	}

	fn number_pair(&self, id: &FrameId) -> Option<(u32, Option<u32>)> {
		let value = self.get_text(id)?;

		let (number, total) = match value.split_once(NUMBER_PAIR_SEPARATOR) {
			Some((number, total)) => (number, total.trim().parse().ok()),
			None => (value, None),
		};

		Some((number.trim().parse().ok()?, total))
	}

	fn insert_number_pair(&mut self, id: FrameId, number: u32, total: Option<u32>) {
		let value = match total {
			Some(total) => format!("{number}{NUMBER_PAIR_SEPARATOR}{total}"),
			None => number.to_string(),
		};

		self.insert_text(id, value);
	}

	// Latin-1 when possible, otherwise the best Unicode encoding of the version
	fn text_encoding_for(&self, text: &str) -> TextEncoding {
		if TextEncoding::verify_latin1(text) {
			TextEncoding::Latin1
		} else if self.version == Id3v2Version::V4 {
			TextEncoding::UTF8
		} else {
			TextEncoding::UTF16
		}
	}

	fn insert_text(&mut self, id: FrameId, value: String) {
		let encoding = self.text_encoding_for(&value);
		let frame = Frame::new_unchecked(
			id,
			FrameFlags::default(),
			FrameValue::Text(TextInformationFrame::new(encoding, value)),
		);

		let _ = self.insert_frame(frame);
	}

	fn year_id(&self) -> FrameId {
		match self.version {
			Id3v2Version::V4 => RECORDING_TIME_ID,
			_ => YEAR_ID,
		}
	}

	/// Write the tag to `writer`
	///
	/// The tag is padded according to `write_options`, see [`WriteOptions::preferred_padding`].
	///
	/// # Errors
	///
	/// * A frame can't be encoded, see [`WriteOptions::lossy_text_encoding`] and
	///   [`WriteOptions::convert_text_encoding`]
	/// * The tag is too large
	/// * [`std::io::Error`]
	pub fn dump_to<W: Write>(&self, writer: &mut W, write_options: WriteOptions) -> Result<()> {
		let encoded = super::write::create_tag(self, None, write_options)?;
		writer.write_all(&encoded)?;

		Ok(())
	}
}

// "(13)", "(13)Pop" and "13" all refer to an ID3v1 genre
fn resolve_genre(value: &str) -> &str {
	if let Some((index, refinement)) = value
		.strip_prefix('(')
		.and_then(|rest| rest.split_once(')'))
	{
		if !refinement.is_empty() {
			return refinement;
		}

		return genre_by_index(index).unwrap_or(value);
	}

	genre_by_index(value).unwrap_or(value)
}

fn genre_by_index(index: &str) -> Option<&'static str> {
	let index = index.parse::<u8>().ok()?;
	GENRES.get(usize::from(index)).copied()
}

impl Accessor for Id3v2Tag {
	impl_accessor!(
		title  => TITLE_ID;
		artist => ARTIST_ID;
		album  => ALBUM_ID;
	);

	fn genre(&self) -> Option<Cow<'_, str>> {
		self.get_text(&GENRE_ID)
			.map(|value| Cow::Borrowed(resolve_genre(value)))
	}

	fn set_genre(&mut self, value: String) {
		self.insert_text(GENRE_ID, value);
	}

	fn remove_genre(&mut self) {
		let _ = self.remove(&GENRE_ID);
	}

	fn track(&self) -> Option<u32> {
		self.track_pair().map(|(number, _)| number)
	}

	fn set_track(&mut self, value: u32) {
		let total = self.track_total();
		self.insert_number_pair(TRACK_ID, value, total);
	}

	fn remove_track(&mut self) {
		let _ = self.remove(&TRACK_ID);
	}

	fn track_total(&self) -> Option<u32> {
		self.track_pair().and_then(|(_, total)| total)
	}

	fn set_track_total(&mut self, value: u32) {
		let number = self.track().unwrap_or(0);
		self.insert_number_pair(TRACK_ID, number, Some(value));
	}

	fn remove_track_total(&mut self) {
		if let Some(number) = self.track() {
			self.insert_number_pair(TRACK_ID, number, None);
		}
	}

	fn disk(&self) -> Option<u32> {
		self.disk_pair().map(|(number, _)| number)
	}

	fn set_disk(&mut self, value: u32) {
		let total = self.disk_total();
		self.insert_number_pair(DISC_ID, value, total);
	}

	fn remove_disk(&mut self) {
		let _ = self.remove(&DISC_ID);
	}

	fn disk_total(&self) -> Option<u32> {
		self.disk_pair().and_then(|(_, total)| total)
	}

	fn set_disk_total(&mut self, value: u32) {
		let number = self.disk().unwrap_or(0);
		self.insert_number_pair(DISC_ID, number, Some(value));
	}

	fn remove_disk_total(&mut self) {
		if let Some(number) = self.disk() {
			self.insert_number_pair(DISC_ID, number, None);
		}
	}

	fn year(&self) -> Option<u32> {
		let value = self
			.get_text(&RECORDING_TIME_ID)
			.or_else(|| self.get_text(&YEAR_ID))?;

		// TDRC is a timestamp, only the year is of interest
		value.get(..4)?.parse().ok()
	}

	fn set_year(&mut self, value: u32) {
		let _ = self.remove(&RECORDING_TIME_ID);
		let _ = self.remove(&YEAR_ID);

		let id = self.year_id();
		self.insert_text(id, value.to_string());
	}

	fn remove_year(&mut self) {
		let _ = self.remove(&RECORDING_TIME_ID);
		let _ = self.remove(&YEAR_ID);
	}

	fn comment(&self) -> Option<Cow<'_, str>> {
		self.comments()
			.find(|comment| comment.description.is_empty())
			.map(|comment| Cow::Borrowed(comment.content.as_str()))
	}

	fn set_comment(&mut self, value: String) {
		let language = self
			.comments()
			.find(|comment| comment.description.is_empty())
			.map_or(UNKNOWN_LANGUAGE, |comment| comment.language);

		let encoding = self.text_encoding_for(&value);
		let frame = Frame::new_unchecked(
			COMMENT_ID,
			FrameFlags::default(),
			FrameValue::Comment(CommentFrame::new(encoding, language, "", value)),
		);

		let _ = self.insert_frame(frame);
	}

	fn remove_comment(&mut self) {
		self.frames.retain(|frame| {
			frame.id() != &COMMENT_ID || frame.value().description() != Some("")
		})
	}
}
