use crate::error::{Identifier, Result, TypeMismatchError};
use crate::id3::v1::constants::GENRES;
use crate::macros::err;
use crate::tag::{Accessor, PayloadKind, TagType};

use std::borrow::Cow;
use std::fmt::{Display, Formatter};
use std::str::FromStr;

macro_rules! impl_accessor {
	($($name:ident,)+) => {
		paste::paste! {
			$(
				fn $name(&self) -> Option<Cow<'_, str>> {
					self.$name.as_deref().map(Cow::Borrowed)
				}

				fn [<set_ $name>](&mut self, value: String) {
					self.$name = non_empty(value)
				}

				fn [<remove_ $name>](&mut self) {
					self.$name = None
				}
			)+
		}
	}
}

// Empty fields encode the same as absent ones
fn non_empty(text: String) -> Option<String> {
	(!text.is_empty()).then_some(text)
}

/// The ID3v1 revision
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Id3v1Version {
	/// ID3v1.0, a 30 byte comment and no track number
	V1_0,
	/// ID3v1.1, a 28 byte comment followed by a NUL and a track number
	V1_1,
}

/// The fields of an ID3v1 tag
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Id3v1Field {
	/// Track title
	Title,
	/// Track artist
	Artist,
	/// Album title
	Album,
	/// Release year
	Year,
	/// A short comment
	Comment,
	/// Track number
	Track,
	/// Genre
	Genre,
}

impl Id3v1Field {
	/// All fields, in the order they are stored
	pub const ALL: [Id3v1Field; 7] = [
		Id3v1Field::Title,
		Id3v1Field::Artist,
		Id3v1Field::Album,
		Id3v1Field::Year,
		Id3v1Field::Comment,
		Id3v1Field::Track,
		Id3v1Field::Genre,
	];

	/// The field's name, as accepted by [`FromStr`]
	pub fn name(self) -> &'static str {
		match self {
			Id3v1Field::Title => "title",
			Id3v1Field::Artist => "artist",
			Id3v1Field::Album => "album",
			Id3v1Field::Year => "year",
			Id3v1Field::Comment => "comment",
			Id3v1Field::Track => "track",
			Id3v1Field::Genre => "genre",
		}
	}

	/// The kind of payload the field holds
	///
	/// NOTE: [`Id3v1Field::Genre`] is a [`PayloadKind::Text`] field, but will also accept an
	/// [`Id3v1Value::Integer`] as a raw index into [`GENRES`].
	pub fn payload_kind(self) -> PayloadKind {
		match self {
			Id3v1Field::Year | Id3v1Field::Track => PayloadKind::Integer,
			_ => PayloadKind::Text,
		}
	}
}

impl Display for Id3v1Field {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		f.write_str(self.name())
	}
}

impl FromStr for Id3v1Field {
	type Err = ();

	/// Parse a field name
	///
	/// # Examples
	///
	/// ```rust
	/// use mp3tag::id3::v1::Id3v1Field;
	///
	/// assert_eq!("title".parse(), Ok(Id3v1Field::Title));
	/// assert!("TIT2".parse::<Id3v1Field>().is_err());
	/// ```
	fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
		Id3v1Field::ALL
			.into_iter()
			.find(|field| field.name() == s)
			.ok_or(())
	}
}

/// The value of an ID3v1 field
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub enum Id3v1Value {
	/// A text value
	Text(String),
	/// An integer value
	Integer(u32),
}

impl Id3v1Value {
	/// The kind of payload this value holds
	pub fn payload_kind(&self) -> PayloadKind {
		match self {
			Id3v1Value::Text(_) => PayloadKind::Text,
			Id3v1Value::Integer(_) => PayloadKind::Integer,
		}
	}

	/// The text, if this is a [`Id3v1Value::Text`]
	pub fn text(&self) -> Option<&str> {
		match self {
			Id3v1Value::Text(text) => Some(text),
			Id3v1Value::Integer(_) => None,
		}
	}

	/// The integer, if this is an [`Id3v1Value::Integer`]
	pub fn integer(&self) -> Option<u32> {
		match self {
			Id3v1Value::Integer(integer) => Some(*integer),
			Id3v1Value::Text(_) => None,
		}
	}
}

impl From<String> for Id3v1Value {
	fn from(value: String) -> Self {
		Id3v1Value::Text(value)
	}
}

impl From<&str> for Id3v1Value {
	fn from(value: &str) -> Self {
		Id3v1Value::Text(value.to_owned())
	}
}

impl From<u32> for Id3v1Value {
	fn from(value: u32) -> Self {
		Id3v1Value::Integer(value)
	}
}

/// An ID3v1 tag
///
/// ID3v1 is a severely limited format, with each field being incredibly small in size. All
/// fields have been commented with their maximum sizes and any other additional restrictions.
///
/// Attempting to write a field greater than the maximum size will **not** error, it will just
/// be shrunk.
#[derive(Default, Debug, PartialEq, Eq, Clone)]
pub struct Id3v1Tag {
	/// Track title, 30 bytes max
	pub title: Option<String>,
	/// Track artist, 30 bytes max
	pub artist: Option<String>,
	/// Album title, 30 bytes max
	pub album: Option<String>,
	/// Release year (max 9999)
	pub year: Option<u16>,
	/// A short comment
	///
	/// An ID3v1.0 tag has 30 bytes available, an ID3v1.1 tag (one with a track number) only
	/// has 28.
	pub comment: Option<String>,
	/// The track number, 1 byte max
	///
	/// The track number **cannot** be 0. Readers look for a null byte at the end of the comment
	/// to differentiate between ID3v1.0 and ID3v1.1.
	pub track_number: Option<u8>,
	/// The track's genre, 1 byte max
	///
	/// This byte is an index into [`GENRES`](crate::id3::v1::GENRES).
	pub genre: Option<u8>,
}

impl Id3v1Tag {
	/// Create a new empty `Id3v1Tag`
	///
	/// # Examples
	///
	/// ```rust
	/// use mp3tag::id3::v1::Id3v1Tag;
	///
	/// let id3v1_tag = Id3v1Tag::new();
	/// assert!(id3v1_tag.is_empty());
	/// ```
	pub fn new() -> Self {
		Self::default()
	}

	/// The tag type, always [`TagType::Id3v1`]
	pub fn tag_type(&self) -> TagType {
		TagType::Id3v1
	}

	/// The revision this tag is written as
	///
	/// A tag with a track number is an ID3v1.1 tag.
	pub fn version(&self) -> Id3v1Version {
		if self.track_number.is_some() {
			Id3v1Version::V1_1
		} else {
			Id3v1Version::V1_0
		}
	}

	/// The number of fields that are set
	pub fn len(&self) -> usize {
		Id3v1Field::ALL
			.into_iter()
			.filter(|field| self.contains(*field))
			.count()
	}

	/// Whether the tag has no fields set
	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	/// Whether `field` is set
	pub fn contains(&self, field: Id3v1Field) -> bool {
		match field {
			Id3v1Field::Title => self.title.is_some(),
			Id3v1Field::Artist => self.artist.is_some(),
			Id3v1Field::Album => self.album.is_some(),
			Id3v1Field::Year => self.year.is_some(),
			Id3v1Field::Comment => self.comment.is_some(),
			Id3v1Field::Track => self.track_number.is_some(),
			Id3v1Field::Genre => self.genre.is_some(),
		}
	}

	/// Get the value of a field
	///
	/// The genre is returned as its name from [`GENRES`].
	///
	/// # Examples
	///
	/// ```rust
	/// use mp3tag::id3::v1::{Id3v1Field, Id3v1Tag, Id3v1Value};
	///
	/// let mut tag = Id3v1Tag::new();
	/// tag.genre = Some(13);
	///
	/// assert_eq!(
	/// 	tag.get(Id3v1Field::Genre),
	/// 	Some(Id3v1Value::Text(String::from("Pop")))
	/// );
	/// assert_eq!(tag.get(Id3v1Field::Track), None);
	/// ```
	pub fn get(&self, field: Id3v1Field) -> Option<Id3v1Value> {
		match field {
			Id3v1Field::Title => self.title.clone().map(Id3v1Value::Text),
			Id3v1Field::Artist => self.artist.clone().map(Id3v1Value::Text),
			Id3v1Field::Album => self.album.clone().map(Id3v1Value::Text),
			Id3v1Field::Comment => self.comment.clone().map(Id3v1Value::Text),
			Id3v1Field::Year => self.year.map(|year| Id3v1Value::Integer(u32::from(year))),
			Id3v1Field::Track => self
				.track_number
				.map(|track| Id3v1Value::Integer(u32::from(track))),
			Id3v1Field::Genre => self
				.genre
				.and_then(|index| GENRES.get(usize::from(index)))
				.map(|genre| Id3v1Value::Text((*genre).to_owned())),
		}
	}

	/// Set the value of a field
	///
	/// Text is not truncated here, oversized fields are shrunk when the tag is written.
	///
	/// A genre name is looked up in [`GENRES`] (ignoring case), a name that isn't in the table
	/// leaves the tag without a genre. A genre can also be set by its index.
	///
	/// # Errors
	///
	/// * `value` is of a different kind than the field, see [`Id3v1Field::payload_kind`]
	/// * The year is above 9999, or the track number or genre index is above 255
	///
	/// # Examples
	///
	/// ```rust
	/// use mp3tag::id3::v1::{Id3v1Field, Id3v1Tag};
	///
	/// # fn main() -> mp3tag::error::Result<()> {
	/// let mut tag = Id3v1Tag::new();
	///
	/// tag.set(Id3v1Field::Title, "Foo title".into())?;
	/// tag.set(Id3v1Field::Genre, "jazz".into())?;
	/// assert_eq!(tag.genre, Some(8));
	///
	/// // A track number is not text
	/// assert!(tag.set(Id3v1Field::Track, "1".into()).is_err());
	/// # Ok(()) }
	/// ```
	pub fn set(&mut self, field: Id3v1Field, value: Id3v1Value) -> Result<()> {
		match (field, value) {
			(Id3v1Field::Title, Id3v1Value::Text(text)) => self.title = non_empty(text),
			(Id3v1Field::Artist, Id3v1Value::Text(text)) => self.artist = non_empty(text),
			(Id3v1Field::Album, Id3v1Value::Text(text)) => self.album = non_empty(text),
			(Id3v1Field::Comment, Id3v1Value::Text(text)) => self.comment = non_empty(text),
			(Id3v1Field::Genre, Id3v1Value::Text(text)) => self.genre = genre_index(&text),
			(Id3v1Field::Genre, Id3v1Value::Integer(index)) => {
				let Ok(index) = u8::try_from(index) else {
					err!(TooMuchData);
				};

				if usize::from(index) >= GENRES.len() {
					log::warn!("Genre index {index} is not in the genre table, removing genre");
					self.genre = None;
					return Ok(());
				}

				self.genre = Some(index);
			},
			(Id3v1Field::Year, Id3v1Value::Integer(year)) => {
				if year > 9999 {
					err!(TooMuchData);
				}

				self.year = Some(year as u16);
			},
			(Id3v1Field::Track, Id3v1Value::Integer(track)) => {
				let Ok(track) = u8::try_from(track) else {
					err!(TooMuchData);
				};

				// A zero track number is indistinguishable from an ID3v1.0 comment
				self.track_number = (track != 0).then_some(track);
			},
			(field, value) => {
				return Err(TypeMismatchError::new(
					Identifier::Field(field.name()),
					field.payload_kind(),
					value.payload_kind(),
				)
				.into());
			},
		}

		Ok(())
	}

	/// Remove a field, returning its previous value
	///
	/// This is a no-op if the field isn't set.
	pub fn remove(&mut self, field: Id3v1Field) -> Option<Id3v1Value> {
		let value = self.get(field);
		match field {
			Id3v1Field::Title => self.title = None,
			Id3v1Field::Artist => self.artist = None,
			Id3v1Field::Album => self.album = None,
			Id3v1Field::Year => self.year = None,
			Id3v1Field::Comment => self.comment = None,
			Id3v1Field::Track => self.track_number = None,
			Id3v1Field::Genre => self.genre = None,
		}

		value
	}

	/// Remove every field
	pub fn clear(&mut self) {
		*self = Self::default();
	}
}

fn genre_index(name: &str) -> Option<u8> {
	let index = GENRES
		.iter()
		.position(|genre| genre.eq_ignore_ascii_case(name))
		.map(|index| index as u8);

	if index.is_none() {
		log::warn!("\"{name}\" is not in the genre table, removing genre");
	}

	index
}

impl Accessor for Id3v1Tag {
	impl_accessor!(title, artist, album, comment,);

	fn genre(&self) -> Option<Cow<'_, str>> {
		self.genre
			.and_then(|index| GENRES.get(usize::from(index)))
			.map(|genre| Cow::Borrowed(*genre))
	}

	fn set_genre(&mut self, genre: String) {
		self.genre = genre_index(&genre);
	}

	fn remove_genre(&mut self) {
		self.genre = None
	}

	fn track(&self) -> Option<u32> {
		self.track_number.map(u32::from)
	}

	fn set_track(&mut self, value: u32) {
		if let Ok(track) = u8::try_from(value) {
			self.track_number = (track != 0).then_some(track);
		}
	}

	fn remove_track(&mut self) {
		self.track_number = None;
	}

	fn year(&self) -> Option<u32> {
		self.year.map(u32::from)
	}

	fn set_year(&mut self, value: u32) {
		if let Ok(year) = u16::try_from(value) {
			if year <= 9999 {
				self.year = Some(year);
			}
		}
	}

	fn remove_year(&mut self) {
		self.year = None;
	}
}
