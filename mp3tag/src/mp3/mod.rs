//! MP3 files
//!
//! An [`Mp3File`] is made up of three regions:
//!
//! * An optional [`Id3v2Tag`] at the start of the file
//! * The audio data, which is never read or modified
//! * An optional [`Id3v1Tag`] in the last 128 bytes of the file

mod read;
mod write;

use crate::config::{ParseOptions, WriteOptions};
use crate::error::Result;
use crate::id3::v1::Id3v1Tag;
use crate::id3::v2::Id3v2Tag;

use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};

/// An MP3 file and its tags
///
/// The tags are read once, and held in memory until [`Mp3File::save`] writes them back.
///
/// # Examples
///
/// ```rust,no_run
/// use mp3tag::config::WriteOptions;
/// use mp3tag::mp3::Mp3File;
/// use mp3tag::tag::Accessor;
///
/// # fn main() -> mp3tag::error::Result<()> {
/// let mut file = Mp3File::open("song.mp3")?;
///
/// let tag = file.get_or_insert_id3v2();
/// tag.set_title(String::from("Foo title"));
///
/// // The ID3v1 tag can't hold everything the ID3v2 tag can, get rid of it
/// file.remove_id3v1();
///
/// file.save(WriteOptions::default())?;
/// # Ok(()) }
/// ```
#[derive(Debug)]
pub struct Mp3File {
	pub(crate) path: PathBuf,
	pub(crate) id3v2_tag: Option<Id3v2Tag>,
	pub(crate) id3v1_tag: Option<Id3v1Tag>,
}

impl Mp3File {
	/// Read the tags of the file at `path`
	///
	/// This uses the default [`ParseOptions`], see [`Mp3File::open_with_options`].
	///
	/// # Errors
	///
	/// See [`Mp3File::open_with_options`]
	pub fn open<P>(path: P) -> Result<Self>
	where
		P: AsRef<Path>,
	{
		Self::open_with_options(path, ParseOptions::default())
	}

	/// Read the tags of the file at `path`
	///
	/// # Errors
	///
	/// * `path` can't be read
	/// * A tag's size doesn't agree with the file's size, or the two tags overlap
	/// * A tag's header is malformed (always an error, regardless of [`ParsingMode`](crate::config::ParsingMode))
	/// * The ID3v2 tag's version isn't supported
	/// * A frame fails to parse, depending on the [`ParsingMode`](crate::config::ParsingMode)
	pub fn open_with_options<P>(path: P, parse_options: ParseOptions) -> Result<Self>
	where
		P: AsRef<Path>,
	{
		let path = path.as_ref();
		log::debug!("Opening {}", path.display());

		let mut reader = BufReader::new(File::open(path)?);
		read::read_from(&mut reader, path.to_path_buf(), parse_options)
	}

	/// The path the file was opened from, and will be saved to
	pub fn path(&self) -> &Path {
		&self.path
	}

	/// Write the tags back to the file
	///
	/// Only the tag regions are rewritten, the audio data is copied as-is.
	///
	/// When the new ID3v2 tag fits in the space of the old one, it is padded to fill it and
	/// the file is modified in place (see [`WriteOptions::allow_in_place`]). Otherwise, the
	/// file is written to a temporary file in the same directory, which is then renamed over
	/// the original.
	///
	/// A tag that was removed is stripped from the file. An empty ID3v2 tag is only kept if the
	/// file already had one, so that its padding can be reused.
	///
	/// # Errors
	///
	/// * The file can't be read or written
	/// * The file changed since it was opened, and is no longer valid
	/// * A tag can't be encoded, see [`WriteOptions`]
	///
	/// If the tags can't be encoded, the file is left untouched.
	pub fn save(&self, write_options: WriteOptions) -> Result<()> {
		write::save(self, write_options)
	}
}

impl Mp3File {
	/// Returns a reference to the ID3v2 tag if it exists
	pub fn id3v2(&self) -> Option<&Id3v2Tag> {
		self.id3v2_tag.as_ref()
	}

	/// Returns a mutable reference to the ID3v2 tag if it exists
	pub fn id3v2_mut(&mut self) -> Option<&mut Id3v2Tag> {
		self.id3v2_tag.as_mut()
	}

	/// Returns the ID3v2 tag, creating an empty `ID3v2.4` tag if there is none
	pub fn get_or_insert_id3v2(&mut self) -> &mut Id3v2Tag {
		self.id3v2_tag.get_or_insert_with(Id3v2Tag::new)
	}

	/// Sets the ID3v2 tag, returning the old one
	pub fn set_id3v2(&mut self, tag: Id3v2Tag) -> Option<Id3v2Tag> {
		self.id3v2_tag.replace(tag)
	}

	/// Removes the ID3v2 tag, it will be stripped from the file on the next save
	pub fn remove_id3v2(&mut self) -> Option<Id3v2Tag> {
		self.id3v2_tag.take()
	}

	/// Returns a reference to the ID3v1 tag if it exists
	pub fn id3v1(&self) -> Option<&Id3v1Tag> {
		self.id3v1_tag.as_ref()
	}

	/// Returns a mutable reference to the ID3v1 tag if it exists
	pub fn id3v1_mut(&mut self) -> Option<&mut Id3v1Tag> {
		self.id3v1_tag.as_mut()
	}

	/// Returns the ID3v1 tag, creating an empty tag if there is none
	pub fn get_or_insert_id3v1(&mut self) -> &mut Id3v1Tag {
		self.id3v1_tag.get_or_insert_with(Id3v1Tag::new)
	}

	/// Sets the ID3v1 tag, returning the old one
	pub fn set_id3v1(&mut self, tag: Id3v1Tag) -> Option<Id3v1Tag> {
		self.id3v1_tag.replace(tag)
	}

	/// Removes the ID3v1 tag, it will be stripped from the file on the next save
	pub fn remove_id3v1(&mut self) -> Option<Id3v1Tag> {
		self.id3v1_tag.take()
	}

	/// Whether the file has any tags
	pub fn contains_tag(&self) -> bool {
		self.id3v2_tag.is_some() || self.id3v1_tag.is_some()
	}
}
