/// Options to control how mp3tag writes to a file
///
/// This is best used as an application global config that gets set once.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub struct WriteOptions {
	pub(crate) preferred_padding: Option<u32>,
	pub(crate) padding_alignment: u32,
	pub(crate) lossy_text_encoding: bool,
	pub(crate) convert_text_encoding: bool,
	pub(crate) allow_in_place: bool,
}

impl WriteOptions {
	/// Default preferred padding size in bytes
	pub const DEFAULT_PREFERRED_PADDING: u32 = 1024;

	/// Default ID3v2 tag size alignment in bytes
	pub const DEFAULT_PADDING_ALIGNMENT: u32 = 2048;

	/// Creates a new `WriteOptions`, alias for `Default` implementation
	///
	/// See also: [`WriteOptions::default`]
	///
	/// # Examples
	///
	/// ```rust
	/// use mp3tag::config::WriteOptions;
	///
	/// let write_options = WriteOptions::new();
	/// ```
	pub const fn new() -> Self {
		Self {
			preferred_padding: Some(Self::DEFAULT_PREFERRED_PADDING),
			padding_alignment: Self::DEFAULT_PADDING_ALIGNMENT,
			lossy_text_encoding: false,
			convert_text_encoding: false,
			allow_in_place: true,
		}
	}

	/// Set the preferred padding size in bytes
	///
	/// When an ID3v2 tag no longer fits in the space it occupied, the file is rewritten and
	/// the new tag gets this much padding, so that later edits can happen in place.
	///
	/// NOTES:
	///
	/// * A tag with a footer never has padding
	/// * The actual padding size may be larger, see [`WriteOptions::padding_alignment`]
	///
	/// # Examples
	///
	/// ```rust
	/// use mp3tag::config::WriteOptions;
	///
	/// // I really don't want my files rewritten, so I'll double the padding size!
	/// let options = WriteOptions::new().preferred_padding(2048);
	///
	/// // ...Or I don't want padding under any circumstances!
	/// let options = WriteOptions::new().preferred_padding(0);
	/// ```
	pub fn preferred_padding(mut self, preferred_padding: u32) -> Self {
		match preferred_padding {
			0 => self.preferred_padding = None,
			_ => self.preferred_padding = Some(preferred_padding),
		}
		self
	}

	/// Round the total size of a padded ID3v2 tag up to a multiple of this value
	///
	/// This only applies when padding is enabled. A value of `0` or `1` disables the rounding.
	///
	/// # Examples
	///
	/// ```rust
	/// use mp3tag::config::WriteOptions;
	///
	/// let options = WriteOptions::new().padding_alignment(4096);
	/// ```
	pub fn padding_alignment(mut self, padding_alignment: u32) -> Self {
		self.padding_alignment = padding_alignment;
		self
	}

	/// Whether to substitute characters that can't be represented in Latin-1
	///
	/// By default, attempting to write a Latin-1 frame containing characters outside of
	/// Latin-1 is an error. With this enabled, those characters are written as `?`.
	///
	/// # Examples
	///
	/// ```rust
	/// use mp3tag::config::WriteOptions;
	///
	/// let options = WriteOptions::new().lossy_text_encoding(true);
	/// ```
	pub fn lossy_text_encoding(mut self, lossy_text_encoding: bool) -> Self {
		self.lossy_text_encoding = lossy_text_encoding;
		self
	}

	/// Whether to convert text encodings the tag version can't hold
	///
	/// UTF-8 and UTF-16BE only exist in ID3v2.4. By default, writing a frame with either
	/// encoding to an ID3v2.2 or ID3v2.3 tag is an error. With this enabled, such frames are
	/// written as UTF-16 instead.
	///
	/// # Examples
	///
	/// ```rust
	/// use mp3tag::config::WriteOptions;
	///
	/// let options = WriteOptions::new().convert_text_encoding(true);
	/// ```
	pub fn convert_text_encoding(mut self, convert_text_encoding: bool) -> Self {
		self.convert_text_encoding = convert_text_encoding;
		self
	}

	/// Whether tags may be written directly into the original file
	///
	/// When the new ID3v2 tag fits the old one's region exactly, the file is modified in
	/// place. With this disabled, every save rewrites the file to a temporary file and renames
	/// it over the original.
	///
	/// # Examples
	///
	/// ```rust
	/// use mp3tag::config::WriteOptions;
	///
	/// // Always go through a temporary file
	/// let options = WriteOptions::new().allow_in_place(false);
	/// ```
	pub fn allow_in_place(mut self, allow_in_place: bool) -> Self {
		self.allow_in_place = allow_in_place;
		self
	}
}

impl Default for WriteOptions {
	/// The default implementation for `WriteOptions`
	///
	/// The defaults are as follows:
	///
	/// ```rust,ignore
	/// WriteOptions {
	/// 	preferred_padding: 1024,
	/// 	padding_alignment: 2048,
	/// 	lossy_text_encoding: false,
	/// 	convert_text_encoding: false,
	/// 	allow_in_place: true,
	/// }
	/// ```
	fn default() -> Self {
		Self::new()
	}
}
