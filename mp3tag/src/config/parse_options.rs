/// The parsing strictness mode
///
/// This can be set with [`ParseOptions::parsing_mode`].
///
/// Tag headers are always validated. A truncated or inconsistent header is an error in
/// every mode, the modes only differ in how individual frames are treated.
///
/// # Examples
///
/// ```rust,no_run
/// use mp3tag::config::{ParseOptions, ParsingMode};
/// use mp3tag::mp3::Mp3File;
///
/// # fn main() -> mp3tag::error::Result<()> {
/// // I want to skip over the frames I can't decode
/// let parsing_mode = ParsingMode::BestAttempt;
/// let parse_options = ParseOptions::new().parsing_mode(parsing_mode);
///
/// let file = Mp3File::open_with_options("foo.mp3", parse_options)?;
/// # Ok(()) }
/// ```
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum ParsingMode {
	/// Will eagerly error on invalid input
	///
	/// This mode will eagerly error on any non-standard input.
	///
	/// ## Examples of behavior
	///
	/// * Unable to decode text - The parser will error and the entire file is discarded
	/// * A frame with an invalid ID - The parser will error and the entire file is discarded
	#[default]
	Strict,
	/// Less eager to error on recoverably malformed input
	///
	/// NOTE: A readable input does *not* necessarily make it writeable.
	///
	/// ## Examples of behavior
	///
	/// * Unable to decode text - The frame is skipped and the parser moves on
	/// * An invalid ID3v1 year - The year is treated as absent
	BestAttempt,
	/// Least eager to error, may produce partial output
	///
	/// ## Examples of behavior
	///
	/// * Unable to decode text - The frame is skipped and the parser moves on
	/// * A frame with an invalid ID - The remainder of the tag is treated as padding
	Relaxed,
}

/// Options to control how mp3tag parses a file
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[non_exhaustive]
pub struct ParseOptions {
	pub(crate) parsing_mode: ParsingMode,
	pub(crate) allocation_limit: usize,
}

impl Default for ParseOptions {
	/// The default implementation for `ParseOptions`
	///
	/// The defaults are as follows:
	///
	/// ```rust,ignore
	/// ParseOptions {
	/// 	parsing_mode: ParsingMode::Strict,
	/// 	allocation_limit: 16 * 1024 * 1024,
	/// }
	/// ```
	fn default() -> Self {
		Self::new()
	}
}

impl ParseOptions {
	/// Default parsing mode
	pub const DEFAULT_PARSING_MODE: ParsingMode = ParsingMode::Strict;

	/// Default allocation limit for any single frame
	pub const DEFAULT_ALLOCATION_LIMIT: usize = 16 * 1024 * 1024;

	/// Creates a new `ParseOptions`, alias for `Default` implementation
	///
	/// See also: [`ParseOptions::default`]
	///
	/// # Examples
	///
	/// ```rust
	/// use mp3tag::config::ParseOptions;
	///
	/// let parsing_options = ParseOptions::new();
	/// ```
	#[must_use]
	pub const fn new() -> Self {
		Self {
			parsing_mode: Self::DEFAULT_PARSING_MODE,
			allocation_limit: Self::DEFAULT_ALLOCATION_LIMIT,
		}
	}

	/// The parsing mode to use, see [`ParsingMode`] for details
	///
	/// # Examples
	///
	/// ```rust
	/// use mp3tag::config::{ParseOptions, ParsingMode};
	///
	/// // By default, `parsing_mode` is ParsingMode::Strict. Here, I'll take whatever I can get.
	/// let parsing_options = ParseOptions::new().parsing_mode(ParsingMode::Relaxed);
	/// ```
	pub fn parsing_mode(&mut self, parsing_mode: ParsingMode) -> Self {
		self.parsing_mode = parsing_mode;
		*self
	}

	/// The maximum number of bytes to allocate for any single frame
	///
	/// Frames declaring a larger size fail with [`ErrorKind::TooMuchData`](crate::error::ErrorKind::TooMuchData).
	///
	/// # Examples
	///
	/// ```rust
	/// use mp3tag::config::ParseOptions;
	///
	/// // I have files with gigantic cover art
	/// let parsing_options = ParseOptions::new().allocation_limit(64 * 1024 * 1024);
	/// ```
	pub fn allocation_limit(&mut self, allocation_limit: usize) -> Self {
		self.allocation_limit = allocation_limit;
		*self
	}
}
