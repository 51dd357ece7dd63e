// Usage:
// - try_vec![0; size]        -> limited by ParseOptions::DEFAULT_ALLOCATION_LIMIT
// - try_vec![0; size; limit]
macro_rules! try_vec {
	($elem:expr; $size:expr) => {{
		$crate::util::alloc::fallible_vec_from_element(
			$elem,
			$size,
			$crate::config::ParseOptions::DEFAULT_ALLOCATION_LIMIT,
		)?
	}};
	($elem:expr; $size:expr; $limit:expr) => {{
		$crate::util::alloc::fallible_vec_from_element($elem, $size, $limit)?
	}};
}

// Shorthand for return Err(Mp3TagError::new(ErrorKind::Foo))
//
// Usage:
// - err!(Variant)          -> return Err(Mp3TagError::new(ErrorKind::Variant))
// - err!(Variant(Message)) -> return Err(Mp3TagError::new(ErrorKind::Variant(Message)))
macro_rules! err {
	($variant:ident) => {
		return Err(crate::error::Mp3TagError::new(
			crate::error::ErrorKind::$variant,
		))
	};
	($variant:ident($reason:expr)) => {
		return Err(crate::error::Mp3TagError::new(
			crate::error::ErrorKind::$variant($reason),
		))
	};
}

// Shorthand for FormatError::new(TagType::Foo, FormatErrorKind::Bar)
//
// Usage:
//
// - format_err!(Id3v2, BadFrameLength)
// - format_err!(Id3v2, TextDecode("Message"))
//
// or bail:
//
// - format_err!(@BAIL Id3v2, BadFrameLength)
macro_rules! format_err {
	($tag_ty:ident, $kind:ident) => {
		Into::<crate::error::Mp3TagError>::into(crate::error::FormatError::new(
			crate::tag::TagType::$tag_ty,
			crate::error::FormatErrorKind::$kind,
		))
	};
	($tag_ty:ident, $kind:ident($($arg:expr),+)) => {
		Into::<crate::error::Mp3TagError>::into(crate::error::FormatError::new(
			crate::tag::TagType::$tag_ty,
			crate::error::FormatErrorKind::$kind($($arg),+),
		))
	};
	(@BAIL $tag_ty:ident, $kind:ident $(($($arg:expr),+))?) => {
		return Err(format_err!($tag_ty, $kind $(($($arg),+))?))
	};
}

// A macro for handling the different `ParsingMode`s
//
// NOTE: `STRICT` is required. If `RELAXED` or `BESTATTEMPT` are missing they
// 		 fall through to `DEFAULT`.
//
// Usage:
//
// - parse_mode_choice!(
// 		ident_of_parsing_mode,
// 		STRICT: some_expr,
// 		DEFAULT: some_expr,
// 	 )
macro_rules! parse_mode_choice {
	(
		$parse_mode:ident,
		STRICT: $strict_handler:expr,
		$(BESTATTEMPT: $best_attempt_handler:expr,)?
		$(RELAXED: $relaxed_handler:expr,)?
		DEFAULT: $default:expr $(,)?
	) => {
		match $parse_mode {
			crate::config::ParsingMode::Strict => { $strict_handler },
			$(crate::config::ParsingMode::BestAttempt => { $best_attempt_handler },)?
			$(crate::config::ParsingMode::Relaxed => { $relaxed_handler },)?
			#[allow(unreachable_patterns)]
			_ => { $default }
		}
	};
}

pub(crate) use {err, format_err, parse_mode_choice, try_vec};
