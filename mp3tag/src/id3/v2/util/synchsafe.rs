//! Synchsafe integers and unsynchronised content
//!
//! In an unsynchronised tag or frame every `0xFF` byte that would form a false MPEG sync is
//! followed by an inserted `0x00`. Synchsafe integers only use the lower 7 bits of each byte,
//! for the same reason.

use crate::config::ParsingMode;
use crate::error::Result;
use crate::macros::{err, format_err};

/// An integer that can be converted to and from synchsafe variants
pub(crate) trait SynchsafeInteger: Sized {
	/// Create a synchsafe integer
	///
	/// Errors if `self` doesn't fit in 28 bits.
	fn synch(self) -> Result<Self>;

	/// Convert a synchsafe integer back into a regular integer
	fn unsynch(self) -> Self;
}

impl SynchsafeInteger for u32 {
	fn synch(self) -> Result<Self> {
		// 7 bits are available per byte
		const MAXIMUM_INTEGER: u32 = 0x0FFF_FFFF;

		if self > MAXIMUM_INTEGER {
			err!(TooMuchData);
		}

		Ok((self & 0x7F)
			| ((self & (0x7F << 7)) << 1)
			| ((self & (0x7F << 14)) << 2)
			| ((self & (0x7F << 21)) << 3))
	}

	fn unsynch(self) -> Self {
		((self & 0x7F00_0000) >> 3)
			| ((self & 0x7F_0000) >> 2)
			| ((self & 0x7F00) >> 1)
			| (self & 0x7F)
	}
}

/// Remove the unsynchronisation scheme from `content`
///
/// In [`ParsingMode::Strict`], content that was never unsynchronised (a `0xFF` followed by a
/// byte that could start an MPEG sync) is an error.
pub(crate) fn decode_unsynchronisation(content: &[u8], parse_mode: ParsingMode) -> Result<Vec<u8>> {
	let mut decoded = Vec::new();
	decoded.try_reserve_exact(content.len())?;

	let mut encountered_ff = false;
	for &byte in content {
		if encountered_ff {
			encountered_ff = false;

			// Only skip the next byte if this is valid unsynchronisation
			if byte == 0 {
				continue;
			}

			if byte >= 0xE0 && parse_mode == ParsingMode::Strict {
				return Err(format_err!(Id3v2, InvalidUnsynchronisation));
			}
		}

		decoded.push(byte);
		encountered_ff = byte == 0xFF;
	}

	Ok(decoded)
}

#[cfg(test)]
mod tests {
	use super::{SynchsafeInteger, decode_unsynchronisation};
	use crate::config::ParsingMode;

	const UNSYNCHRONIZED_CONTENT: &[u8] =
		&[0xFF, 0x00, 0x00, 0xFF, 0x12, 0xB0, 0x05, 0xFF, 0x00, 0x00];
	const EXPECTED: &[u8] = &[0xFF, 0x00, 0xFF, 0x12, 0xB0, 0x05, 0xFF, 0x00];

	#[test_log::test]
	fn unsynchronized_content() {
		let decoded = decode_unsynchronisation(UNSYNCHRONIZED_CONTENT, ParsingMode::Strict).unwrap();
		assert_eq!(decoded, EXPECTED);
	}

	#[test_log::test]
	fn unsynchronized_content_should_not_replace_unrelated() {
		const ORIGINAL_CONTENT: &[u8] = &[0xFF, 0x1A, 0xFF, 0x20, 0x10, 0x01];

		let decoded = decode_unsynchronisation(ORIGINAL_CONTENT, ParsingMode::Strict).unwrap();
		assert_eq!(decoded, ORIGINAL_CONTENT);
	}

	#[test_log::test]
	fn false_sync_in_unsynchronized_content() {
		const FALSE_SYNC: &[u8] = &[0x01, 0xFF, 0xE0, 0x02];

		assert!(decode_unsynchronisation(FALSE_SYNC, ParsingMode::Strict).is_err());
		assert_eq!(
			decode_unsynchronisation(FALSE_SYNC, ParsingMode::BestAttempt).unwrap(),
			FALSE_SYNC
		);
	}

	#[test_log::test]
	fn u32_synch() {
		assert_eq!(0x0FFF_FFFF_u32.synch().unwrap(), 0x7F7F_7F7F);
		assert_eq!(257_u32.synch().unwrap(), 0x0201);
		assert!(0x1000_0000_u32.synch().is_err());
	}

	#[test_log::test]
	fn u32_unsynch() {
		assert_eq!(0x7F7F_7F7F_u32.unsynch(), 0x0FFF_FFFF);
		assert_eq!(0x0201_u32.unsynch(), 257);
	}
}
