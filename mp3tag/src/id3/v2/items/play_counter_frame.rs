use crate::error::Result;
use crate::macros::format_err;

use std::io::Read;

/// An `ID3v2` play counter frame (`PCNT`)
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
pub struct PlayCounterFrame {
	/// The number of times the file has been played
	pub counter: u64,
}

impl PlayCounterFrame {
	/// Create a new [`PlayCounterFrame`]
	pub fn new(counter: u64) -> Self {
		Self { counter }
	}

	/// Read a [`PlayCounterFrame`] from a slice
	///
	/// The counter is at least 4 bytes, and grows a byte at a time when it overflows.
	///
	/// # Errors
	///
	/// * The counter is shorter than 4 bytes, or longer than 8
	pub(crate) fn parse<R>(reader: &mut R) -> Result<Option<Self>>
	where
		R: Read,
	{
		let mut content = Vec::new();
		reader.read_to_end(&mut content)?;

		if content.is_empty() {
			return Ok(None);
		}

		if content.len() < 4 || content.len() > 8 {
			return Err(format_err!(Id3v2, BadFrameLength));
		}

		let counter = content
			.iter()
			.fold(0_u64, |acc, &byte| (acc << 8) | u64::from(byte));

		Ok(Some(Self { counter }))
	}

	/// Convert a [`PlayCounterFrame`] to a byte vec
	pub(crate) fn as_bytes(self) -> Vec<u8> {
		let bytes = self.counter.to_be_bytes();
		let leading_zeros = bytes.iter().take_while(|&&b| b == 0).count().min(4);

		bytes[leading_zeros..].to_vec()
	}
}
