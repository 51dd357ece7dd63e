use crate::error::{Result, UnsupportedVersionError};
use crate::id3::v2::util::synchsafe::SynchsafeInteger;
use crate::macros::format_err;

use std::fmt::{Display, Formatter};

/// The ID3v2 version
#[derive(PartialEq, Eq, Debug, Clone, Copy, Hash)]
pub enum Id3v2Version {
	/// ID3v2.2
	V2,
	/// ID3v2.3
	V3,
	/// ID3v2.4
	V4,
}

impl Id3v2Version {
	/// The major version byte written to the tag header
	pub fn major(self) -> u8 {
		match self {
			Self::V2 => 2,
			Self::V3 => 3,
			Self::V4 => 4,
		}
	}
}

impl Display for Id3v2Version {
	fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
		write!(f, "ID3v2.{}", self.major())
	}
}

// Header flag bits shared by ID3v2.3 and ID3v2.4
const UNSYNCHRONISATION: u8 = 0x80;
const EXTENDED_HEADER: u8 = 0x40;
const EXPERIMENTAL: u8 = 0x20;
const FOOTER: u8 = 0x10;

// ID3v2.2 reuses the extended header bit for compression
const V2_COMPRESSION: u8 = 0x40;

/// Flags that apply to the entire tag
#[derive(Default, Copy, Clone, Debug, PartialEq, Eq)]
#[allow(clippy::struct_excessive_bools)]
pub struct Id3v2TagFlags {
	/// Whether or not all frames are unsynchronised. See [`FrameFlags::unsynchronisation`](crate::id3::v2::FrameFlags::unsynchronisation)
	///
	/// This is only read, mp3tag never writes unsynchronised tags.
	pub unsynchronisation: bool,
	/// Indicates if the tag is in an experimental stage
	pub experimental: bool,
	/// Indicates that the tag includes a footer
	///
	/// A footer will be created if an ID3v2.4 tag is written. A tag with a footer has no padding.
	pub footer: bool,
	/// Whether or not to include a CRC-32 in the extended header
	///
	/// This is calculated if an ID3v2.3 or ID3v2.4 tag is written
	pub crc: bool,
}

impl Id3v2TagFlags {
	/// Get the **ID3v2.4** byte representation of the flags
	///
	/// NOTE: This does not include the extended header flags
	pub fn as_id3v24_byte(&self) -> u8 {
		let mut byte = 0;

		if self.crc {
			byte |= EXTENDED_HEADER;
		}

		if self.experimental {
			byte |= EXPERIMENTAL;
		}

		if self.footer {
			byte |= FOOTER;
		}

		byte
	}

	/// Get the **ID3v2.3** byte representation of the flags
	///
	/// NOTE: This does not include the extended header flags
	pub fn as_id3v23_byte(&self) -> u8 {
		let mut byte = 0;

		if self.crc {
			byte |= EXTENDED_HEADER;
		}

		if self.experimental {
			byte |= EXPERIMENTAL;
		}

		byte
	}
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) struct Id3v2Header {
	pub version: Id3v2Version,
	pub flags: Id3v2TagFlags,
	/// Whether an extended header follows the header
	pub extended_header: bool,
	/// The size of the tag contents (**DOES NOT INCLUDE THE HEADER/FOOTER**)
	pub size: u32,
}

impl Id3v2Header {
	pub(crate) const LEN: u64 = 10;

	/// Parse the 10 byte tag header
	///
	/// The caller is expected to have checked for the "ID3" identifier.
	pub(crate) fn parse(header: [u8; 10]) -> Result<Self> {
		log::debug!("Parsing ID3v2 header");

		// Version is stored as [major, revision], the revision is only of interest for errors.
		let version = match header[3] {
			2 => Id3v2Version::V2,
			3 => Id3v2Version::V3,
			4 => Id3v2Version::V4,
			major => return Err(UnsupportedVersionError::new(major, header[4]).into()),
		};

		if header[4] == 0xFF {
			return Err(UnsupportedVersionError::new(header[3], header[4]).into());
		}

		let flags = header[5];

		// At the time the ID3v2.2 specification was written, a compression scheme wasn't decided.
		// The ID3v2.4 standard recommends just ignoring the tag in this case.
		if version == Id3v2Version::V2 && flags & V2_COMPRESSION == V2_COMPRESSION {
			return Err(format_err!(Id3v2, V2Compression));
		}

		let defined_flags = match version {
			Id3v2Version::V2 => UNSYNCHRONISATION | V2_COMPRESSION,
			Id3v2Version::V3 => UNSYNCHRONISATION | EXTENDED_HEADER | EXPERIMENTAL,
			Id3v2Version::V4 => UNSYNCHRONISATION | EXTENDED_HEADER | EXPERIMENTAL | FOOTER,
		};

		if flags & !defined_flags != 0 {
			return Err(format_err!(Id3v2, BadTagFlags(flags)));
		}

		let size_bytes = [header[6], header[7], header[8], header[9]];
		if size_bytes.iter().any(|b| b & 0x80 != 0) {
			return Err(format_err!(Id3v2, BadTagSize));
		}

		let size = u32::from_be_bytes(size_bytes).unsynch();

		let flags_parsed = Id3v2TagFlags {
			unsynchronisation: flags & UNSYNCHRONISATION == UNSYNCHRONISATION,
			experimental: version != Id3v2Version::V2 && flags & EXPERIMENTAL == EXPERIMENTAL,
			footer: version == Id3v2Version::V4 && flags & FOOTER == FOOTER,
			crc: false, // Retrieved from the extended header if applicable
		};

		Ok(Id3v2Header {
			version,
			flags: flags_parsed,
			extended_header: version != Id3v2Version::V2
				&& flags & EXTENDED_HEADER == EXTENDED_HEADER,
			size,
		})
	}

	/// The total size of the tag, including the header and footer
	pub(crate) fn full_tag_size(&self) -> u64 {
		let footer = if self.flags.footer { Self::LEN } else { 0 };
		Self::LEN + u64::from(self.size) + footer
	}
}
