use crate::config::WriteOptions;
use crate::error::Result;
use crate::id3::v2::frame::FrameFlags;
use crate::id3::v2::header::Id3v2Version;
use crate::id3::v2::util::synchsafe::SynchsafeInteger;
use crate::id3::v2::util::upgrade::key_for_version;
use crate::id3::v2::{Frame, FrameValue};
use crate::macros::{err, format_err};

use std::io::Write;

use byteorder::{BigEndian, WriteBytesExt};

// ID3v2.2 frame sizes are 24 bits
const V2_MAX_FRAME_SIZE: u32 = 0x00FF_FFFF;

/// Write every frame that fits in a tag of `version`
///
/// Frames with no counterpart in `version` are discarded.
pub(in crate::id3::v2) fn create_items<'a, W>(
	writer: &mut W,
	frames: impl Iterator<Item = &'a Frame>,
	version: Id3v2Version,
	write_options: WriteOptions,
) -> Result<()>
where
	W: Write,
{
	for frame in frames {
		let Some(id) = key_for_version(frame.id().as_str(), version) else {
			log::warn!("Discarding frame: {}, not supported in {version}", frame.id());
			continue;
		};

		if frame.is_encrypted() {
			if version == Id3v2Version::V2 {
				log::warn!("Discarding encrypted frame: {}, {version} has no frame flags", frame.id());
				continue;
			}

			let FrameValue::Binary(binary) = frame.value() else {
				continue;
			};

			log::trace!("Writing encrypted frame {id} as-is");
			write_encrypted(writer, id, &binary.data, frame.flags(), version)?;
			continue;
		}

		log::trace!("Writing frame {id}");

		let value = frame.value().as_bytes(version, write_options)?;
		write_frame(writer, id, frame.flags().plain(), &value, version)?;
	}

	Ok(())
}

fn write_frame<W>(
	writer: &mut W,
	name: &str,
	flags: FrameFlags,
	value: &[u8],
	version: Id3v2Version,
) -> Result<()>
where
	W: Write,
{
	let len = value.len() as u32;

	let group = match version {
		Id3v2Version::V2 => None,
		_ => flags.grouping_identity,
	};

	write_frame_header(
		writer,
		name,
		if group.is_some() { len + 1 } else { len },
		flags,
		version,
	)?;

	if let Some(group) = group {
		writer.write_u8(group)?;
	}

	writer.write_all(value)?;

	Ok(())
}

// The additional data is written in the order of the flags, as it is read
fn write_encrypted<W>(
	writer: &mut W,
	name: &str,
	value: &[u8],
	flags: FrameFlags,
	version: Id3v2Version,
) -> Result<()>
where
	W: Write,
{
	let Some(method_symbol) = flags.encryption else {
		return write_frame(writer, name, flags, value, version);
	};

	// Only ID3v2.3 compressed frames store a data length indicator, ID3v2.4 requires one
	let data_length_indicator = match (version, flags.data_length_indicator) {
		(Id3v2Version::V4, None) => return Err(format_err!(Id3v2, MissingDataLengthIndicator)),
		(Id3v2Version::V4, Some(len)) => Some(len.synch()?),
		(_, len) if flags.compression => {
			let Some(len) = len else {
				return Err(format_err!(Id3v2, MissingDataLengthIndicator));
			};

			Some(len)
		},
		_ => None,
	};

	let mut extra = Vec::with_capacity(6);
	match version {
		Id3v2Version::V4 => {
			if let Some(group) = flags.grouping_identity {
				extra.push(group);
			}

			extra.push(method_symbol);

			if let Some(len) = data_length_indicator {
				extra.extend(len.to_be_bytes());
			}
		},
		_ => {
			if let Some(len) = data_length_indicator {
				extra.extend(len.to_be_bytes());
			}

			extra.push(method_symbol);

			if let Some(group) = flags.grouping_identity {
				extra.push(group);
			}
		},
	}

	let flags = FrameFlags {
		data_length_indicator: data_length_indicator.and(flags.data_length_indicator),
		unsynchronisation: false,
		..flags
	};

	write_frame_header(
		writer,
		name,
		(extra.len() + value.len()) as u32,
		flags,
		version,
	)?;

	writer.write_all(&extra)?;
	writer.write_all(value)?;

	Ok(())
}

fn write_frame_header<W>(
	writer: &mut W,
	name: &str,
	len: u32,
	flags: FrameFlags,
	version: Id3v2Version,
) -> Result<()>
where
	W: Write,
{
	writer.write_all(name.as_bytes())?;

	match version {
		Id3v2Version::V2 => {
			if len > V2_MAX_FRAME_SIZE {
				err!(TooMuchData);
			}

			writer.write_u24::<BigEndian>(len)?;
		},
		Id3v2Version::V3 => {
			writer.write_u32::<BigEndian>(len)?;
			writer.write_u16::<BigEndian>(flags.as_id3v23_bytes())?;
		},
		Id3v2Version::V4 => {
			writer.write_u32::<BigEndian>(len.synch()?)?;
			writer.write_u16::<BigEndian>(flags.as_id3v24_bytes())?;
		},
	}

	Ok(())
}
