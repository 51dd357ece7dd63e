use super::Mp3File;
use super::read::{Regions, find_regions};
use crate::config::WriteOptions;
use crate::error::Result;
use crate::id3::v1::constants::ID3V1_TAG_SIZE;
use crate::id3::v2::write::create_tag;

use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Read, Seek, SeekFrom, Write};
use std::path::Path;

use tempfile::NamedTempFile;

struct EncodedTags {
	id3v2: Vec<u8>,
	id3v1: Option<[u8; 128]>,
}

pub(super) fn save(file: &Mp3File, write_options: WriteOptions) -> Result<()> {
	let mut original = OpenOptions::new().read(true).write(true).open(&file.path)?;

	// The file is scanned again, in case it changed since it was read
	let regions = find_regions(&mut original)?;

	// Everything is encoded before the file is touched
	let tags = encode_tags(file, regions, write_options)?;

	if write_options.allow_in_place && tags.id3v2.len() as u64 == regions.id3v2_len {
		log::debug!("Writing tags in place");
		return write_in_place(&mut original, regions, &tags);
	}

	log::debug!(
		"Rewriting file, ID3v2 tag size changed ({} -> {})",
		regions.id3v2_len,
		tags.id3v2.len()
	);
	rewrite(&mut original, &file.path, regions, &tags)
}

fn encode_tags(file: &Mp3File, regions: Regions, write_options: WriteOptions) -> Result<EncodedTags> {
	// An empty tag is stripped, unless it already has a region to fill
	let id3v2 = match &file.id3v2_tag {
		Some(tag) if !tag.is_empty() || regions.id3v2_len > 0 => {
			let existing_len = (regions.id3v2_len > 0).then_some(regions.id3v2_len);
			create_tag(tag, existing_len, write_options)?
		},
		_ => Vec::new(),
	};

	let id3v1 = match &file.id3v1_tag {
		Some(tag) if !tag.is_empty() || regions.has_id3v1 => Some(tag.encode(write_options)?),
		_ => None,
	};

	Ok(EncodedTags { id3v2, id3v1 })
}

fn write_in_place(file: &mut File, regions: Regions, tags: &EncodedTags) -> Result<()> {
	file.rewind()?;
	file.write_all(&tags.id3v2)?;

	match (&tags.id3v1, regions.has_id3v1) {
		(Some(id3v1), true) => {
			file.seek(SeekFrom::End(-(ID3V1_TAG_SIZE as i64)))?;
			file.write_all(id3v1)?;
		},
		(Some(id3v1), false) => {
			file.seek(SeekFrom::End(0))?;
			file.write_all(id3v1)?;
		},
		(None, true) => {
			log::trace!("Stripping ID3v1 tag");
			file.set_len(regions.file_len - ID3V1_TAG_SIZE)?;
		},
		(None, false) => {},
	}

	file.flush()?;
	Ok(())
}

// The new file is written next to the original, then renamed over it
fn rewrite(original: &mut File, path: &Path, regions: Regions, tags: &EncodedTags) -> Result<()> {
	let dir = match path.parent() {
		Some(parent) if !parent.as_os_str().is_empty() => parent,
		_ => Path::new("."),
	};

	let mut temp_file = NamedTempFile::new_in(dir)?;

	{
		let mut writer = BufWriter::new(temp_file.as_file_mut());
		writer.write_all(&tags.id3v2)?;

		let audio = regions.audio();
		let audio_len = audio.end - audio.start;

		original.seek(SeekFrom::Start(audio.start))?;
		let copied = std::io::copy(&mut Read::by_ref(original).take(audio_len), &mut writer)?;
		if copied != audio_len {
			return Err(std::io::Error::from(std::io::ErrorKind::UnexpectedEof).into());
		}

		if let Some(id3v1) = &tags.id3v1 {
			writer.write_all(id3v1)?;
		}

		writer.flush()?;
	}

	temp_file
		.as_file()
		.set_permissions(original.metadata()?.permissions())?;

	temp_file.persist(path)?;
	Ok(())
}
