use std::path::{Path, PathBuf};

use tempfile::TempDir;

/// Fake MPEG audio, starting with a frame sync
pub const AUDIO: &[u8] = &[
	0xFF, 0xFB, 0x90, 0x64, 0x00, 0x0F, 0xF0, 0x00, 0x00, 0x69, 0x00, 0x00, 0x00, 0x08, 0x00, 0x00,
	0x0D, 0x20, 0x00, 0x00, 0x01, 0x00, 0x00, 0x01, 0xA4, 0x00, 0x00, 0x00, 0x20, 0x00, 0x00, 0x34,
];

/// An ID3v2.3 tag with a title ("Foo title") and an artist ("Bar artist"), with 64 bytes of padding
pub fn id3v2_3() -> Vec<u8> {
	let mut frames = Vec::new();
	frames.extend(v3_frame(b"TIT2", b"\x00Foo title"));
	frames.extend(v3_frame(b"TPE1", b"\x00Bar artist"));
	frames.extend([0; 64]);

	id3v2_header(3, 0, frames)
}

/// An ID3v2.2 tag with a title ("Foo title") and an artist ("Bar artist"), with 32 bytes of padding
pub fn id3v2_2() -> Vec<u8> {
	let mut frames = Vec::new();
	frames.extend(v2_frame(b"TT2", b"\x00Foo title"));
	frames.extend(v2_frame(b"TP1", b"\x00Bar artist"));
	frames.extend([0; 32]);

	id3v2_header(2, 0, frames)
}

/// An unsynchronised ID3v2.3 tag with a Latin-1 title ("\u{FF}oo") and 16 bytes of padding
pub fn id3v2_3_unsynchronised() -> Vec<u8> {
	let mut frames = v3_frame(b"TIT2", b"\x00\xFFoo");
	frames.extend([0; 16]);

	let mut unsynchronised = Vec::with_capacity(frames.len() + 1);
	for byte in frames {
		unsynchronised.push(byte);
		if byte == 0xFF {
			unsynchronised.push(0);
		}
	}

	id3v2_header(3, 0x80, unsynchronised)
}

/// An ID3v2.3 tag with a big endian UTF-16 title ("Foo") and 16 bytes of padding
pub fn id3v2_3_utf16_be() -> Vec<u8> {
	let mut frames = v3_frame(b"TIT2", b"\x01\xFE\xFF\x00F\x00o\x00o");
	frames.extend([0; 16]);

	id3v2_header(3, 0, frames)
}

/// An ID3v2.4 tag with a UTF-8 album ("Baz album") and no padding
pub fn id3v2_4() -> Vec<u8> {
	let mut content = vec![3];
	content.extend(b"Baz album");

	let mut frames = b"TALB".to_vec();
	frames.extend((content.len() as u32).to_be_bytes());
	frames.extend([0, 0]);
	frames.extend(content);

	id3v2_header(4, 0, frames)
}

fn v2_frame(id: &[u8; 3], content: &[u8]) -> Vec<u8> {
	let mut frame = id.to_vec();
	frame.extend(&(content.len() as u32).to_be_bytes()[1..]);
	frame.extend(content);
	frame
}

fn v3_frame(id: &[u8; 4], content: &[u8]) -> Vec<u8> {
	let mut frame = id.to_vec();
	frame.extend((content.len() as u32).to_be_bytes());
	frame.extend([0, 0]);
	frame.extend(content);
	frame
}

fn id3v2_header(version: u8, flags: u8, body: Vec<u8>) -> Vec<u8> {
	let size = body.len() as u32;
	assert!(size < 0x80 * 0x80, "test tags are small");

	let mut tag = b"ID3".to_vec();
	tag.extend([version, 0, flags]);
	tag.extend([0, 0, (size >> 7) as u8, (size & 0x7F) as u8]);
	tag.extend(body);
	tag
}

/// An ID3v1.1 tag: title "Song", artist "Artist", year 2001, track 5, genre 12 ("Other")
pub fn id3v1() -> [u8; 128] {
	let mut tag = [0; 128];
	tag[..3].copy_from_slice(b"TAG");
	tag[3..7].copy_from_slice(b"Song");
	tag[33..39].copy_from_slice(b"Artist");
	tag[93..97].copy_from_slice(b"2001");
	tag[126] = 5;
	tag[127] = 12;
	tag
}

/// A file in its own temporary directory, removed on drop
pub struct TempMp3 {
	_dir: TempDir,
	path: PathBuf,
}

impl TempMp3 {
	pub fn new(content: &[u8]) -> Self {
		let dir = tempfile::tempdir().unwrap();
		let path = dir.path().join("test.mp3");
		std::fs::write(&path, content).unwrap();

		Self { _dir: dir, path }
	}

	/// A file made up of the given tags around [`AUDIO`]
	pub fn with_tags(id3v2: Option<&[u8]>, id3v1: Option<&[u8; 128]>) -> Self {
		let mut content = Vec::new();
		content.extend(id3v2.unwrap_or_default());
		content.extend(AUDIO);
		content.extend(id3v1.map(|tag| &tag[..]).unwrap_or_default());

		Self::new(&content)
	}

	pub fn path(&self) -> &Path {
		&self.path
	}

	pub fn contents(&self) -> Vec<u8> {
		std::fs::read(&self.path).unwrap()
	}

	/// Everything between the tags, given the size of the ID3v2 tag and whether there's an ID3v1 tag
	pub fn audio(&self, id3v2_len: usize, has_id3v1: bool) -> Vec<u8> {
		let contents = self.contents();
		let end = if has_id3v1 {
			contents.len() - 128
		} else {
			contents.len()
		};

		contents[id3v2_len..end].to_vec()
	}
}
