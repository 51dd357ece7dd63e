#![allow(missing_docs)]

#[allow(dead_code)]
mod util;

use mp3tag::config::{ParseOptions, ParsingMode, WriteOptions};
use mp3tag::error::ErrorKind;
use mp3tag::id3::v1::{Id3v1Field, Id3v1Value, Id3v1Version};
use mp3tag::id3::v2::{CommentFrame, Frame, FrameId, FrameValue, Id3v2Version};
use mp3tag::mp3::Mp3File;
use mp3tag::prelude::*;
use mp3tag::{TextEncoding, Utf16ByteOrder};

use util::{
	AUDIO, TempMp3, id3v1, id3v2_2, id3v2_3, id3v2_3_unsynchronised, id3v2_3_utf16_be, id3v2_4,
};

fn id3v2_builders() -> [fn() -> Vec<u8>; 5] {
	[id3v2_2, id3v2_3, id3v2_3_unsynchronised, id3v2_3_utf16_be, id3v2_4]
}

#[test_log::test]
fn read_both_tags() {
	let file = TempMp3::with_tags(Some(&id3v2_3()), Some(&id3v1()));
	let mp3 = Mp3File::open(file.path()).unwrap();

	let id3v2 = mp3.id3v2().unwrap();
	assert_eq!(id3v2.version(), Id3v2Version::V3);
	assert_eq!(id3v2.title().as_deref(), Some("Foo title"));
	assert_eq!(id3v2.artist().as_deref(), Some("Bar artist"));

	// The tags are never merged
	let id3v1 = mp3.id3v1().unwrap();
	assert_eq!(id3v1.version(), Id3v1Version::V1_1);
	assert_eq!(id3v1.title().as_deref(), Some("Song"));
	assert_eq!(id3v1.artist().as_deref(), Some("Artist"));
	assert_eq!(id3v1.year(), Some(2001));
	assert_eq!(id3v1.track(), Some(5));
	assert_eq!(
		id3v1.get(Id3v1Field::Genre),
		Some(Id3v1Value::Text(String::from("Other")))
	);
}

#[test_log::test]
fn read_other_layouts() {
	let file = TempMp3::with_tags(Some(&id3v2_2()), None);
	let mp3 = Mp3File::open(file.path()).unwrap();
	let id3v2 = mp3.id3v2().unwrap();
	assert_eq!(id3v2.version(), Id3v2Version::V2);
	assert_eq!(id3v2.title().as_deref(), Some("Foo title"));
	assert_eq!(id3v2.artist().as_deref(), Some("Bar artist"));

	let file = TempMp3::with_tags(Some(&id3v2_3_unsynchronised()), None);
	let mp3 = Mp3File::open(file.path()).unwrap();
	assert_eq!(mp3.id3v2().unwrap().title().as_deref(), Some("\u{FF}oo"));

	let file = TempMp3::with_tags(Some(&id3v2_3_utf16_be()), None);
	let mp3 = Mp3File::open(file.path()).unwrap();
	let Some(FrameValue::Text(title)) = mp3
		.id3v2()
		.unwrap()
		.get(&FrameId::new("TIT2").unwrap())
		.map(Frame::value)
	else {
		panic!("Expected a text frame");
	};
	assert_eq!(title.encoding, TextEncoding::UTF16);
	assert_eq!(title.byte_order, Utf16ByteOrder::BigEndian);
	assert_eq!(title.value, "Foo");
}

#[test_log::test]
fn no_tags() {
	let file = TempMp3::with_tags(None, None);
	let mp3 = Mp3File::open(file.path()).unwrap();

	assert!(!mp3.contains_tag());

	// Nothing to write
	mp3.save(WriteOptions::default()).unwrap();
	assert_eq!(file.contents(), AUDIO);
}

#[test_log::test]
fn no_op_save_is_identical() {
	for id3v2 in id3v2_builders() {
		let id3v2 = id3v2();
		let file = TempMp3::with_tags(Some(&id3v2), Some(&id3v1()));
		let original = file.contents();
		let original_tag = Mp3File::open(file.path()).unwrap().id3v2().cloned();

		for allow_in_place in [true, false] {
			let mp3 = Mp3File::open(file.path()).unwrap();
			mp3.save(WriteOptions::default().allow_in_place(allow_in_place))
				.unwrap();

			// Unsynchronisation is never written, the tag is stored plain in the same region
			if id3v2 == id3v2_3_unsynchronised() {
				assert_eq!(file.contents().len(), original.len());
				assert_eq!(file.audio(id3v2.len(), true), AUDIO);

				let mp3 = Mp3File::open(file.path()).unwrap();
				assert_eq!(mp3.id3v2().cloned(), original_tag);
				continue;
			}

			assert_eq!(file.contents(), original);
		}
	}
}

#[test_log::test]
fn save_is_idempotent() {
	for id3v2 in id3v2_builders() {
		let file = TempMp3::with_tags(Some(&id3v2()), Some(&id3v1()));

		let mut mp3 = Mp3File::open(file.path()).unwrap();
		mp3.id3v2_mut()
			.unwrap()
			.set_title(String::from("A much longer title than the tag has room for"));
		mp3.id3v1_mut().unwrap().set_comment(String::from("Foo comment"));
		mp3.save(WriteOptions::default()).unwrap();

		let first_save = file.contents();

		let mp3 = Mp3File::open(file.path()).unwrap();
		mp3.save(WriteOptions::default()).unwrap();

		assert_eq!(file.contents(), first_save);
	}
}

#[test_log::test]
fn audio_is_preserved_when_the_tag_grows() {
	let file = TempMp3::with_tags(Some(&id3v2_3()), Some(&id3v1()));

	let mut mp3 = Mp3File::open(file.path()).unwrap();
	mp3.id3v2_mut()
		.unwrap()
		.set(
			FrameId::new("COMM").unwrap(),
			CommentFrame::new(TextEncoding::Latin1, *b"eng", "", "c".repeat(500)),
		)
		.unwrap();
	mp3.save(WriteOptions::default()).unwrap();

	let contents = file.contents();

	// Rewritten with the preferred padding, aligned
	let id3v2_len = 2048;
	assert_eq!(contents.len(), id3v2_len + AUDIO.len() + 128);
	assert_eq!(file.audio(id3v2_len, true), AUDIO);
	assert_eq!(&contents[contents.len() - 128..], &id3v1()[..]);

	let mp3 = Mp3File::open(file.path()).unwrap();
	let id3v2 = mp3.id3v2().unwrap();
	assert_eq!(id3v2.comment().as_deref().map(str::len), Some(500));
	assert_eq!(id3v2.title().as_deref(), Some("Foo title"));
}

#[test_log::test]
fn small_edits_happen_in_place() {
	let file = TempMp3::with_tags(Some(&id3v2_3()), Some(&id3v1()));
	let original_len = file.contents().len();

	let mut mp3 = Mp3File::open(file.path()).unwrap();
	mp3.id3v2_mut().unwrap().set_artist(String::from("Qux"));
	mp3.id3v1_mut().unwrap().set_artist(String::from("Qux"));
	mp3.save(WriteOptions::default()).unwrap();

	assert_eq!(file.contents().len(), original_len);
	assert_eq!(file.audio(id3v2_3().len(), true), AUDIO);

	let mp3 = Mp3File::open(file.path()).unwrap();
	assert_eq!(mp3.id3v2().unwrap().artist().as_deref(), Some("Qux"));
	assert_eq!(mp3.id3v1().unwrap().artist().as_deref(), Some("Qux"));
}

#[test_log::test]
fn corrupt_id3v2_size() {
	let mut id3v2 = id3v2_3();
	// Way past the end of the file
	id3v2[6] = 0x7F;

	let file = TempMp3::with_tags(Some(&id3v2), None);
	let original = file.contents();

	for parsing_mode in [ParsingMode::Strict, ParsingMode::BestAttempt, ParsingMode::Relaxed] {
		let err = Mp3File::open_with_options(
			file.path(),
			ParseOptions::new().parsing_mode(parsing_mode),
		)
		.unwrap_err();
		assert!(err.is_format_error());
	}

	assert_eq!(file.contents(), original);
}

#[test_log::test]
fn unsupported_version() {
	let mut id3v2 = id3v2_3();
	id3v2[3] = 5;

	let file = TempMp3::with_tags(Some(&id3v2), None);

	let err = Mp3File::open(file.path()).unwrap_err();
	let ErrorKind::UnsupportedVersion(version) = err.kind() else {
		panic!("Expected an unsupported version error, got: {err:?}");
	};
	assert_eq!(version.major(), 5);
}

#[test_log::test]
fn relaxed_parsing_skips_bad_frames() {
	let mut id3v2 = id3v2_3();
	// Corrupt the ID of the second frame
	id3v2[30] = b'+';

	let file = TempMp3::with_tags(Some(&id3v2), None);

	assert!(Mp3File::open(file.path()).is_err());

	let mp3 = Mp3File::open_with_options(
		file.path(),
		ParseOptions::new().parsing_mode(ParsingMode::Relaxed),
	)
	.unwrap();

	let id3v2 = mp3.id3v2().unwrap();
	assert_eq!(id3v2.len(), 1);
	assert_eq!(id3v2.title().as_deref(), Some("Foo title"));
}

#[test_log::test]
fn remove_tags() {
	let file = TempMp3::with_tags(Some(&id3v2_3()), Some(&id3v1()));

	let mut mp3 = Mp3File::open(file.path()).unwrap();
	assert!(mp3.remove_id3v1().is_some());
	mp3.save(WriteOptions::default()).unwrap();

	assert_eq!(file.contents().len(), id3v2_3().len() + AUDIO.len());

	let mut mp3 = Mp3File::open(file.path()).unwrap();
	assert!(mp3.id3v1().is_none());
	assert!(mp3.remove_id3v2().is_some());
	mp3.save(WriteOptions::default()).unwrap();

	assert_eq!(file.contents(), AUDIO);
}

#[test_log::test]
fn add_tags() {
	let file = TempMp3::with_tags(None, None);

	let mut mp3 = Mp3File::open(file.path()).unwrap();
	mp3.get_or_insert_id3v2().set_title(String::from("Foo title"));
	mp3.get_or_insert_id3v1().set_title(String::from("Foo title"));
	mp3.save(WriteOptions::default()).unwrap();

	assert_eq!(file.audio(2048, true), AUDIO);

	let mp3 = Mp3File::open(file.path()).unwrap();
	assert_eq!(mp3.id3v2().unwrap().version(), Id3v2Version::V4);
	assert_eq!(mp3.id3v2().unwrap().title().as_deref(), Some("Foo title"));
	assert_eq!(mp3.id3v1().unwrap().title().as_deref(), Some("Foo title"));
}

#[test_log::test]
fn empty_tags() {
	// An empty tag that never existed isn't written
	let file = TempMp3::with_tags(None, None);

	let mut mp3 = Mp3File::open(file.path()).unwrap();
	mp3.get_or_insert_id3v2();
	mp3.get_or_insert_id3v1();
	mp3.save(WriteOptions::default()).unwrap();

	assert_eq!(file.contents(), AUDIO);

	// An existing tag keeps its region
	let file = TempMp3::with_tags(Some(&id3v2_3()), None);
	let original_len = file.contents().len();

	let mut mp3 = Mp3File::open(file.path()).unwrap();
	mp3.id3v2_mut().unwrap().clear();
	mp3.save(WriteOptions::default()).unwrap();

	assert_eq!(file.contents().len(), original_len);

	let mp3 = Mp3File::open(file.path()).unwrap();
	assert!(mp3.id3v2().unwrap().is_empty());
}

#[test_log::test]
fn remove_missing_frame_is_a_no_op() {
	let file = TempMp3::with_tags(Some(&id3v2_3()), Some(&id3v1()));
	let original = file.contents();

	let mut mp3 = Mp3File::open(file.path()).unwrap();
	assert!(mp3.id3v2_mut().unwrap().remove(&FrameId::new("TALB").unwrap()).is_empty());
	assert!(mp3.id3v1_mut().unwrap().remove(Id3v1Field::Album).is_none());
	mp3.save(WriteOptions::default()).unwrap();

	assert_eq!(file.contents(), original);
}

#[test_log::test]
fn text_encoding_policy() {
	let file = TempMp3::with_tags(Some(&id3v2_4()), None);
	let original = file.contents();

	let mut mp3 = Mp3File::open(file.path()).unwrap();
	assert!(
		mp3.id3v2_mut()
			.unwrap()
			.set_version(Id3v2Version::V3)
			.is_empty()
	);

	// UTF-8 doesn't exist in ID3v2.3
	let err = mp3.save(WriteOptions::default()).unwrap_err();
	assert!(matches!(err.kind(), ErrorKind::TextEncode(_)));
	assert_eq!(file.contents(), original);

	mp3.save(WriteOptions::default().convert_text_encoding(true))
		.unwrap();

	let mp3 = Mp3File::open(file.path()).unwrap();
	let id3v2 = mp3.id3v2().unwrap();
	assert_eq!(id3v2.version(), Id3v2Version::V3);

	let Some(FrameValue::Text(album)) = id3v2
		.get(&FrameId::new("TALB").unwrap())
		.map(Frame::value)
	else {
		panic!("Expected a text frame");
	};
	assert_eq!(album.encoding, TextEncoding::UTF16);
	assert_eq!(album.value, "Baz album");
}

#[test_log::test]
fn lossy_latin1() {
	let file = TempMp3::with_tags(None, Some(&id3v1()));
	let original = file.contents();

	let mut mp3 = Mp3File::open(file.path()).unwrap();
	mp3.id3v1_mut().unwrap().set_title(String::from("\u{4E00} title"));

	assert!(mp3.save(WriteOptions::default()).is_err());
	assert_eq!(file.contents(), original);

	mp3.save(WriteOptions::default().lossy_text_encoding(true))
		.unwrap();

	let mp3 = Mp3File::open(file.path()).unwrap();
	assert_eq!(mp3.id3v1().unwrap().title().as_deref(), Some("? title"));
}
