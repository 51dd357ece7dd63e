//! The static table of known frames

use crate::tag::PayloadKind;

/// Information about a known frame ID
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct FrameInfo {
	/// The four character ID used by ID3v2.3 and/or ID3v2.4
	pub id: &'static str,
	/// The three character ID3v2.2 counterpart, if one exists
	pub v22_id: Option<&'static str>,
	/// The kind of payload frames with this ID hold
	pub kind: PayloadKind,
	/// A short human readable description
	pub description: &'static str,
	/// The shorthand name usable with [`FrameId::from_name`](crate::id3::v2::FrameId::from_name)
	pub name: Option<&'static str>,
}

macro_rules! frames {
	($($id:literal, $v22:tt, $kind:ident, $description:literal $(, $name:literal)?;)+) => {
		const FRAMES: &[FrameInfo] = &[
			$(
				FrameInfo {
					id: $id,
					v22_id: frames!(@V22 $v22),
					kind: PayloadKind::$kind,
					description: $description,
					name: frames!(@NAME $($name)?),
				},
			)+
		];
	};
	(@V22 _) => { None };
	(@V22 $v22:literal) => { Some($v22) };
	(@NAME) => { None };
	(@NAME $name:literal) => { Some($name) };
}

#[rustfmt::skip]
frames! {
	"AENC", "CRA", Binary,  "Audio encryption";
	"APIC", "PIC", Binary,  "Attached picture";
	"ASPI", _,     Binary,  "Audio seek point index";
	"COMM", "COM", Text,    "Comments";
	"COMR", _,     Binary,  "Commercial frame";
	"ENCR", _,     Binary,  "Encryption method registration";
	"EQU2", _,     Binary,  "Equalisation (2)";
	"EQUA", "EQU", Binary,  "Equalisation";
	"ETCO", "ETC", Binary,  "Event timing codes";
	"GEOB", "GEO", Binary,  "General encapsulated object";
	"GRID", _,     Binary,  "Group identification registration";
	"GRP1", "GP1", Text,    "iTunes grouping";
	"IPLS", "IPL", Text,    "Involved people list", "involvedpeople";
	"LINK", "LNK", Binary,  "Linked information";
	"MCDI", "MCI", Binary,  "Music CD identifier";
	"MLLT", "MLL", Binary,  "MPEG location lookup table";
	"MVIN", "MVI", Text,    "iTunes movement number";
	"MVNM", "MVN", Text,    "iTunes movement name";
	"OWNE", _,     Binary,  "Ownership frame";
	"PCNT", "CNT", Integer, "Play counter";
	"PCST", "PCS", Binary,  "iTunes podcast flag";
	"POPM", "POP", Binary,  "Popularimeter";
	"POSS", _,     Binary,  "Position synchronisation frame";
	"PRIV", _,     Binary,  "Private frame";
	"RBUF", "BUF", Binary,  "Recommended buffer size";
	"RVA2", _,     Binary,  "Relative volume adjustment (2)";
	"RVAD", "RVA", Binary,  "Relative volume adjustment";
	"RVRB", "REV", Binary,  "Reverb";
	"SEEK", _,     Binary,  "Seek frame";
	"SIGN", _,     Binary,  "Signature frame";
	"SYLT", "SLT", Binary,  "Synchronised lyrics/text";
	"SYTC", "STC", Binary,  "Synchronised tempo codes";
	"TALB", "TAL", Text,    "Album/Movie/Show title", "album";
	"TBPM", "TBP", Text,    "BPM (beats per minute)", "bpm";
	"TCAT", "TCT", Text,    "iTunes podcast category";
	"TCMP", "TCP", Text,    "iTunes compilation flag";
	"TCOM", "TCM", Text,    "Composer", "composer";
	"TCON", "TCO", Text,    "Content type", "contenttype";
	"TCOP", "TCR", Text,    "Copyright message", "copyright";
	"TDAT", "TDA", Text,    "Date", "date";
	"TDEN", _,     Text,    "Encoding time";
	"TDES", "TDS", Text,    "iTunes podcast description";
	"TDLY", "TDY", Text,    "Playlist delay", "playlistdelay";
	"TDOR", _,     Text,    "Original release time";
	"TDRC", _,     Text,    "Recording time";
	"TDRL", _,     Text,    "Release time";
	"TDTG", _,     Text,    "Tagging time";
	"TENC", "TEN", Text,    "Encoded by", "encodedby";
	"TEXT", "TXT", Text,    "Lyricist/Text writer", "lyricist";
	"TFLT", "TFT", Text,    "File type", "filetype";
	"TGID", "TID", Text,    "iTunes podcast identifier";
	"TIME", "TIM", Text,    "Time", "time";
	"TIPL", _,     Text,    "Involved people list";
	"TIT1", "TT1", Text,    "Content group description", "contentgroup";
	"TIT2", "TT2", Text,    "Title/songname/content description", "title";
	"TIT3", "TT3", Text,    "Subtitle/Description refinement", "subtitle";
	"TKEY", "TKE", Text,    "Initial key", "initialkey";
	"TLAN", "TLA", Text,    "Language(s)", "language";
	"TLEN", "TLE", Text,    "Length", "songlen";
	"TMCL", _,     Text,    "Musician credits list";
	"TMED", "TMT", Text,    "Media type", "mediatype";
	"TMOO", _,     Text,    "Mood";
	"TOAL", "TOT", Text,    "Original album/movie/show title", "origalbum";
	"TOFN", "TOF", Text,    "Original filename", "origfilename";
	"TOLY", "TOL", Text,    "Original lyricist(s)/text writer(s)", "origlyricist";
	"TOPE", "TOA", Text,    "Original artist(s)/performer(s)", "origartist";
	"TORY", "TOR", Text,    "Original release year", "origyear";
	"TOWN", _,     Text,    "File owner/licensee", "fileowner";
	"TPE1", "TP1", Text,    "Lead performer(s)/Soloist(s)", "leadartist";
	"TPE2", "TP2", Text,    "Band/orchestra/accompaniment", "band";
	"TPE3", "TP3", Text,    "Conductor/performer refinement", "conductor";
	"TPE4", "TP4", Text,    "Interpreted, remixed, or otherwise modified by", "mixartist";
	"TPOS", "TPA", Text,    "Part of a set", "partinset";
	"TPRO", _,     Text,    "Produced notice";
	"TPUB", "TPB", Text,    "Publisher", "publisher";
	"TRCK", "TRK", Text,    "Track number/Position in set", "tracknum";
	"TRDA", "TRD", Text,    "Recording dates", "recordingdates";
	"TRSN", _,     Text,    "Internet radio station name", "netradiostation";
	"TRSO", _,     Text,    "Internet radio station owner", "netradioowner";
	"TSIZ", "TSI", Text,    "Size", "size";
	"TSO2", "TS2", Text,    "iTunes album artist sort order";
	"TSOA", "TSA", Text,    "Album sort order";
	"TSOC", "TSC", Text,    "iTunes composer sort order";
	"TSOP", "TSP", Text,    "Performer sort order";
	"TSOT", "TST", Text,    "Title sort order";
	"TSRC", "TRC", Text,    "ISRC (international standard recording code)", "isrc";
	"TSSE", "TSS", Text,    "Software/Hardware and settings used for encoding", "encodersettings";
	"TSST", _,     Text,    "Set subtitle";
	"TXXX", "TXX", Text,    "User defined text information frame";
	"TYER", "TYE", Text,    "Year", "year";
	"UFID", "UFI", Binary,  "Unique file identifier";
	"USER", _,     Binary,  "Terms of use";
	"USLT", "ULT", Text,    "Unsynchronised lyrics/text transcription";
	"WCOM", "WCM", Text,    "Commercial information", "wwwcommercialinfo";
	"WCOP", "WCP", Text,    "Copyright/Legal information", "wwwcopyright";
	"WFED", "WFD", Text,    "iTunes podcast feed";
	"WOAF", "WAF", Text,    "Official audio file webpage", "wwwaudiofile";
	"WOAR", "WAR", Text,    "Official artist/performer webpage", "wwwartist";
	"WOAS", "WAS", Text,    "Official audio source webpage", "wwwaudiosource";
	"WORS", _,     Text,    "Official internet radio station homepage", "wwwradiopage";
	"WPAY", _,     Text,    "Payment", "wwwpayment";
	"WPUB", "WPB", Text,    "Publishers official webpage", "wwwpublisher";
	"WXXX", "WXX", Text,    "User defined URL link frame";
}

// Names that resolve to the same frame as another name
const NAME_ALIASES: &[(&str, &str)] = &[("artist", "TPE1"), ("track", "TRCK")];

/// How a frame's content is laid out
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub(crate) enum FrameLayout {
	Text,
	UserText,
	Url,
	UserUrl,
	Comment,
	Picture,
	Counter,
	Binary,
}

impl FrameLayout {
	pub(crate) fn kind(self) -> PayloadKind {
		match self {
			Self::Text | Self::UserText | Self::Url | Self::UserUrl | Self::Comment => {
				PayloadKind::Text
			},
			Self::Picture | Self::Binary => PayloadKind::Binary,
			Self::Counter => PayloadKind::Integer,
		}
	}
}

/// Look up a known frame ID
///
/// Both ID3v2.3/4 and ID3v2.2 IDs are accepted.
///
/// # Examples
///
/// ```rust
/// use mp3tag::id3::v2::frame_info;
/// use mp3tag::tag::PayloadKind;
///
/// let title = frame_info("TIT2").unwrap();
/// assert_eq!(title.kind, PayloadKind::Text);
/// assert_eq!(title.v22_id, Some("TT2"));
/// assert_eq!(title.name, Some("title"));
///
/// // ID3v2.2 IDs resolve to the same entry
/// assert_eq!(frame_info("TT2"), Some(title));
///
/// assert!(frame_info("ZZZZ").is_none());
/// ```
pub fn frame_info(id: &str) -> Option<&'static FrameInfo> {
	match id.len() {
		3 => FRAMES.iter().find(|info| info.v22_id == Some(id)),
		4 => FRAMES.iter().find(|info| info.id == id),
		_ => None,
	}
}

pub(crate) fn frame_info_by_name(name: &str) -> Option<&'static FrameInfo> {
	if let Some((_, id)) = NAME_ALIASES.iter().find(|(alias, _)| *alias == name) {
		return frame_info(id);
	}

	FRAMES.iter().find(|info| info.name == Some(name))
}

/// Upgrade an ID3v2.2 ID to its four character counterpart
pub(crate) fn upgrade_v2(id: &str) -> Option<&'static str> {
	FRAMES
		.iter()
		.find(|info| info.v22_id == Some(id))
		.map(|info| info.id)
}

/// Downgrade a four character ID to its ID3v2.2 counterpart
pub(crate) fn downgrade_to_v2(id: &str) -> Option<&'static str> {
	frame_info(id).and_then(|info| info.v22_id)
}

/// Determine how a frame with `id` is laid out
///
/// IDs outside of the table are classified by their prefix. Three character IDs only exist
/// for ID3v2.2 frames that couldn't be upgraded, they are never interpreted.
pub(crate) fn frame_layout(id: &str) -> FrameLayout {
	if id.len() == 3 {
		return FrameLayout::Binary;
	}

	match id {
		"TXXX" => return FrameLayout::UserText,
		"WXXX" => return FrameLayout::UserUrl,
		"COMM" | "USLT" => return FrameLayout::Comment,
		"APIC" => return FrameLayout::Picture,
		"PCNT" => return FrameLayout::Counter,
		_ => {},
	}

	if let Some(info) = frame_info(id) {
		return match info.kind {
			PayloadKind::Text if id.starts_with('W') => FrameLayout::Url,
			PayloadKind::Text => FrameLayout::Text,
			PayloadKind::Binary => FrameLayout::Binary,
			PayloadKind::Integer => FrameLayout::Counter,
		};
	}

	if id.starts_with('T') {
		FrameLayout::Text
	} else if id.starts_with('W') {
		FrameLayout::Url
	} else {
		FrameLayout::Binary
	}
}

#[cfg(test)]
mod tests {
	use super::{FRAMES, FrameLayout, frame_info, frame_info_by_name, frame_layout};
	use crate::tag::PayloadKind;

	#[test_log::test]
	fn table_is_consistent() {
		for (index, info) in FRAMES.iter().enumerate() {
			assert_eq!(info.id.len(), 4, "{}", info.id);
			assert_eq!(frame_layout(info.id).kind(), info.kind, "{}", info.id);

			// IDs and ID3v2.2 IDs both have to resolve to a single entry
			assert!(FRAMES[index + 1..].iter().all(|other| other.id != info.id));
			if let Some(v22_id) = info.v22_id {
				assert_eq!(v22_id.len(), 3);
				assert!(
					FRAMES[index + 1..]
						.iter()
						.all(|other| other.v22_id != Some(v22_id)),
					"{v22_id}"
				);
			}
		}
	}

	#[test_log::test]
	fn names() {
		assert_eq!(frame_info_by_name("artist").unwrap().id, "TPE1");
		assert_eq!(frame_info_by_name("leadartist").unwrap().id, "TPE1");
		assert_eq!(frame_info_by_name("track").unwrap().id, "TRCK");
		assert_eq!(frame_info_by_name("wwwradiopage").unwrap().id, "WORS");
		assert!(frame_info_by_name("Title").is_none());
	}

	#[test_log::test]
	fn unknown_ids_are_classified_by_prefix() {
		assert_eq!(frame_layout("TZZZ"), FrameLayout::Text);
		assert_eq!(frame_layout("WZZZ"), FrameLayout::Url);
		assert_eq!(frame_layout("ZZZZ"), FrameLayout::Binary);
		assert_eq!(frame_layout("TT2"), FrameLayout::Binary);
		assert!(frame_info("ZZZZ").is_none());
	}

	#[test_log::test]
	fn layouts() {
		assert_eq!(frame_layout("WOAR"), FrameLayout::Url);
		assert_eq!(frame_layout("GRP1"), FrameLayout::Text);
		assert_eq!(frame_layout("USLT"), FrameLayout::Comment);
		assert_eq!(frame_layout("PCNT").kind(), PayloadKind::Integer);
	}
}
