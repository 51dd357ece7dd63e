/// A frame whose content isn't interpreted
///
/// This is used for every frame that doesn't have a more specific type (`PRIV`, `GEOB`,
/// `SYLT`, unknown IDs, etc.), along with encrypted frames. The content is written back
/// exactly as it was read.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct BinaryFrame {
	/// The frame content
	pub data: Vec<u8>,
}

impl BinaryFrame {
	/// Create a new [`BinaryFrame`]
	pub fn new(data: Vec<u8>) -> Self {
		Self { data }
	}
}
