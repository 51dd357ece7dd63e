//! The CRC-32 stored in the extended header

use std::sync::OnceLock;

// In the very rare chance someone wants to write a CRC in their extended header
fn crc_32_table() -> &'static [u32; 256] {
	static INSTANCE: OnceLock<[u32; 256]> = OnceLock::new();
	INSTANCE.get_or_init(|| {
		let mut crc32_table = [0; 256];

		for (n, entry) in (0_u32..).zip(crc32_table.iter_mut()) {
			*entry = (0..8).fold(n, |acc, _| match acc & 1 {
				1 => 0xEDB8_8320 ^ (acc >> 1),
				_ => acc >> 1,
			});
		}

		crc32_table
	})
}

/// CRC-32 (ISO 3309) of `content`
pub(crate) fn crc_32(content: &[u8]) -> u32 {
	!content.iter().fold(!0, |crc, octet| {
		(crc >> 8) ^ crc_32_table()[((crc ^ u32::from(*octet)) & 0xFF) as usize]
	})
}

#[cfg(test)]
mod tests {
	use super::crc_32;

	#[test_log::test]
	fn check_value() {
		assert_eq!(crc_32(b"123456789"), 0xCBF4_3926);
		assert_eq!(crc_32(&[]), 0);
	}
}
