use crate::error::Result;
use crate::macros::err;

/// **DO NOT USE DIRECTLY**
///
/// Creates a `Vec` of the specified length, containing copies of `element`.
///
/// This should be used through [`try_vec!`](crate::macros::try_vec)
pub(crate) fn fallible_vec_from_element<T>(
	element: T,
	expected_size: usize,
	allocation_limit: usize,
) -> Result<Vec<T>>
where
	T: Clone,
{
	let mut v = Vec::new();
	if expected_size == 0 {
		return Ok(v);
	}

	if expected_size > allocation_limit {
		err!(TooMuchData);
	}

	v.try_reserve_exact(expected_size)?;
	v.resize(expected_size, element);

	Ok(v)
}

#[cfg(test)]
mod tests {
	use crate::config::ParseOptions;
	use crate::error::ErrorKind;
	use crate::util::alloc::fallible_vec_from_element;

	#[test_log::test]
	fn vec_fallible_repeat() {
		let limit = ParseOptions::DEFAULT_ALLOCATION_LIMIT;

		let u8_vec_len_20 = fallible_vec_from_element(0u8, 20, limit).unwrap();
		assert_eq!(u8_vec_len_20.len(), 20);
		assert!(u8_vec_len_20.iter().all(|e| *e == 0));

		let u64_vec_len_89 = fallible_vec_from_element(0u64, 89, limit).unwrap();
		assert_eq!(u64_vec_len_89.len(), 89);
		assert!(u64_vec_len_89.iter().all(|e| *e == 0));

		let u8_large_vec = fallible_vec_from_element(0u8, u32::MAX as usize, limit);
		assert!(matches!(
			u8_large_vec.unwrap_err().kind(),
			ErrorKind::TooMuchData
		));
	}
}
