use std::borrow::Cow;

// This defines the `Accessor` trait, used to define unified getters/setters for commonly
// accessed tag values.
//
// Usage:
//
// accessor_trait! {
//     [field_name]<type>
// }
//
// * `field_name` is the name of the method to access the field. Multi segment names,
// such as `track_total`, are separated by spaces: [track total]<type>.
//
// * `type` is the return type for `Accessor::field_name`. An owned type for the setter can
// follow it: [field_name]<type, owned_type>
macro_rules! accessor_trait {
	($([$($name:tt)+] < $($ty:ty),+ >),+ $(,)?) => {
		/// Provides accessors for common items
		///
		/// Both [`Id3v1Tag`](crate::id3::v1::Id3v1Tag) and [`Id3v2Tag`](crate::id3::v2::Id3v2Tag)
		/// implement this trait. The two tags are never merged: when a file carries both,
		/// pick the tag to read from through [`Mp3File`](crate::mp3::Mp3File).
		///
		/// Setters **overwrite**. ID3v1 setters silently do nothing for values the format
		/// cannot hold (for example a track number above 255).
		pub trait Accessor {
			$(
				accessor_trait! { @GETTER [$($name)+] $($ty),+ }

				accessor_trait! { @SETTER [$($name)+] $($ty),+ }

				accessor_trait! { @REMOVE [$($name)+] }
			)+
		}
	};
	(@GETTER [$($name:tt)+] $ty:ty $(, $_ty:ty)?) => {
		paste::paste! {
			#[doc = "Returns the " $($name)" "+ ", if the tag holds one."]
			fn [< $($name)_+ >] (&self) -> Option<$ty> { None }
		}
	};
	(@SETTER [$($name:tt)+] $_ty:ty, $owned_ty:ty) => {
		accessor_trait! { @SETTER [$($name)+] $owned_ty }
	};
	(@SETTER [$($name:tt)+] $ty:ty) => {
		paste::paste! {
			#[doc = "Sets the " $($name)" "+ "."]
			fn [< set_ $($name)_+ >] (&mut self, _value: $ty) {}
		}
	};
	(@REMOVE [$($name:tt)+]) => {
		paste::paste! {
			#[doc = "Removes the " $($name)" "+ "."]
			fn [< remove_ $($name)_+ >] (&mut self) {}
		}
	};
}

accessor_trait! {
	[artist]<Cow<'_, str>, String>, [title      ]<Cow<'_, str>, String>,
	[album ]<Cow<'_, str>, String>, [genre      ]<Cow<'_, str>, String>,
	[track ]<u32>,                  [track total]<u32>,
	[disk  ]<u32>,                  [disk total ]<u32>,
	[year  ]<u32>,                  [comment    ]<Cow<'_, str>, String>,
}
