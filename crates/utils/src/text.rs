//! ASCII folding and slug helpers

use unicode_normalization::UnicodeNormalization;

/// Fold a string to ASCII, converting accented characters to their base letter
///
/// The text is decomposed (NFKD) and every character without an ASCII
/// representation is dropped.
///
/// # Examples
///
/// ```
/// use reinhardt_admin_export_utils::text::asciify;
///
/// assert_eq!(asciify("foo"), "foo");
/// assert_eq!(asciify("bàr"), "bar");
/// assert_eq!(asciify("Ëéüçñøá"), "Eeucna");
/// assert_eq!(asciify(""), "");
/// ```
pub fn asciify(text: &str) -> String {
	text.nfkd().filter(char::is_ascii).collect()
}

/// Convert a string to a slug usable in filenames
///
/// The text is asciified, stripped and lowercased. Everything that is not a
/// word character, whitespace or a hyphen is then removed, and each run of
/// whitespace and hyphens becomes a single hyphen.
///
/// # Examples
///
/// ```
/// use reinhardt_admin_export_utils::text::slugify;
///
/// assert_eq!(slugify("  F,ôö  "), "foo");
/// assert_eq!(slugify(" Bà,'      bär"), "ba-bar");
/// assert_eq!(slugify("Order lines"), "order-lines");
/// ```
pub fn slugify(text: &str) -> String {
	let ascii = asciify(text);
	let lowered = ascii.trim().to_ascii_lowercase();

	let mut slug = String::with_capacity(lowered.len());
	let mut in_separator = false;
	for ch in lowered.chars() {
		if ch.is_whitespace() || ch == '-' {
			if !in_separator {
				slug.push('-');
				in_separator = true;
			}
		} else if ch.is_ascii_alphanumeric() || ch == '_' {
			slug.push(ch);
			in_separator = false;
		}
		// Other characters are dropped without ending a separator run
	}
	slug
}

/// Keep at most `max_chars` characters of `text`
///
/// Unlike byte slicing this never splits a multi-byte character.
///
/// # Examples
///
/// ```
/// use reinhardt_admin_export_utils::text::truncate_chars;
///
/// assert_eq!(truncate_chars("Widgets", 3), "Wid");
/// assert_eq!(truncate_chars("Größe", 4), "Größ");
/// assert_eq!(truncate_chars("abc", 10), "abc");
/// ```
pub fn truncate_chars(text: &str, max_chars: usize) -> &str {
	match text.char_indices().nth(max_chars) {
		Some((idx, _)) => &text[..idx],
		None => text,
	}
}


#[cfg(test)]
mod proptests {
	use super::*;
	use proptest::prelude::*;

	proptest! {
		#[test]
		fn prop_asciify_output_is_ascii(s in "\\PC*") {
			prop_assert!(asciify(&s).is_ascii());
		}

		#[test]
		fn prop_asciify_identity_on_ascii(s in "[ -~]*") {
			prop_assert_eq!(asciify(&s), s);
		}

		#[test]
		fn prop_slugify_idempotent(s in "\\PC*") {
			let once = slugify(&s);
			prop_assert_eq!(slugify(&once), once.clone());
		}

		#[test]
		fn prop_slugify_format(s in "\\PC*") {
			let slug = slugify(&s);
			let allowed = slug
				.chars()
				.all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-');
			prop_assert!(allowed, "unexpected character in {:?}", slug);
			prop_assert!(!slug.contains("--"));
		}

		#[test]
		fn prop_truncate_chars_length(s in "\\PC*", n in 0usize..64) {
			let truncated = truncate_chars(&s, n);
			prop_assert!(truncated.chars().count() <= n);
			prop_assert!(s.starts_with(truncated));
		}
	}
}
