//! Collation keys for catalog names.
//!
//! A collation key is a derived string stored next to a display name so that
//! a plain `ORDER BY` on the key yields a case- and diacritic-insensitive,
//! digits-before-letters ordering. Every character of the input contributes
//! one fragment:
//!
//! - an ASCII digit `d` becomes `0000d`;
//! - anything else is lowercased, reduced to its base letter when it is an
//!   accented Latin letter, and becomes `<code><accent><base>` where `code` is
//!   the base letter's code point (left padded with a single `0` below 100)
//!   and `accent` is `1` when the character carried a diacritic. Letters of
//!   other scripts keep their own code point with accent `0`.
//!
//! Digits are padded one at a time, so `"9"` sorts after `"10"`. Existing
//! sort orders depend on this, keep it.

use deunicode::deunicode_char;

/// Builds the collation key for `text`.
///
/// # Examples
///
/// ```rust
/// use catalog::domain::collation::normalize;
///
/// assert_eq!(normalize("9"), "00009");
/// assert_eq!(normalize("a"), "0970a");
/// assert_eq!(normalize("Á"), "0971a");
/// ```
#[must_use]
pub fn normalize(text: &str) -> String {
    let mut key = String::with_capacity(text.len() * 5);
    for c in text.chars() {
        push_fragment(&mut key, c);
    }
    key
}

fn push_fragment(key: &mut String, c: char) {
    if c.is_ascii_digit() {
        key.push_str("0000");
        key.push(c);
        return;
    }

    let (base, accent) = base_letter(lowercase(c));
    let code = u32::from(base);

    if code < 100 {
        key.push('0');
    }
    key.push_str(&code.to_string());
    key.push(if accent { '1' } else { '0' });
    key.push(base);
}

/// Single-character lowercase mapping.
///
/// Characters whose lowercase form expands (`İ` becomes `i` plus a combining
/// dot) are kept as they are, so the diacritic is still seen by
/// [`base_letter`].
fn lowercase(c: char) -> char {
    let mut lower = c.to_lowercase();
    match (lower.next(), lower.next()) {
        (Some(l), None) => l,
        _ => c,
    }
}

/// Strips the diacritic from a Latin letter.
///
/// Returns the lowercase base letter and the accent flag. Only Latin-1,
/// Latin Extended-A/B and Latin Extended Additional letters are reduced;
/// every other character, including Cyrillic and Greek letters, is its own
/// base.
fn base_letter(c: char) -> (char, bool) {
    if c.is_ascii() || !is_accented_latin(c) {
        return (c, false);
    }

    let mut transliterated = match deunicode_char(c) {
        Some(s) => s.chars(),
        None => return (c, false),
    };

    match (transliterated.next(), transliterated.next()) {
        (Some(base), None) if base.is_ascii_alphabetic() => (base.to_ascii_lowercase(), true),
        _ => (c, false),
    }
}

fn is_accented_latin(c: char) -> bool {
    c.is_alphabetic() && matches!(c, '\u{00C0}'..='\u{024F}' | '\u{1E00}'..='\u{1EFF}')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_letters_use_padded_code_point() {
        for c in 'a'..='z' {
            let code = u32::from(c);
            let expected = if code < 100 {
                format!("0{code}0{c}")
            } else {
                format!("{code}0{c}")
            };
            assert_eq!(normalize(&c.to_string()), expected);
            assert_eq!(normalize(&format!("{c}xy")), format!("{expected}{}", normalize("xy")));
        }
    }

    #[test]
    fn uppercase_matches_lowercase() {
        for c in 'a'..='z' {
            let upper = c.to_ascii_uppercase().to_string();
            assert_eq!(normalize(&upper), normalize(&c.to_string()));
        }
        assert_eq!(normalize("Star Wars"), normalize("star wars"));
    }

    #[test]
    fn accented_letters_differ_only_in_accent_flag() {
        for (accented, upper, base) in [("á", "Á", "a"), ("ú", "Ú", "u"), ("ž", "Ž", "z")] {
            let key = normalize(accented);
            assert_eq!(key, normalize(upper));

            let plain = normalize(base);
            assert_eq!(key.len(), plain.len());
            let flag = key.len() - 2;
            assert_eq!(&key[..flag], &plain[..flag]);
            assert_eq!(&key[flag..=flag], "1");
            assert_eq!(&plain[flag..=flag], "0");
            assert_eq!(&key[flag + 1..], base);
        }
    }

    #[test]
    fn known_keys() {
        assert_eq!(normalize("á"), "0971a");
        assert_eq!(normalize("ž"), "1221z");
        assert_eq!(normalize("Ř"), "1141r");
        assert_eq!(normalize("d"), "1000d");
    }

    #[test]
    fn digits_are_padded_one_by_one() {
        for d in '0'..='9' {
            assert_eq!(normalize(&d.to_string()), format!("0000{d}"));
            assert_eq!(normalize(&format!("{d}ab")), format!("0000{d}{}", normalize("ab")));
        }
        assert_eq!(normalize("9"), "00009");
        assert_eq!(normalize("10"), "0000100000");
    }

    #[test]
    fn multi_digit_numbers_compare_digit_by_digit() {
        assert!(normalize("10") < normalize("9"));
    }

    #[test]
    fn letters_sort_alphabetically_and_after_digits() {
        let keys: Vec<String> = ('a'..='z').map(|c| normalize(&c.to_string())).collect();
        assert!(keys.windows(2).all(|w| w[0] < w[1]));

        for d in '0'..='9' {
            assert!(normalize(&d.to_string()) < normalize("a"));
        }
    }

    #[test]
    fn accents_do_not_change_base_ordering() {
        assert!(normalize("áb") < normalize("b"));
        assert!(normalize("a") < normalize("á"));
        assert!(normalize("á") < normalize("b"));
        assert!(normalize("Žába") > normalize("Zebra"));
    }

    #[test]
    fn key_is_concatenation_of_fragments() {
        assert_eq!(
            normalize("cba"),
            format!("{}{}{}", normalize("c"), normalize("b"), normalize("a"))
        );
    }

    #[test]
    fn empty_input_gives_empty_key() {
        assert_eq!(normalize(""), "");
    }

    #[test]
    fn other_characters_use_their_own_code_point() {
        assert_eq!(normalize(" "), "0320 ");
        assert_eq!(normalize("-"), "0450-");
        assert_eq!(normalize("ß"), "2230ß");
        assert_eq!(normalize("×"), "2150×");
    }

    #[test]
    fn non_latin_letters_keep_their_code_point() {
        assert_eq!(normalize("б"), "10730б");
        assert_eq!(normalize("Б"), "10730б");
        assert_eq!(normalize("я"), "11030я");
        assert_eq!(normalize("α"), "9450α");
        assert_eq!(normalize("Ω"), "9690ω");
        assert_ne!(normalize("б"), normalize("ḃ"));
    }

    #[test]
    fn latin_extended_letters_are_reduced() {
        assert_eq!(normalize("ḃ"), "0981b");
        assert_eq!(normalize("İ"), "1051i");
        assert_eq!(normalize("Ő"), "1111o");
    }
}
