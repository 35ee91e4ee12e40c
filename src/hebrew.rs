//! Hebrew text utilities: niqqud stripping, transliteration, and the
//! best-effort root heuristic.
//!
//! Everything here is a pure, total function over `&str`. Non-Hebrew input
//! passes through untouched, so callers never need an error path.

/// Vowel-point (niqqud) code-point ranges, inclusive on both ends.
///
/// U+05B0..=U+05BC (sheva through dagesh), U+05C1..=U+05C2 (shin/sin dots),
/// U+05C4..=U+05C5 (upper/lower dots), U+05C7 (qamats qatan). Cantillation
/// marks and punctuation such as maqaf are deliberately *not* in this set;
/// only vowel points are removed when building a consonantal key.
pub const NIQQUD_RANGES: [(char, char); 4] = [
    ('\u{05B0}', '\u{05BC}'),
    ('\u{05C1}', '\u{05C2}'),
    ('\u{05C4}', '\u{05C5}'),
    ('\u{05C7}', '\u{05C7}'),
];

/// Verse-punctuation marks removed before word splitting: sof pasuq,
/// paseq, and nun hafukha.
const VERSE_MARKS: [char; 3] = ['\u{05C3}', '\u{05C0}', '\u{05C6}'];

/// Single-letter prefixes (conjunction ו, article ה, preposition ב) that
/// the root heuristic strips before guessing.
pub const PREFIX_LETTERS: [char; 3] = ['ו', 'ה', 'ב'];

fn is_niqqud(c: char) -> bool {
    NIQQUD_RANGES.iter().any(|&(lo, hi)| c >= lo && c <= hi)
}

/// Strips vowel points from `text`, yielding the consonantal form used as a
/// lexicon key.
///
/// Exactly the characters in [`NIQQUD_RANGES`] are deleted; everything else
/// (consonants, punctuation, non-Hebrew text) is preserved in order. The
/// function is idempotent and the identity on vowel-free input.
pub fn strip_niqqud(text: &str) -> String {
    text.chars().filter(|&c| !is_niqqud(c)).collect()
}

/// Best-effort root guess from a consonantal string.
///
/// Drops one leading [`PREFIX_LETTERS`] character if present, then takes up
/// to the first three remaining characters. This is a display heuristic for
/// words missing from the lexicon, not a morphological analysis; a real
/// lexicon match always takes precedence (see `Lexicon::lookup`).
pub fn guess_root(consonants: &str) -> String {
    let mut chars = consonants.chars().peekable();
    if let Some(&first) = chars.peek() {
        if PREFIX_LETTERS.contains(&first) {
            chars.next();
        }
    }
    chars.take(3).collect()
}

/// Simple letter-by-letter Hebrew-to-Latin transliteration.
///
/// Works on the vowel-stripped form; unmapped characters pass through.
pub fn transliterate(word: &str) -> String {
    strip_niqqud(word)
        .chars()
        .map(|c| match c {
            'א' => "a",
            'ב' => "b",
            'ג' => "g",
            'ד' => "d",
            'ה' => "h",
            'ו' => "v",
            'ז' => "z",
            'ח' => "ch",
            'ט' => "t",
            'י' => "y",
            'כ' => "k",
            'ל' => "l",
            'מ' => "m",
            'נ' => "n",
            'ס' => "s",
            'ע' => "",
            'פ' => "p",
            'צ' => "tz",
            'ק' => "k",
            'ר' => "r",
            'ש' => "sh",
            'ת' => "t",
            'ך' => "k",
            'ם' => "m",
            'ן' => "n",
            'ף' => "f",
            'ץ' => "tz",
            other => return other.to_string(),
        }
        .to_string())
        .collect()
}

/// Splits verse text into words, removing verse-punctuation marks first.
/// Empty tokens are dropped.
pub fn split_words(verse_text: &str) -> Vec<String> {
    verse_text
        .chars()
        .filter(|c| !VERSE_MARKS.contains(c))
        .collect::<String>()
        .split_whitespace()
        .map(String::from)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_all_vowel_points() {
        assert_eq!(strip_niqqud("בָּרָא"), "ברא");
        assert_eq!(strip_niqqud("בְּרֵאשִׁית"), "בראשית");
        assert_eq!(strip_niqqud("אֱלֹהִים"), "אלהים");
    }

    #[test]
    fn identity_on_vowel_free_input() {
        for s in ["ברא", "hello", "", "שלום עולם", "123"] {
            assert_eq!(strip_niqqud(s), s);
        }
    }

    #[test]
    fn idempotent() {
        for s in ["בָּרָא", "וְהָאָרֶץ", "plain", ""] {
            let once = strip_niqqud(s);
            assert_eq!(strip_niqqud(&once), once);
        }
    }

    #[test]
    fn strips_vowels_adjacent_to_maqaf_but_keeps_the_maqaf() {
        // עַל־פְּנֵי contains a maqaf (U+05BE), which is not a vowel point.
        assert_eq!(strip_niqqud("עַל־פְּנֵי"), "על־פני");
    }

    #[test]
    fn cantillation_marks_are_not_stripped() {
        // U+0591 (etnahta) is a cantillation mark, outside NIQQUD_RANGES.
        let with_trope = "ב\u{0591}רא";
        assert_eq!(strip_niqqud(with_trope), with_trope);
    }

    #[test]
    fn root_guess_drops_single_prefix_letter() {
        assert_eq!(guess_root("והארץ"), "האר");
        assert_eq!(guess_root("בראשית"), "ראש");
        assert_eq!(guess_root("השמים"), "שמי");
    }

    #[test]
    fn root_guess_without_prefix_takes_first_three() {
        assert_eq!(guess_root("שלום"), "שלו");
        assert_eq!(guess_root("אור"), "אור");
    }

    #[test]
    fn root_guess_short_remainders() {
        assert_eq!(guess_root("בא"), "א");
        assert_eq!(guess_root("ב"), "");
        assert_eq!(guess_root(""), "");
    }

    #[test]
    fn transliterates_stripped_form() {
        assert_eq!(transliterate("בָּרָא"), "bra");
        assert_eq!(transliterate("שָׁלוֹם"), "shlvm");
    }

    #[test]
    fn transliteration_handles_final_letters() {
        assert_eq!(transliterate("ארץ"), "artz");
        assert_eq!(transliterate("מים"), "mym");
    }

    #[test]
    fn split_words_removes_verse_marks() {
        let verse = "וַיֹּאמֶר אֱלֹהִים יְהִי אוֹר\u{05C3}";
        let words = split_words(verse);
        assert_eq!(words.len(), 4);
        assert!(!words[3].contains('\u{05C3}'));
    }

    #[test]
    fn split_words_drops_empty_tokens() {
        assert!(split_words("  ").is_empty());
        assert_eq!(split_words(" ברא  אלהים ").len(), 2);
    }
}
