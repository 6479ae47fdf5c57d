/// Punctuation marks removed when the punctuation policy is "strip".
///
/// Entries are applied in table order, each one replaced by a single
/// space wherever it occurs. The two multi-character entries (`--` and
/// `...`) are listed last; every character composing them appears
/// earlier in the table, so by the time they are tried the single
/// characters have already been replaced and they no longer match.
/// This ordering is kept on purpose to reproduce the observed
/// behavior of the reference corpus tooling.
pub const PUNCTUATION: [&str; 37] = [
	"!", ",", ".", ";", ":", "*", "-", "(", ")", "[", "]", "…", "_", "—", "–",
	"“", "”", "‘", "’", "«", "»", "/", "'", "?", "<", ">", "@", "#", "$", "%",
	"^", "&", "`", "~", "|", "--", "...",
];

/// Minimum token length, exclusive. Tokens of 2 characters or fewer are
/// always discarded, whatever the punctuation policy. Fixed rule, not
/// configurable.
const MIN_TOKEN_CHARS: usize = 2;

/// Normalizes raw text into a materialized sequence of tokens.
///
/// # Parameters
/// - `raw_text`: The input text (UTF-8).
/// - `strip_punctuation`: If true, every entry of `PUNCTUATION` is
///   replaced by a space before splitting.
///
/// # Behavior
/// - Lowercases the whole text first.
/// - Splits on Unicode whitespace.
/// - Discards tokens whose character count is <= 2.
///
/// # Notes
/// - Pure function: the same `(raw_text, strip_punctuation)` always
///   yields the same token sequence.
/// - The full token list is materialized because callers build
///   overlapping n-gram windows over it.
pub fn tokenize(raw_text: &str, strip_punctuation: bool) -> Vec<String> {
	let mut text = raw_text.to_lowercase();

	if strip_punctuation {
		for mark in PUNCTUATION {
			if text.contains(mark) {
				text = text.replace(mark, " ");
			}
		}
	}

	text.split_whitespace()
		.filter(|word| word.chars().count() > MIN_TOKEN_CHARS)
		.map(str::to_owned)
		.collect()
}
