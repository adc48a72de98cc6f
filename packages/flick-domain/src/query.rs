use regex::Regex;

const LEAD_IN_PHRASES: [&str; 4] =
	["can you tell me about", "what do you know about", "information on", "details about"];
const STRIPPED_PUNCTUATION: [char; 3] = ['?', '.', ','];

/// Turns a conversational question into a search term.
///
/// Lead-in phrases are removed case-insensitively wherever they occur, then `?`, `.` and `,` are
/// dropped and surrounding whitespace is trimmed.
pub fn clean(query: &str) -> String {
	let pattern = format!("(?i){}", LEAD_IN_PHRASES.map(regex::escape).join("|"));
	let stripped = Regex::new(&pattern)
		.map(|re| re.replace_all(query, "").into_owned())
		.unwrap_or_else(|_| query.to_string());

	stripped.replace(STRIPPED_PUNCTUATION, "").trim().to_string()
}
