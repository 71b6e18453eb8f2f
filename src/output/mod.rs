// Output: per-document result files and terminal display.

pub mod report;
pub mod terminal;

/// Fit a category name, document name, or error message into a fixed-width
/// terminal column, cutting at `max_chars` characters and marking the cut
/// with "...".
///
/// Counts characters, not bytes: German report names like
/// "Ökobilanz_Bericht.pdf" would otherwise be cut mid-character.
pub fn truncate_chars(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}...", &text[..cut]),
        None => text.to_string(),
    }
}
