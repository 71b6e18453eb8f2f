// Character-bounded chunking of normalized document text.
//
// Chunks exist to cap how much text the tokenizer holds at once. They never
// overlap and always cut on a char boundary. With `snap_to_whitespace` the cut
// moves back to just after the last whitespace inside the window, so no word
// is split in half; a window with no whitespace is cut hard.

/// Default chunk bound, in characters.
pub const DEFAULT_CHUNK_SIZE: usize = 500_000;

/// Iterator over consecutive, non-overlapping slices of at most `size` chars.
#[derive(Debug, Clone)]
pub struct Chunks<'a> {
    text: &'a str,
    pos: usize,
    size: usize,
    snap_to_whitespace: bool,
}

/// Split `text` into chunks of at most `size` characters. `size` must be > 0.
pub fn chunks(text: &str, size: usize, snap_to_whitespace: bool) -> Chunks<'_> {
    debug_assert!(size > 0, "chunk size must be positive");
    Chunks {
        text,
        pos: 0,
        size: size.max(1),
        snap_to_whitespace,
    }
}

impl<'a> Iterator for Chunks<'a> {
    type Item = &'a str;

    fn next(&mut self) -> Option<Self::Item> {
        let rest = &self.text[self.pos..];
        if rest.is_empty() {
            return None;
        }

        let mut cut = match rest.char_indices().nth(self.size) {
            Some((byte, _)) => byte,
            None => rest.len(),
        };

        if self.snap_to_whitespace && cut < rest.len() {
            if let Some((ws, ch)) = rest[..cut]
                .char_indices()
                .rev()
                .find(|(_, c)| c.is_whitespace())
            {
                cut = ws + ch.len_utf8();
            }
        }

        self.pos += cut;
        Some(&rest[..cut])
    }
}
