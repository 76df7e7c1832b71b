/// Number of spaces between inserted paragraph breaks.
pub const PARAGRAPH_SPACE_INTERVAL: usize = 100;

/// Insert a paragraph break after every 100th space in `text`.
///
/// Whisper output arrives as one unbroken run of text; this makes long
/// transcripts readable without touching the words themselves.
pub fn paragraphize(text: &str) -> String {
    paragraphize_every(text, PARAGRAPH_SPACE_INTERVAL)
}

/// Insert `"\n\n"` immediately after every `interval`th space character,
/// scanning left to right. Other whitespace is untouched. The space itself
/// is kept.
pub fn paragraphize_every(text: &str, interval: usize) -> String {
    if interval == 0 {
        return text.to_string();
    }

    let mut out = String::with_capacity(text.len() + text.len() / interval);
    let mut spaces = 0usize;
    for ch in text.chars() {
        out.push(ch);
        if ch == ' ' {
            spaces += 1;
            if spaces % interval == 0 {
                out.push_str("\n\n");
            }
        }
    }
    out
}
