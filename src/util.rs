/// Take the first `max_chars` characters of a string, flattening newlines
/// and appending an ellipsis when anything was cut
pub fn excerpt(text: &str, max_chars: usize) -> String {
    let flat = text.replace('\n', " ");
    let mut out: String = flat.chars().take(max_chars).collect();
    if flat.chars().count() > max_chars {
        out.push_str("...");
    }
    out
}
