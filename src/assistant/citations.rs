/// Remove backend-inserted citation markers (`【 … 】` spans) from an answer
/// and trim surrounding whitespace.
///
/// Best-effort cleanup: absence of markers is a no-op, and an unmatched
/// opening bracket is left in place rather than truncating the text.
pub fn strip_citation_markers(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut rest = text;

    while let Some(start) = rest.find('【') {
        out.push_str(&rest[..start]);
        rest = &rest[start..];
        match rest.find('】') {
            Some(end) => {
                rest = &rest[end + '】'.len_utf8()..];
            }
            None => break,
        }
    }

    out.push_str(rest);
    out.trim().to_string()
}
