/// Picks the delimiter used when quoting `s`: single quotes unless the text
/// contains a single quote and no double quote.
pub(crate) fn quote_char(s: &str) -> char {
    if s.contains('\'') && !s.contains('"') {
        '"'
    } else {
        '\''
    }
}

pub(crate) fn push_escaped(out: &mut String, c: char, quote: char) {
    match c {
        '\\' => out.push_str("\\\\"),
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        '\t' => out.push_str("\\t"),
        c if c == quote => {
            out.push('\\');
            out.push(c);
        }
        c => out.push(c),
    }
}

/// Renders `s` as a quoted, escaped literal (`'it''s'` becomes `"it's"`).
pub(crate) fn quoted(s: &str) -> String {
    let quote = quote_char(s);
    let mut out = String::with_capacity(s.len() + 2);
    out.push(quote);
    for c in s.chars() {
        push_escaped(&mut out, c, quote);
    }
    out.push(quote);
    out
}
