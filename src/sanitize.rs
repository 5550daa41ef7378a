//! Plain-text sanitization for asset record fields.
//!
//! Titles, captions, and descriptions often arrive from external sources
//! and may carry markup. The host stores these as plain text, so tags and
//! script/style blocks are removed, percent-encoded octets stripped, and
//! whitespace collapsed before any record update.

/// Sanitize a string for storage in a plain-text record field.
///
/// Removes `<script>`/`<style>` elements with their contents, strips all
/// remaining tags, drops `%xx` percent-encoded octets, collapses whitespace
/// runs (including newlines and tabs) to single spaces, and trims.
pub fn sanitize_text(input: &str) -> String {
    let without_blocks = strip_element_blocks(input);
    let without_tags = strip_tags(&without_blocks);
    let without_octets = strip_percent_octets(&without_tags);
    without_octets.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Remove `<script>` and `<style>` elements including their contents.
fn strip_element_blocks(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let lower = input.to_ascii_lowercase();
    let mut pos = 0;

    while pos < input.len() {
        let rest = &lower[pos..];
        let next_block = ["<script", "<style"]
            .iter()
            .filter_map(|open| rest.find(open).map(|at| (at, *open)))
            .min_by_key(|(at, _)| *at);

        let Some((at, open)) = next_block else {
            out.push_str(&input[pos..]);
            break;
        };

        out.push_str(&input[pos..pos + at]);
        let close = if open == "<script" { "</script>" } else { "</style>" };
        match lower[pos + at..].find(close) {
            Some(end) => pos += at + end + close.len(),
            // Unterminated block swallows the rest of the input.
            None => break,
        }
    }

    out
}

/// Remove `<...>` tag spans, keeping the text between them.
fn strip_tags(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_tag = false;
    for ch in input.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            c if !in_tag => out.push(c),
            _ => {}
        }
    }
    out
}

/// Remove `%xx` percent-encoded octets.
fn strip_percent_octets(input: &str) -> String {
    let bytes = input.as_bytes();
    let mut out = String::with_capacity(input.len());
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%'
            && i + 2 < bytes.len()
            && bytes[i + 1].is_ascii_hexdigit()
            && bytes[i + 2].is_ascii_hexdigit()
        {
            i += 3;
            continue;
        }
        // Safe to index: we only advance on char boundaries.
        let ch = input[i..].chars().next().unwrap();
        out.push(ch);
        i += ch.len_utf8();
    }
    out
}
