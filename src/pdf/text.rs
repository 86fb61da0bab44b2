//! Markup to plain text lines.

/// Elements whose start or end breaks the line.
const BLOCK_TAGS: &[&str] = &[
    "address", "article", "br", "div", "footer", "h1", "h2", "h3", "h4", "h5", "h6", "header",
    "hr", "li", "ol", "p", "section", "table", "tbody", "thead", "tfoot", "tr", "ul",
];

/// Elements whose content is dropped entirely.
const SKIPPED_TAGS: &[&str] = &["head", "script", "style", "title"];

/// Extract visible text from HTML-like markup, one entry per non-empty line.
///
/// Block elements start new lines, table cells are separated by spaces and
/// runs of whitespace collapse to a single space.
pub fn markup_to_lines(markup: &str) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();
    let mut rest = markup;

    while let Some(start) = rest.find('<') {
        push_text(&mut current, &rest[..start]);
        let after = &rest[start + 1..];

        if let Some(comment) = after.strip_prefix("!--") {
            rest = comment.find("-->").map_or("", |end| &comment[end + 3..]);
            continue;
        }

        let Some(end) = after.find('>') else {
            // Unterminated tag: treat the remainder as text.
            push_text(&mut current, &rest[start..]);
            rest = "";
            break;
        };
        let tag = &after[..end];
        rest = &after[end + 1..];

        let name = tag_name(tag);
        if SKIPPED_TAGS.contains(&name.as_str()) && !tag.starts_with('/') && !tag.ends_with('/') {
            let closing = format!("</{name}");
            rest = find_ci(rest, &closing)
                .and_then(|pos| rest[pos..].find('>').map(|gt| &rest[pos + gt + 1..]))
                .unwrap_or("");
            continue;
        }
        if BLOCK_TAGS.contains(&name.as_str()) {
            flush(&mut lines, &mut current);
        } else if (name == "td" || name == "th") && !current.is_empty() && !current.ends_with(' ') {
            current.push(' ');
        }
    }
    push_text(&mut current, rest);
    flush(&mut lines, &mut current);
    lines
}

/// Split a line into chunks of at most `width` characters, breaking at spaces
/// where possible.
pub fn wrap(line: &str, width: usize) -> Vec<String> {
    let mut out = Vec::new();
    let mut current = String::new();
    for word in line.split(' ') {
        let mut word = word;
        while word.chars().count() > width {
            if !current.is_empty() {
                out.push(std::mem::take(&mut current));
            }
            let split = word
                .char_indices()
                .nth(width)
                .map_or(word.len(), |(i, _)| i);
            out.push(word[..split].to_string());
            word = &word[split..];
        }
        let needed = current.chars().count() + usize::from(!current.is_empty()) + word.chars().count();
        if needed > width && !current.is_empty() {
            out.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }
    if !current.is_empty() {
        out.push(current);
    }
    out
}

fn tag_name(tag: &str) -> String {
    tag.trim_start_matches('/')
        .split(|c: char| c.is_whitespace() || c == '/')
        .next()
        .unwrap_or("")
        .to_ascii_lowercase()
}

fn find_ci(haystack: &str, needle: &str) -> Option<usize> {
    haystack
        .to_ascii_lowercase()
        .find(&needle.to_ascii_lowercase())
}

fn push_text(current: &mut String, raw: &str) {
    let decoded = decode_entities(raw);
    for c in decoded.chars() {
        if c.is_whitespace() {
            if !current.is_empty() && !current.ends_with(' ') {
                current.push(' ');
            }
        } else {
            current.push(c);
        }
    }
}

fn flush(lines: &mut Vec<String>, current: &mut String) {
    let line = current.trim();
    if !line.is_empty() {
        lines.push(line.to_string());
    }
    current.clear();
}

fn decode_entities(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp + 1..];
        match after.find(';').filter(|&semi| semi <= 10) {
            Some(semi) => match decode_entity(&after[..semi]) {
                Some(c) => {
                    out.push(c);
                    rest = &after[semi + 1..];
                }
                None => {
                    out.push('&');
                    rest = after;
                }
            },
            None => {
                out.push('&');
                rest = after;
            }
        }
    }
    out.push_str(rest);
    out
}

fn decode_entity(entity: &str) -> Option<char> {
    if let Some(num) = entity.strip_prefix('#') {
        let code = match num.strip_prefix(['x', 'X']) {
            Some(hex) => u32::from_str_radix(hex, 16).ok()?,
            None => num.parse().ok()?,
        };
        return char::from_u32(code);
    }
    match entity {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        "nbsp" => Some(' '),
        "copy" => Some('©'),
        "deg" => Some('°'),
        "ordm" => Some('º'),
        "ntilde" => Some('ñ'),
        "Ntilde" => Some('Ñ'),
        _ => None,
    }
}
