use serde_json::Value;

/// Wrap newline-delimited JSON objects into a single JSON array literal.
/// Blank lines (LF or CRLF, anywhere in the input) contribute no element.
/// The text is not parsed here; malformed lines surface when the array is parsed.
pub fn normalize_jsonl(data: &str) -> String {
    let mut out = String::with_capacity(data.len() + 2);
    out.push('[');
    let mut first = true;
    for line in data.lines() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        if !first {
            out.push(',');
        }
        out.push_str(line);
        first = false;
    }
    out.push(']');
    out
}

/// Normalize and parse JSONL into its records, in line order.
pub fn parse_jsonl(data: &str) -> serde_json::Result<Vec<Value>> {
    serde_json::from_str(&normalize_jsonl(data))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_lines_without_stray_commas() {
        let input = "\r\n{\"a\":1}\r\n\n{\"b\":2}\n\n";
        assert_eq!(normalize_jsonl(input), "[{\"a\":1},{\"b\":2}]");
    }

    #[test]
    fn empty_input_is_empty_array() {
        assert_eq!(normalize_jsonl(""), "[]");
        assert_eq!(normalize_jsonl("\n\r\n  \n"), "[]");
        assert!(parse_jsonl("\n").unwrap().is_empty());
    }

    #[test]
    fn broken_line_fails_to_parse() {
        assert!(parse_jsonl("{\"a\":1}\n{\"b\":\n").is_err());
    }
}
