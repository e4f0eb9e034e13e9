//! Small text helpers shared by the pages

/// Parse the leading integer of `input` the way the page forms always
/// have: surrounding whitespace is skipped, an optional sign is allowed,
/// a `0x`/`0X` prefix switches to hex, and anything after the digits is
/// ignored. Returns `None` when no digit is found or the value overflows.
pub fn parse_int(input: &str) -> Option<i64> {
    let s = input.trim_start();
    let (negative, s) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let (radix, digits) = if s.len() >= 2 && (s.starts_with("0x") || s.starts_with("0X")) {
        (16, &s[2..])
    } else {
        (10, s)
    };

    let end = digits
        .char_indices()
        .find(|(_, c)| !c.is_digit(radix))
        .map(|(i, _)| i)
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }

    let magnitude = i64::from_str_radix(&digits[..end], radix).ok()?;
    Some(if negative { -magnitude } else { magnitude })
}

/// Escape text for insertion into markup
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_int_decimal() {
        assert_eq!(parse_int("42"), Some(42));
        assert_eq!(parse_int("  7"), Some(7));
        assert_eq!(parse_int("-5"), Some(-5));
        assert_eq!(parse_int("+3"), Some(3));
        assert_eq!(parse_int("12abc"), Some(12));
        assert_eq!(parse_int("1e3"), Some(1));
    }

    #[test]
    fn test_parse_int_hex() {
        assert_eq!(parse_int("0x1F"), Some(31));
        assert_eq!(parse_int("0Xff"), Some(255));
        assert_eq!(parse_int("0x"), None);
    }

    #[test]
    fn test_parse_int_rejects() {
        assert_eq!(parse_int(""), None);
        assert_eq!(parse_int("abc"), None);
        assert_eq!(parse_int("-"), None);
        assert_eq!(parse_int(" . 5"), None);
        assert_eq!(parse_int("99999999999999999999"), None);
    }

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("Tom & <Jerry>"), "Tom &amp; &lt;Jerry&gt;");
        assert_eq!(escape_html("plain"), "plain");
    }
}
