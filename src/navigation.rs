//! Page clamping and input parsing for navigation requests.

/// Clamps a requested page into `1..=page_count`.
///
/// Returns `None` for an empty document, where no page can be shown.
pub fn clamp_page(requested: i64, page_count: u32) -> Option<u32> {
    if page_count == 0 {
        return None;
    }
    Some(requested.clamp(1, i64::from(page_count)) as u32)
}

/// Parses a page number the way `parseInt(value, 10)` does.
///
/// Leading whitespace and a sign are accepted and parsing stops at the first
/// non-digit, so `"12abc"` is 12 and `"3.7"` is 3. Input without leading
/// digits yields `None`. Values too large for `i64` saturate.
pub fn parse_page_number(value: &str) -> Option<i64> {
    let trimmed = value.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    let mut seen = false;
    let mut n: i64 = 0;
    for b in digits.bytes() {
        if !b.is_ascii_digit() {
            break;
        }
        seen = true;
        n = n.saturating_mul(10).saturating_add(i64::from(b - b'0'));
    }

    if !seen {
        return None;
    }
    Some(if negative { -n } else { n })
}

/// Keyboard shortcuts handled at window level.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCommand {
    Prev,
    Next,
    ZoomIn,
    ZoomOut,
}

impl KeyCommand {
    /// Zoom shortcuts override the browser's own page zoom.
    pub fn prevents_default(self) -> bool {
        matches!(self, Self::ZoomIn | Self::ZoomOut)
    }
}

/// Maps a `KeyboardEvent.key` value to a command.
pub fn key_command(key: &str, ctrl_or_meta: bool) -> Option<KeyCommand> {
    match key {
        "ArrowLeft" => Some(KeyCommand::Prev),
        "ArrowRight" => Some(KeyCommand::Next),
        "+" if ctrl_or_meta => Some(KeyCommand::ZoomIn),
        "-" if ctrl_or_meta => Some(KeyCommand::ZoomOut),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clamps_into_document() {
        assert_eq!(clamp_page(0, 10), Some(1));
        assert_eq!(clamp_page(999, 10), Some(10));
        assert_eq!(clamp_page(-4, 10), Some(1));
        assert_eq!(clamp_page(7, 10), Some(7));
        assert_eq!(clamp_page(i64::MAX, 3), Some(3));
    }

    #[test]
    fn empty_document_has_no_page() {
        assert_eq!(clamp_page(1, 0), None);
    }

    #[test]
    fn clamp_holds_for_every_request() {
        for count in 1..=12u32 {
            for n in -20..40i64 {
                let page = clamp_page(n, count).unwrap();
                assert!((1..=count).contains(&page));
            }
        }
    }

    #[test]
    fn parse_like_parse_int() {
        assert_eq!(parse_page_number("12"), Some(12));
        assert_eq!(parse_page_number("  7 "), Some(7));
        assert_eq!(parse_page_number("12abc"), Some(12));
        assert_eq!(parse_page_number("3.7"), Some(3));
        assert_eq!(parse_page_number("-2"), Some(-2));
        assert_eq!(parse_page_number("+5"), Some(5));
        assert_eq!(parse_page_number("abc"), None);
        assert_eq!(parse_page_number(""), None);
        assert_eq!(parse_page_number("-"), None);
        assert_eq!(parse_page_number("99999999999999999999999"), Some(i64::MAX));
    }

    #[test]
    fn key_mapping() {
        assert_eq!(key_command("ArrowLeft", false), Some(KeyCommand::Prev));
        assert_eq!(key_command("ArrowRight", true), Some(KeyCommand::Next));
        assert_eq!(key_command("+", true), Some(KeyCommand::ZoomIn));
        assert_eq!(key_command("-", true), Some(KeyCommand::ZoomOut));
        assert_eq!(key_command("+", false), None);
        assert_eq!(key_command("Enter", false), None);
        assert!(KeyCommand::ZoomIn.prevents_default());
        assert!(!KeyCommand::Next.prevents_default());
    }
}
