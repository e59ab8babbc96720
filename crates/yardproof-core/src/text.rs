//! Marker patterns and text cleanup shared by the extraction strategies.

use regex::Regex;
use std::borrow::Cow;

pub(crate) fn setup_area_regex() -> &'static Regex {
    static RE: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)Setup Area:\s*(?:</[a-z0-9]+>\s*)?([^<\s][^<\r\n]*)").expect("valid regex")
    })
}

pub(crate) fn actual_size_regex() -> &'static Regex {
    static RE: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)Actual Size:\s*(?:</[a-z0-9]+>\s*)?([^<\s][^<\r\n]*)").expect("valid regex")
    })
}

/// `Title[_sep2_]...` is the vendor export's field separator; `Title:` covers plain exports.
/// Marker values may start on the line after the marker; they end at a tag or line break.
pub(crate) fn title_regex() -> &'static Regex {
    static RE: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"Title(?:\[_sep2_\]|:)\s*(?:</[a-z0-9]+>\s*)?([^\[<\s][^\[<\r\n]*)").expect("valid regex")
    })
}

fn title_suffix_regex() -> &'static Regex {
    static RE: std::sync::OnceLock<Regex> = std::sync::OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"(?i)\s+(?:Rentals?|RI|Rhode Island)\b.*$").expect("valid regex")
    })
}

/// Returns the first title captured in `text`, already cleaned. Empty titles count as absent.
pub fn find_title(text: &str) -> Option<String> {
    title_regex()
        .captures_iter(text)
        .filter_map(|caps| caps.get(1))
        .map(|m| clean_title(m.as_str()))
        .next()
        .filter(|t| !t.is_empty())
}

/// Cuts a scraped page title down to the product name.
///
/// `Titanic Princess Castle | Family Fun Rentals` -> `Titanic Princess Castle`.
pub fn clean_title(raw: &str) -> String {
    let decoded: Cow<'_, str> = if raw.contains('&') {
        htmlize::unescape(raw)
    } else {
        Cow::Borrowed(raw)
    };
    let title = decoded.trim();
    let title = title.split('|').next().unwrap_or(title).trim();
    let title = title.split(" - ").next().unwrap_or(title).trim();
    title_suffix_regex().replace(title, "").trim().to_string()
}

/// Byte offset `n` characters before `pos`, clamped to the start of `text`.
pub(crate) fn chars_before(text: &str, pos: usize, n: usize) -> usize {
    if n == 0 {
        return pos;
    }
    text[..pos]
        .char_indices()
        .rev()
        .nth(n - 1)
        .map_or(0, |(idx, _)| idx)
}

/// Byte offset `n` characters after `pos`, clamped to the end of `text`.
pub(crate) fn chars_after(text: &str, pos: usize, n: usize) -> usize {
    text[pos..]
        .char_indices()
        .nth(n)
        .map_or(text.len(), |(idx, _)| pos + idx)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn clean_title_strips_pipe_dash_and_rental_suffix() {
        assert_eq!(
            clean_title(" Titanic Princess Castle | Family Fun Rentals "),
            "Titanic Princess Castle"
        );
        assert_eq!(clean_title("Mega Combo - Wet or Dry"), "Mega Combo");
        assert_eq!(clean_title("Sports Arena Rental RI"), "Sports Arena");
        assert_eq!(clean_title("Shark Bouncer Rhode Island"), "Shark Bouncer");
    }

    #[test]
    fn clean_title_suffixes_match_whole_words_only() {
        assert_eq!(clean_title("Pirate Ship Ride"), "Pirate Ship Ride");
        assert_eq!(clean_title("Castle Rentalz"), "Castle Rentalz");
        assert_eq!(clean_title("Rhode Islander Bouncer"), "Rhode Islander Bouncer");
        assert_eq!(clean_title("Bounce Castle Rentals Newport"), "Bounce Castle");
        assert_eq!(clean_title("Bounce Castle Rental RI"), "Bounce Castle");
    }

    #[test]
    fn clean_title_decodes_entities() {
        assert_eq!(clean_title("Mickey &amp; Friends Castle"), "Mickey & Friends Castle");
    }

    #[test]
    fn find_title_reads_vendor_separator_up_to_next_delimiter() {
        let text = "xx Title[_sep2_]Frozen Castle | Co[_sep1_]Body[_sep2_]...";
        assert_eq!(find_title(text).as_deref(), Some("Frozen Castle"));
        assert_eq!(find_title("no marker here"), None);
        assert_eq!(find_title("Title[_sep2_] | only a trailer"), None);
    }

    #[test]
    fn find_title_skips_line_breaks_after_the_marker() {
        assert_eq!(
            find_title("<b>Title:</b>\n   Shark Bouncer\n<p>").as_deref(),
            Some("Shark Bouncer")
        );
    }

    #[test]
    fn dimension_markers_tolerate_wrapped_markup() {
        let text = "<li><strong>Setup Area:</strong>\r\n    20' L x 20' W x 15' H\n</li>";
        let caps = setup_area_regex().captures(text).unwrap();
        assert_eq!(&caps[1], "20' L x 20' W x 15' H");

        let text = "Actual Size:\n\t13 x 13</li>";
        let caps = actual_size_regex().captures(text).unwrap();
        assert_eq!(&caps[1], "13 x 13");
    }

    #[test]
    fn char_offsets_respect_utf8_boundaries() {
        let text = "a×b×c";
        let mid = text.find('b').unwrap();
        assert_eq!(&text[chars_before(text, mid, 1)..mid], "×");
        assert_eq!(chars_before(text, mid, 100), 0);
        assert_eq!(&text[mid..chars_after(text, mid, 2)], "b×");
        assert_eq!(chars_after(text, mid, 100), text.len());
    }
}
