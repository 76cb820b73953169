/*!
Repair of punctuation that was UTF-8 encoded and then decoded as Windows-1252.

Survey exports often carry text such as `itâ€™s` instead of `it’s`. The
repair is a fixed list of literal replacements. It is cosmetic: anything that
is not in the list goes through untouched.
*/

/// Ordered replacements.
///
/// The residual patterns (`Ã¢â‚¬` and `â€`) are prefixes of the other
/// entries of their group and must stay at the end of it.
const REPAIRS: &[(&str, &str)] = &[
    // Text that went through the bad decoding twice.
    ("\u{c3}\u{a2}\u{e2}\u{201a}\u{ac}\u{e2}\u{201e}\u{a2}", "'"),
    ("\u{c3}\u{a2}\u{e2}\u{201a}\u{ac}\u{cb}\u{153}", "'"),
    ("\u{c3}\u{a2}\u{e2}\u{201a}\u{ac}\u{c5}\u{201c}", "\""),
    ("\u{c3}\u{a2}\u{e2}\u{201a}\u{ac}\u{c2}\u{9d}", "\""),
    ("\u{c3}\u{a2}\u{e2}\u{201a}\u{ac}\u{e2}\u{20ac}\u{153}", "-"),
    ("\u{c3}\u{a2}\u{e2}\u{201a}\u{ac}\u{e2}\u{20ac}\u{9d}", "-"),
    ("\u{c3}\u{a2}\u{e2}\u{201a}\u{ac}\u{c2}\u{a6}", "..."),
    ("\u{c3}\u{a2}\u{e2}\u{201a}\u{ac}\u{c2}", "\""),
    ("\u{c3}\u{a2}\u{e2}\u{201a}\u{ac}", "\""),
    // Right single quote.
    ("\u{e2}\u{20ac}\u{2122}", "'"),
    // Left single quote.
    ("\u{e2}\u{20ac}\u{2dc}", "'"),
    // Left double quote.
    ("\u{e2}\u{20ac}\u{153}", "\""),
    // En dash, em dash, ellipsis.
    ("\u{e2}\u{20ac}\u{201c}", "-"),
    ("\u{e2}\u{20ac}\u{201d}", "-"),
    ("\u{e2}\u{20ac}\u{a6}", "..."),
    // Right double quote, with or without its undecodable last byte.
    ("\u{e2}\u{20ac}\u{9d}", "\""),
    ("\u{e2}\u{20ac}", "\""),
];

/// Repairs a possibly absent piece of text. Absent text becomes the empty string.
pub fn repair(raw: Option<&str>) -> String {
    match raw {
        Some(s) => repair_str(s),
        None => String::new(),
    }
}

pub fn repair_str(raw: &str) -> String {
    // Most responses are clean: skip the allocations.
    if !raw.contains('\u{e2}') {
        return raw.to_string();
    }
    let mut text = raw.to_string();
    for (pattern, replacement) in REPAIRS {
        if text.contains(pattern) {
            text = text.replace(pattern, replacement);
        }
    }
    text
}
