//! Free-text price predicate.
//!
//! The shop's price box is a plain text field. A product matches when its
//! price text contains the query, or when the price equals the integer the
//! query starts with. An empty query therefore matches everything.

use storefront_catalog::Price;

/// ECMAScript `WhiteSpace` and `LineTerminator` code points. Narrower than
/// [`char::is_whitespace`]: U+0085 is not included.
fn is_js_whitespace(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n'
            | '\u{0b}'
            | '\u{0c}'
            | '\r'
            | ' '
            | '\u{a0}'
            | '\u{1680}'
            | '\u{2000}'..='\u{200a}'
            | '\u{2028}'
            | '\u{2029}'
            | '\u{202f}'
            | '\u{205f}'
            | '\u{3000}'
            | '\u{feff}'
    )
}

/// Base-10 `parseInt` semantics: leading whitespace, one optional sign, then
/// the longest run of ASCII digits. Anything after the digits is ignored; no
/// digits at all gives NaN.
pub fn js_parse_int(text: &str) -> f64 {
    let rest = text.trim_start_matches(is_js_whitespace);

    let (negative, rest) = match rest.as_bytes().first() {
        Some(b'-') => (true, &rest[1..]),
        Some(b'+') => (false, &rest[1..]),
        _ => (false, rest),
    };

    let digits_len = rest.bytes().take_while(u8::is_ascii_digit).count();
    if digits_len == 0 {
        return f64::NAN;
    }

    let magnitude: f64 = rest[..digits_len].parse().unwrap_or(f64::NAN);
    if negative { -magnitude } else { magnitude }
}

/// Whether `price` survives the price box holding `query`.
pub fn price_matches(price: Price, query: &str) -> bool {
    price.to_js_string().contains(query) || price.value() == js_parse_int(query)
}
