//! Markup helpers shared by the widget renderers.
use regex::RegexBuilder;

pub const NAIRA: &str = "\u{20a6}";

pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Escape `text` and wrap every case-insensitive occurrence of `query` in `<strong>`.
pub fn highlight_match(text: &str, query: &str) -> String {
    let query = query.trim();
    if query.is_empty() {
        return escape_html(text);
    }
    let pattern = match RegexBuilder::new(&regex::escape(query))
        .case_insensitive(true)
        .build()
    {
        Ok(re) => re,
        Err(_) => return escape_html(text),
    };

    let mut out = String::with_capacity(text.len() + 16);
    let mut last = 0;
    for m in pattern.find_iter(text) {
        out.push_str(&escape_html(&text[last..m.start()]));
        out.push_str("<strong>");
        out.push_str(&escape_html(m.as_str()));
        out.push_str("</strong>");
        last = m.end();
    }
    out.push_str(&escape_html(&text[last..]));
    out
}

/// Naira amount: `₦1,000` for whole values, `₦1,000.50` otherwise.
pub fn format_price(amount: f64) -> String {
    let negative = amount < 0.0;
    let amount = amount.abs();
    let has_fraction = amount.fract() != 0.0;
    let cents = (amount * 100.0).round() as u64;
    let whole = cents / 100;
    let frac = cents % 100;

    let mut out = String::new();
    if negative {
        out.push('-');
    }
    out.push_str(NAIRA);
    out.push_str(&group_thousands(whole));
    if has_fraction {
        out.push_str(&format!(".{frac:02}"));
    }
    out
}

fn group_thousands(n: u64) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
