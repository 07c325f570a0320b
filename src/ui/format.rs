/// Group the digits of a non-negative integer in thousands: `1234567` → `1,234,567`.
fn group_thousands(digits: &str) -> String {
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}

/// Whole-dollar amount with thousands separators, e.g. `$123,457`.
pub fn format_usd(amount: f64) -> String {
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    format!("{sign}${}", group_thousands(&format!("{:.0}", rounded.abs())))
}

pub fn format_count(n: usize) -> String {
    group_thousands(&n.to_string())
}
