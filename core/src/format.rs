//! Display formatting for dashboard figures.

/// `$1.2M`, `$350K`, `$900`.
pub fn fmt_currency(n: f64) -> String {
    if n >= 1_000_000.0 {
        format!("${:.1}M", n / 1_000_000.0)
    } else if n >= 1_000.0 {
        format!("${:.0}K", n / 1_000.0)
    } else {
        format!("${n:.0}")
    }
}

/// Fraction as a whole percentage: 0.85 → `85%`.
pub fn fmt_pct(fraction: f64) -> String {
    format!("{:.0}%", fraction * 100.0)
}

pub fn fmt_decimal(n: f64, digits: usize) -> String {
    format!("{n:.digits$}")
}

/// Group digits in threes: 1234567 → `1,234,567`.
pub fn fmt_thousands(n: u64) -> String {
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
