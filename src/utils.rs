// src/utils.rs
use std::net::Ipv6Addr;

/// `host:port`, bracketing bare IPv6 literals so the result resolves.
pub fn format_query_address(host: &str, port: u16) -> String {
    match host.parse::<Ipv6Addr>() {
        Ok(_) => format!("[{}]:{}", host, port),
        Err(_) => format!("{}:{}", host, port),
    }
}

/// Permissive integer coercion: skips leading whitespace, takes an optional
/// sign and the longest run of leading digits. Anything unparseable is 0,
/// overflow saturates.
pub fn coerce_int(raw: &str) -> i64 {
    let trimmed = raw.trim_start();
    let (negative, digits) = match trimmed.as_bytes().first() {
        Some(b'-') => (true, &trimmed[1..]),
        Some(b'+') => (false, &trimmed[1..]),
        _ => (false, trimmed),
    };

    digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0i64, |acc, b| {
            let digit = i64::from(b - b'0');
            if negative {
                acc.saturating_mul(10).saturating_sub(digit)
            } else {
                acc.saturating_mul(10).saturating_add(digit)
            }
        })
}

/// Formats with `,` thousands separators and `decimals` fraction digits,
/// rounding half away from zero.
pub fn number_format(value: f64, decimals: usize) -> String {
    let factor = 10f64.powi(decimals as i32);
    let rounded = (value.abs() * factor).round() / factor;
    let formatted = format!("{:.*}", decimals, rounded);

    let (int_part, frac_part) = match formatted.split_once('.') {
        Some((int_part, frac_part)) => (int_part, Some(frac_part)),
        None => (formatted.as_str(), None),
    };

    let mut out = String::with_capacity(formatted.len() + int_part.len() / 3 + 1);
    if value < 0.0 && rounded != 0.0 {
        out.push('-');
    }
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(frac_part) = frac_part {
        out.push('.');
        out.push_str(frac_part);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brackets_ipv6_literals() {
        assert_eq!(format_query_address("::1", 25565), "[::1]:25565");
        assert_eq!(format_query_address("127.0.0.1", 25565), "127.0.0.1:25565");
        assert_eq!(format_query_address("mc.example.org", 19132), "mc.example.org:19132");
    }

    #[test]
    fn coerces_leading_digits() {
        assert_eq!(coerce_int("123456789"), 123_456_789);
        assert_eq!(coerce_int("9513307\0"), 9_513_307);
        assert_eq!(coerce_int("  -42abc"), -42);
        assert_eq!(coerce_int("+7"), 7);
    }

    #[test]
    fn coerces_garbage_to_zero() {
        assert_eq!(coerce_int(""), 0);
        assert_eq!(coerce_int("abc"), 0);
        assert_eq!(coerce_int("-"), 0);
    }

    #[test]
    fn coercion_saturates() {
        assert_eq!(coerce_int("99999999999999999999999"), i64::MAX);
        assert_eq!(coerce_int("-99999999999999999999999"), i64::MIN);
    }

    #[test]
    fn formats_thousands_and_decimals() {
        assert_eq!(number_format(0.0, 0), "0");
        assert_eq!(number_format(999.0, 0), "999");
        assert_eq!(number_format(1234567.0, 0), "1,234,567");
        assert_eq!(number_format(1234.5678, 2), "1,234.57");
        assert_eq!(number_format(2.5, 0), "3");
        assert_eq!(number_format(-1500.0, 0), "-1,500");
        assert_eq!(number_format(-0.001, 2), "0.00");
    }
}
