pub fn format_number(value: u64) -> String {
    group_digits(&value.to_string())
}

pub fn format_currency(value: u64) -> String {
    format!("${}", format_number(value))
}

// Groups the integer part of a chart value; any fraction is kept as-is.
pub fn format_value(value: f64) -> String {
    let raw = value.to_string();
    let (sign, unsigned) = match raw.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", raw.as_str()),
    };
    match unsigned.split_once('.') {
        Some((whole, fraction)) => format!("{sign}{}.{fraction}", group_digits(whole)),
        None => format!("{sign}{}", group_digits(unsigned)),
    }
}

pub fn format_value_currency(value: f64) -> String {
    let formatted = format_value(value);
    match formatted.strip_prefix('-') {
        Some(rest) => format!("-${rest}"),
        None => format!("${formatted}"),
    }
}

pub fn format_percent(value: f64) -> String {
    format!("{}%", value.round() as i64)
}

fn group_digits(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (idx, ch) in digits.chars().enumerate() {
        if idx > 0 && (len - idx) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
