//! French calendar labels and amount formatting.

const SHORT_MONTHS: [&str; 12] = [
    "janv.", "févr.", "mars", "avr.", "mai", "juin", "juil.", "août", "sept.", "oct.", "nov.",
    "déc.",
];

const LONG_MONTHS: [&str; 12] = [
    "janvier",
    "février",
    "mars",
    "avril",
    "mai",
    "juin",
    "juillet",
    "août",
    "septembre",
    "octobre",
    "novembre",
    "décembre",
];

/// Abbreviated month name for `month` in `1..=12`, e.g. `"févr."`.
pub fn short_month(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|index| SHORT_MONTHS.get(index as usize))
        .copied()
        .unwrap_or("?")
}

/// Full month name for `month` in `1..=12`, e.g. `"octobre"`.
pub fn long_month(month: u32) -> &'static str {
    month
        .checked_sub(1)
        .and_then(|index| LONG_MONTHS.get(index as usize))
        .copied()
        .unwrap_or("?")
}

pub fn capitalize(value: &str) -> String {
    let mut chars = value.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Groups digits by thousands with a narrow no-break space, as `fr-FR` does.
pub fn format_amount(amount: u64) -> String {
    let digits = amount.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3 * 3);
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            out.push('\u{202F}');
        }
        out.push(digit);
    }
    out
}
