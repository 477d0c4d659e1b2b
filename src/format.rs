// Display helpers for the pt-BR dashboard: money as "R$ 1.234,56", plain
// numbers with "." grouping and "," decimals, dates as dd/mm/yyyy, and names
// in title case with Portuguese connectives kept lowercase.

use chrono::NaiveDate;

/// Words that stay lowercase inside a title-cased name (never the first).
const LOWERCASE_WORDS: &[&str] = &[
    "de", "do", "da", "dos", "das", "e", "em", "no", "na", "a", "o", "ou", "outra", "outras",
    "outro", "outros", "as", "às", "á", "à",
];

/// Group an unsigned integer's digits in threes with `.`.
fn group_thousands(mut n: u64) -> String {
    let mut groups = Vec::new();
    loop {
        let chunk = n % 1000;
        n /= 1000;
        if n == 0 {
            groups.push(chunk.to_string());
            break;
        }
        groups.push(format!("{chunk:03}"));
    }
    groups.reverse();
    groups.join(".")
}

/// `R$ 1.234,56`. Negative values get a leading minus.
pub fn format_brl(value: f64) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    let cents = (value.abs() * 100.0).round() as u64;
    let sign = if value < 0.0 && cents > 0 { "-" } else { "" };
    format!("{sign}R$ {},{:02}", group_thousands(cents / 100), cents % 100)
}

/// pt-BR number with up to three decimals, trailing zeros dropped.
pub fn format_number(value: f64) -> String {
    let value = if value.is_finite() { value } else { 0.0 };
    let thousandths = (value.abs() * 1000.0).round() as u64;
    let sign = if value < 0.0 && thousandths > 0 { "-" } else { "" };
    let int_part = group_thousands(thousandths / 1000);
    let frac = format!("{:03}", thousandths % 1000);
    let frac = frac.trim_end_matches('0');
    if frac.is_empty() {
        format!("{sign}{int_part}")
    } else {
        format!("{sign}{int_part},{frac}")
    }
}

/// `dd/mm/yyyy`, or `-` for the no-date marker.
pub fn format_date(date: Option<NaiveDate>) -> String {
    match date {
        Some(d) => d.format("%d/%m/%Y").to_string(),
        None => "-".to_string(),
    }
}

/// `-` for empty text, the text otherwise.
pub fn or_dash(text: &str) -> &str {
    if text.trim().is_empty() {
        "-"
    } else {
        text
    }
}

/// "SÃO JOSÉ DOS CAMPOS" → "São José dos Campos".
pub fn title_case(text: &str) -> String {
    text.to_lowercase()
        .split(' ')
        .enumerate()
        .map(|(i, word)| {
            if word.is_empty() || (i > 0 && LOWERCASE_WORDS.contains(&word)) {
                return word.to_string();
            }
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}
