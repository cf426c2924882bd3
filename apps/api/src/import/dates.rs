//! Normalizes locale-mixed date tokens to `MM/YYYY` or `Present`.

/// Keywords LinkedIn prints for an ongoing position.
pub const OPEN_ENDED: &[&str] = &["present", "heute", "angestellt"];

/// Month names and abbreviations, German and English, lowercase.
pub const MONTHS: &[(&str, &str)] = &[
    ("januar", "01"),
    ("january", "01"),
    ("jan", "01"),
    ("februar", "02"),
    ("february", "02"),
    ("feb", "02"),
    ("märz", "03"),
    ("march", "03"),
    ("mar", "03"),
    ("april", "04"),
    ("apr", "04"),
    ("mai", "05"),
    ("may", "05"),
    ("juni", "06"),
    ("june", "06"),
    ("jun", "06"),
    ("juli", "07"),
    ("july", "07"),
    ("jul", "07"),
    ("august", "08"),
    ("aug", "08"),
    ("september", "09"),
    ("sept", "09"),
    ("sep", "09"),
    ("oktober", "10"),
    ("october", "10"),
    ("oct", "10"),
    ("november", "11"),
    ("nov", "11"),
    ("dezember", "12"),
    ("december", "12"),
    ("dec", "12"),
];

pub const PRESENT: &str = "Present";

pub fn month_number(word: &str) -> Option<&'static str> {
    MONTHS
        .iter()
        .find(|(name, _)| *name == word)
        .map(|(_, number)| *number)
}

fn is_year(token: &str) -> bool {
    token.len() == 4 && token.bytes().all(|b| b.is_ascii_digit())
}

/// Drops a trailing parenthetical annotation such as `(3 Jahre 2 Monate)`.
pub fn strip_annotation(text: &str) -> &str {
    text.split(" (").next().unwrap_or(text)
}

/// Converts a single date token. Tokens that cannot be interpreted are
/// returned cleaned but otherwise unchanged so nothing is lost.
pub fn normalize_date(raw: &str) -> String {
    let collapsed = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    let clean = strip_annotation(&collapsed);
    let lower = clean.to_lowercase();

    if OPEN_ENDED.contains(&lower.as_str()) {
        return PRESENT.to_string();
    }

    let parts: Vec<&str> = lower.split(' ').collect();
    if let [month, year] = parts.as_slice() {
        if let Some(mm) = month_number(month) {
            if is_year(year) {
                return format!("{mm}/{year}");
            }
        }
    }

    clean.to_string()
}

/// True for values `normalize_date` fully understood.
pub fn is_normalized(value: &str) -> bool {
    if value == PRESENT {
        return true;
    }
    match value.split_once('/') {
        Some((mm, year)) => {
            mm.len() == 2
                && MONTHS.iter().any(|(_, number)| *number == mm)
                && is_year(year)
        }
        None => false,
    }
}
