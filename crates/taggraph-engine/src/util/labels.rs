//! Display-string helpers for node rendering (avatar initials, label
//! truncation). Presentation concerns, but small and logic-bearing enough
//! to keep testable here.

/// Avatar initials: first letters of the first two words, else the first
/// two characters, uppercased.
pub fn initials(name: &str) -> String {
    let mut words = name.split_whitespace();
    match (words.next(), words.next()) {
        (Some(first), Some(second)) => first
            .chars()
            .take(1)
            .chain(second.chars().take(1))
            .flat_map(char::to_uppercase)
            .collect(),
        (Some(only), None) => only.chars().take(2).flat_map(char::to_uppercase).collect(),
        _ => String::new(),
    }
}

/// Ellipsize a label longer than `max` characters.
pub fn truncate(label: &str, max: usize) -> String {
    if label.chars().count() <= max {
        return label.to_string();
    }
    let kept: String = label.chars().take(max.saturating_sub(3)).collect();
    format!("{kept}...")
}
