//! Small text helpers shared by the UI and tests.

/// Milliseconds as seconds with one decimal ("12.3").
pub fn format_time_ms(ms: u64) -> String {
    format!("{:.1}", ms as f64 / 1000.0)
}

/// "easy" -> "Easy", "playAgain" -> "Play Again".
pub fn to_title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len() + 4);
    for (i, c) in text.chars().enumerate() {
        if i == 0 {
            out.extend(c.to_uppercase());
        } else {
            if c.is_ascii_uppercase() {
                out.push(' ');
            }
            out.push(c);
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn time_has_one_decimal() {
        assert_eq!(format_time_ms(0), "0.0");
        assert_eq!(format_time_ms(100), "0.1");
        assert_eq!(format_time_ms(12_300), "12.3");
    }

    #[test]
    fn title_case_splits_camel_case() {
        assert_eq!(to_title_case("easy"), "Easy");
        assert_eq!(to_title_case("playAgain"), "Play Again");
        assert_eq!(to_title_case(""), "");
    }
}
