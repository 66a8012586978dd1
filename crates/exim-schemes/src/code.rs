use std::fmt;

/// Parsed form of a scheme code string.
///
/// Directory entries take the shape `"NN - NAME"`. The numeric prefix is
/// the stable regulatory code; the free-text name varies between directory
/// revisions (some stored values carry stray trailing whitespace or
/// appended keywords), so classification keys on the number alone.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemeCode {
    pub code: u16,
    pub name: String,
}

impl SchemeCode {
    /// Parse a scheme code string, tolerating surrounding whitespace.
    /// Returns `None` when no leading numeric code is present.
    pub fn parse(value: &str) -> Option<Self> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return None;
        }

        let digits: String = trimmed.chars().take_while(char::is_ascii_digit).collect();
        if digits.is_empty() {
            return None;
        }
        let code = digits.parse::<u16>().ok()?;

        let rest = trimmed[digits.len()..]
            .trim_start()
            .trim_start_matches('-')
            .trim();
        Some(Self {
            code,
            name: rest.to_string(),
        })
    }
}

impl fmt::Display for SchemeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:02} - {}", self.code, self.name)
    }
}
