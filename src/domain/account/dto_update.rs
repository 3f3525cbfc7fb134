use serde::Deserialize;

/// Update command, prior to validation.
#[derive(Debug, Clone, Default)]
pub struct UpdateAccountDto {
    pub id: Option<ProvidedId>,
    pub user_name: Option<String>,
    pub email: Option<String>,
    pub password: Option<String>,
    pub roles: Option<Vec<Option<String>>>,
    pub status: Option<String>,
}

/// An account id as supplied in a request body: a JSON number or a
/// string. Update compares it against the path id after loose integer
/// coercion, not strict equality, so `"7"` and `7` (and `"7x"`) all
/// address account 7.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum ProvidedId {
    Number(f64),
    Text(String),
}

impl ProvidedId {
    /// Coerce to an integer the way `parseInt` would: numbers truncate
    /// toward zero, strings contribute their leading (optionally signed)
    /// digits. Anything without a leading integer yields `None`, and two
    /// `None`s never compare equal.
    pub fn coerce(&self) -> Option<i64> {
        match self {
            Self::Number(n) if n.is_finite() => Some(n.trunc() as i64),
            Self::Number(_) => None,
            Self::Text(s) => parse_leading_int(s),
        }
    }

    /// Whether the value counts as absent for the body-id presence gate:
    /// the number zero and the empty string both do.
    pub fn is_falsy(&self) -> bool {
        match self {
            Self::Number(n) => *n == 0.0,
            Self::Text(s) => s.is_empty(),
        }
    }
}

/// Leading-integer parse: optional surrounding whitespace, optional sign,
/// then as many digits as present. `"42abc"` parses to 42; `"abc"`,
/// `""` and a bare sign parse to nothing.
pub fn parse_leading_int(value: &str) -> Option<i64> {
    let trimmed = value.trim_start();
    let mut chars = trimmed.chars();
    let mut digits = String::new();

    let mut first = chars.next()?;
    if first == '+' || first == '-' {
        if first == '-' {
            digits.push('-');
        }
        first = chars.next()?;
    }
    if !first.is_ascii_digit() {
        return None;
    }
    digits.push(first);
    digits.extend(chars.take_while(|c| c.is_ascii_digit()));

    digits.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_integers() {
        assert_eq!(parse_leading_int("7"), Some(7));
        assert_eq!(parse_leading_int("  42"), Some(42));
        assert_eq!(parse_leading_int("-3"), Some(-3));
        assert_eq!(parse_leading_int("+9"), Some(9));
    }

    #[test]
    fn keeps_leading_digits_only() {
        assert_eq!(parse_leading_int("7abc"), Some(7));
        assert_eq!(parse_leading_int("12.9"), Some(12));
    }

    #[test]
    fn rejects_non_numeric_input() {
        assert_eq!(parse_leading_int(""), None);
        assert_eq!(parse_leading_int("abc"), None);
        assert_eq!(parse_leading_int("-"), None);
        assert_eq!(parse_leading_int("x7"), None);
    }

    #[test]
    fn coerces_numbers_and_strings_alike() {
        assert_eq!(ProvidedId::Number(7.0).coerce(), Some(7));
        assert_eq!(ProvidedId::Number(7.9).coerce(), Some(7));
        assert_eq!(ProvidedId::Text("7".into()).coerce(), Some(7));
        assert_eq!(ProvidedId::Text("7abc".into()).coerce(), Some(7));
        assert_eq!(ProvidedId::Text("abc".into()).coerce(), None);
    }

    #[test]
    fn falsy_values() {
        assert!(ProvidedId::Number(0.0).is_falsy());
        assert!(ProvidedId::Text(String::new()).is_falsy());
        assert!(!ProvidedId::Number(1.0).is_falsy());
        assert!(!ProvidedId::Text("0".into()).is_falsy());
    }
}
