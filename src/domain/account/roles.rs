//! Role-set codec
//!
//! Roles travel through the API as an ordered list of strings but are
//! stored as a single `;`-delimited column. Null entries are dropped on
//! encode; decode splits literally and never re-filters, so the codec is
//! intentionally not invertible for inputs containing nulls.

/// Delimiter used in the storage representation.
pub const ROLE_DELIMITER: char = ';';

/// Role granted when a request supplies no usable roles.
pub const DEFAULT_ROLE: &str = "user";

/// Encode an ordered role list into its storage string.
///
/// `None` entries are skipped; remaining entries are joined with the
/// delimiter in input order. An empty or all-`None` input yields `""`.
pub fn encode(roles: &[Option<String>]) -> String {
    roles
        .iter()
        .filter_map(|r| r.as_deref())
        .collect::<Vec<_>>()
        .join(&ROLE_DELIMITER.to_string())
}

/// Decode a storage string back into the role list.
///
/// The empty string decodes to an empty list. Anything else is split on
/// the delimiter, keeping empty segments literally.
pub fn decode(stored: &str) -> Vec<String> {
    if stored.is_empty() {
        return Vec::new();
    }
    stored.split(ROLE_DELIMITER).map(String::from).collect()
}

/// Whether a submitted role list is unusable: absent, empty, or empty
/// after dropping null entries.
pub fn is_effectively_empty(roles: Option<&[Option<String>]>) -> bool {
    match roles {
        None => true,
        Some(list) => !list.iter().any(|r| r.is_some()),
    }
}

/// Storage string for a submitted role list, falling back to the default
/// role when the list is unusable. Never returns an empty string, so an
/// empty role set can never reach the store.
pub fn encode_or_default(roles: Option<&[Option<String>]>) -> String {
    match roles {
        Some(list) if !is_effectively_empty(Some(list)) => encode(list),
        _ => DEFAULT_ROLE.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn some(values: &[&str]) -> Vec<Option<String>> {
        values.iter().map(|v| Some(v.to_string())).collect()
    }

    #[test]
    fn encode_joins_in_order() {
        assert_eq!(encode(&some(&["user", "admin"])), "user;admin");
        assert_eq!(encode(&some(&["admin"])), "admin");
    }

    #[test]
    fn encode_skips_null_entries() {
        let roles = vec![None, Some("user".to_string()), None, Some("admin".to_string())];
        assert_eq!(encode(&roles), "user;admin");
    }

    #[test]
    fn encode_empty_inputs_yield_empty_string() {
        assert_eq!(encode(&[]), "");
        assert_eq!(encode(&[None, None]), "");
    }

    #[test]
    fn decode_empty_string_yields_empty_list() {
        assert_eq!(decode(""), Vec::<String>::new());
    }

    #[test]
    fn decode_keeps_empty_segments() {
        assert_eq!(decode(";admin"), vec!["", "admin"]);
        assert_eq!(decode("user;;admin"), vec!["user", "", "admin"]);
    }

    #[test]
    fn round_trip_holds_for_non_null_lists() {
        for list in [
            vec!["user"],
            vec!["user", "admin"],
            vec!["a", "b", "c"],
        ] {
            let input = some(&list);
            let decoded = decode(&encode(&input));
            assert_eq!(decoded, list);
        }
    }

    #[test]
    fn round_trip_drops_nulls_by_design() {
        let input = vec![Some("user".to_string()), None];
        assert_eq!(decode(&encode(&input)), vec!["user"]);
    }

    #[test]
    fn effectively_empty_detection() {
        assert!(is_effectively_empty(None));
        assert!(is_effectively_empty(Some(&[])));
        assert!(is_effectively_empty(Some(&[None, None][..])));
        assert!(!is_effectively_empty(Some(
            &[None, Some("user".to_string())][..]
        )));
    }

    #[test]
    fn encode_or_default_never_empty() {
        assert_eq!(encode_or_default(None), "user");
        assert_eq!(encode_or_default(Some(&[])), "user");
        assert_eq!(encode_or_default(Some(&[None][..])), "user");
        let roles = vec![Some("operator".to_string())];
        assert_eq!(encode_or_default(Some(&roles)), "operator");
    }
}
