//! Naming-convention parsing for network interface names.
//!
//! Inventory exports carry no foreign keys between a network interface and
//! the machine it is attached to. Interfaces are matched by name instead:
//! [`normalize`] drops the GUID some providers append, and [`parse_base`]
//! recovers the short machine identifier from the naming conventions in use.

use winnow::{
    Parser as _,
    error::{ContextError, ErrMode},
    token::take_while,
};

type IResult<O> = std::result::Result<O, ErrMode<ContextError>>;

fn is_lower_hex(c: char) -> bool {
    matches!(c, '0'..='9' | 'a'..='f')
}

/// Lowercase GUID in 8-4-4-4-12 form.
fn guid<'s>(input: &mut &'s str) -> IResult<&'s str> {
    (
        take_while(8, is_lower_hex),
        '-',
        take_while(4, is_lower_hex),
        '-',
        take_while(4, is_lower_hex),
        '-',
        take_while(4, is_lower_hex),
        '-',
        take_while(12, is_lower_hex),
    )
        .take()
        .parse_next(input)
}

/// Strips a trailing `.{guid}` suffix from `name`.
///
/// Names without such a suffix are returned unchanged.
///
/// # Examples
///
/// ```
/// use strata_inventory::naming::normalize;
///
/// assert_eq!(normalize("vm01-nic.0f8fad5b-d9cb-469f-a165-70867728950e"), "vm01-nic");
/// assert_eq!(normalize("vm01-nic.tenant"), "vm01-nic.tenant");
/// ```
pub fn normalize(name: &str) -> &str {
    // A GUID contains no dot, so only the text after the last one can match.
    let Some(dot) = name.rfind('.') else {
        return name;
    };

    let mut tail = &name[dot + 1..];
    match guid(&mut tail) {
        Ok(_) if tail.is_empty() => &name[..dot],
        _ => name,
    }
}

/// Extracts the machine identifier embedded in a network interface name.
///
/// The conventions are tried in order and the first one that applies wins:
///
/// 1. `abc.nic...` - everything before the first `.nic`
/// 2. `abc.tenant` - everything before the first `.`
/// 3. `nic-abc-01` gives the second segment; `abc-nic-01` and `abc-01-iac`
///    give the first
/// 4. `abc123_z1` - the part before the first `_` minus its last three characters
/// 5. `abc-01` - everything before the first `-`
///
/// Returns `None` when the selected convention yields an empty identifier.
///
/// # Examples
///
/// ```
/// use strata_inventory::naming::parse_base;
///
/// assert_eq!(parse_base("vm01-nic-01"), Some("vm01"));
/// assert_eq!(parse_base("abc.nic.tenant.domain"), Some("abc"));
/// assert_eq!(parse_base("-nic"), None);
/// ```
pub fn parse_base(name: &str) -> Option<&str> {
    let base = if let Some(index) = name.find(".nic") {
        &name[..index]
    } else if let Some(index) = name.find('.') {
        &name[..index]
    } else if let Some(base) = dash_convention(name) {
        base
    } else if name.contains("_z") {
        let prefix = name.split('_').next().unwrap_or_default();
        drop_last_chars(prefix, 3)
    } else {
        name.split('-').next().unwrap_or_default()
    };

    if base.is_empty() { None } else { Some(base) }
}

fn dash_convention(name: &str) -> Option<&str> {
    let segments: Vec<&str> = name.split('-').collect();
    if segments.len() < 3 {
        return None;
    }
    if segments[0] == "nic" {
        Some(segments[1])
    } else if segments[2] == "iac" || segments[1] == "nic" {
        Some(segments[0])
    } else {
        None
    }
}

fn drop_last_chars(value: &str, count: usize) -> &str {
    let keep = value.chars().count().saturating_sub(count);
    match value.char_indices().nth(keep) {
        Some((index, _)) => &value[..index],
        None => value,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const GUID: &str = "0f8fad5b-d9cb-469f-a165-70867728950e";

    #[test]
    fn test_normalize_strips_guid() {
        assert_eq!(normalize(&format!("appweb01-nic.{GUID}")), "appweb01-nic");
        assert_eq!(normalize(&format!("a.b.{GUID}")), "a.b");
    }

    #[test]
    fn test_normalize_identity() {
        assert_eq!(normalize("appweb01-nic-01"), "appweb01-nic-01");
        assert_eq!(normalize(GUID), GUID);
        // Uppercase hex is not a provider GUID suffix.
        let upper = format!("vm.{}", GUID.to_uppercase());
        assert_eq!(normalize(&upper), upper);
        // Wrong group lengths
        assert_eq!(normalize("vm.0f8fad5-bd9cb-469f-a165-70867728950e"), "vm.0f8fad5-bd9cb-469f-a165-70867728950e");
        // Trailing text after the GUID
        let trailing = format!("vm.{GUID}x");
        assert_eq!(normalize(&trailing), trailing);
    }

    #[test]
    fn test_parse_base_dot_nic() {
        assert_eq!(parse_base("abc.nic.tenant.domain"), Some("abc"));
        assert_eq!(parse_base("a.b.nic"), Some("a.b"));
    }

    #[test]
    fn test_parse_base_dot() {
        assert_eq!(parse_base("appweb01.tenant"), Some("appweb01"));
    }

    #[test]
    fn test_parse_base_dash_conventions() {
        assert_eq!(parse_base("nic-appweb01-01"), Some("appweb01"));
        assert_eq!(parse_base("vm01-nic-01"), Some("vm01"));
        assert_eq!(parse_base("vm01-01-iac"), Some("vm01"));
        assert_eq!(parse_base("appweb01-prd-01-nic-01"), Some("appweb01"));
    }

    #[test]
    fn test_parse_base_zone_suffix() {
        assert_eq!(parse_base("appweb01nic_z1"), Some("appweb01"));
        assert_eq!(parse_base("ab_z1"), None);
    }

    #[test]
    fn test_parse_base_first_dash_fallback() {
        assert_eq!(parse_base("appweb01-nic"), Some("appweb01"));
        assert_eq!(parse_base("appweb01"), Some("appweb01"));
        assert_eq!(parse_base("-nic"), None);
        assert_eq!(parse_base(""), None);
    }

    #[test]
    fn test_guid_stripped_before_base() {
        let name = format!("appweb01-prd-01-nic-01.{GUID}");
        assert_eq!(parse_base(&name), Some(&name[..name.find('.').unwrap()]));
        assert_eq!(parse_base(normalize(&name)), Some("appweb01"));
    }

    proptest! {
        #[test]
        fn prop_normalize_removes_appended_guid(
            name in "[a-z0-9-]{1,24}",
            guid in "[0-9a-f]{8}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{4}-[0-9a-f]{12}",
        ) {
            let suffixed = format!("{name}.{guid}");
            prop_assert_eq!(normalize(&suffixed), name.as_str());
        }

        #[test]
        fn prop_normalize_is_idempotent(name in "[a-z0-9.\\-]{0,40}") {
            let once = normalize(&name);
            prop_assert_eq!(normalize(once), once);
        }

        #[test]
        fn prop_parse_base_is_non_empty_substring(name in "[a-z0-9._\\-]{0,32}") {
            if let Some(base) = parse_base(&name) {
                prop_assert!(!base.is_empty());
                prop_assert!(name.contains(base));
            }
        }
    }
}
