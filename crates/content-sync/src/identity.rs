//! Item identity derivation.
//!
//! Codenames must be a pure function of `(content_type, item_name)`:
//! identical inputs across runs yield the identical codename, which is
//! what makes remote lookup-based idempotency possible.

/// Slugify an item name for use in a codename: lower-cased, with each
/// space, hyphen, and ampersand replaced by an underscore.
pub fn slug(name: &str) -> String {
    name.to_lowercase()
        .chars()
        .map(|c| match c {
            ' ' | '-' | '&' => '_',
            other => other,
        })
        .collect()
}

/// The CMS codename for an item: `<content_type>_<slug(item_name)>`.
pub fn item_codename(content_type: &str, item_name: &str) -> String {
    format!("{content_type}_{}", slug(item_name))
}

/// The item name for a row: the `default` column value, or the positional
/// fallback `Item_<row number>` when that value is blank. Row numbers are
/// 1-based physical positions in the file, header included, so the first
/// data row falls back to `Item_2`.
pub fn item_name(default_value: &str, row_number: usize) -> String {
    let trimmed = default_value.trim();
    if trimmed.is_empty() {
        format!("Item_{row_number}")
    } else {
        default_value.to_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slug_lowercases_and_replaces_separators() {
        assert_eq!(slug("Acme Corp"), "acme_corp");
        assert_eq!(slug("South-East Asia"), "south_east_asia");
        assert_eq!(slug("Food & Beverage"), "food___beverage");
    }

    #[test]
    fn slug_leaves_other_characters_alone() {
        assert_eq!(slug("Café24"), "café24");
        assert_eq!(slug("a_b"), "a_b");
    }

    #[test]
    fn codename_prefixes_content_type() {
        assert_eq!(
            item_codename("partner_list", "Acme Corp"),
            "partner_list_acme_corp"
        );
    }

    #[test]
    fn codename_is_deterministic() {
        let first = item_codename("major_market_list", "Hong Kong");
        let second = item_codename("major_market_list", "Hong Kong");
        assert_eq!(first, second);
    }

    #[test]
    fn item_name_uses_default_value() {
        assert_eq!(item_name("Acme Corp", 2), "Acme Corp");
    }

    #[test]
    fn blank_default_falls_back_to_position() {
        assert_eq!(item_name("", 2), "Item_2");
        assert_eq!(item_name("   ", 7), "Item_7");
    }
}
