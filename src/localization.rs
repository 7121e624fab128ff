use std::collections::BTreeMap;

/// Apply one incoming per-locale record onto a locale-keyed child map.
///
/// A locale not yet in the map is inserted unconditionally; an existing
/// locale is fully replaced only when `override_existing` is set, otherwise
/// the stored record stays untouched. Sibling locales are never modified.
/// Returns whether the incoming record was written.
pub fn merge<T>(
    map: &mut BTreeMap<String, T>,
    locale: String,
    fields: T,
    override_existing: bool,
) -> bool {
    if map.contains_key(&locale) && !override_existing {
        return false;
    }
    map.insert(locale, fields);
    true
}
