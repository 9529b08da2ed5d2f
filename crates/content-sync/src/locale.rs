/// The locale code that supplies the item name and the fallback value.
pub const DEFAULT_LOCALE: &str = "default";

/// Errors that can occur when building a locale map.
#[derive(Debug, thiserror::Error)]
pub enum LocaleMapError {
    #[error("locale map has no \"{DEFAULT_LOCALE}\" entry")]
    MissingDefault,

    #[error("duplicate locale code: {0}")]
    DuplicateCode(String),
}

/// One configured locale: the CSV column code and the language identifier
/// the CMS uses for it. A locale with no identifier still names a CSV
/// column but is skipped during variant publication.
#[derive(Debug, Clone)]
pub struct LocaleEntry {
    pub code: String,
    pub language_id: Option<String>,
}

/// Ordered mapping from locale code to CMS language identifier.
///
/// Order is significant: the processing pass assigns locale codes to CSV
/// columns positionally in map order. Exactly one entry must be keyed
/// `default`; it supplies the item name and the fallback value.
#[derive(Debug, Clone)]
pub struct LocaleMap {
    entries: Vec<LocaleEntry>,
}

impl LocaleMap {
    pub fn new(entries: Vec<LocaleEntry>) -> Result<Self, LocaleMapError> {
        let mut seen = Vec::with_capacity(entries.len());
        for entry in &entries {
            if seen.contains(&entry.code.as_str()) {
                return Err(LocaleMapError::DuplicateCode(entry.code.clone()));
            }
            seen.push(entry.code.as_str());
        }

        if !seen.contains(&DEFAULT_LOCALE) {
            return Err(LocaleMapError::MissingDefault);
        }

        Ok(Self { entries })
    }

    /// The standard market map: `default` plus the five localized markets,
    /// each mapped to its own code as the CMS language identifier.
    pub fn markets() -> Self {
        let codes = ["default", "zh-HK", "zh-TW", "ko-KR", "ja-JP", "es-MX"];
        let entries = codes
            .iter()
            .map(|code| LocaleEntry {
                code: (*code).to_owned(),
                language_id: Some((*code).to_owned()),
            })
            .collect();

        Self::new(entries).expect("market map is well-formed")
    }

    /// Locale codes in configured (column) order.
    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|entry| entry.code.as_str())
    }

    /// Entries in configured order.
    pub fn entries(&self) -> &[LocaleEntry] {
        &self.entries
    }

    /// The CMS language identifier for a locale code, if one is mapped.
    pub fn language_id(&self, code: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|entry| entry.code == code)
            .and_then(|entry| entry.language_id.as_deref())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
