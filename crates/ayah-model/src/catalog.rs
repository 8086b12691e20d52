/// A translation edition known by a short key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Translation {
    /// Short key accepted on the command line (e.g., "sahih").
    pub key: &'static str,
    /// Upstream edition identifier (e.g., "en.sahih").
    pub edition: &'static str,
    /// Human-readable translator name.
    pub display_name: &'static str,
}

static TRANSLATIONS: [Translation; 8] = [
    Translation { key: "sahih", edition: "en.sahih", display_name: "Sahih International" },
    Translation { key: "pickthall", edition: "en.pickthall", display_name: "Pickthall" },
    Translation { key: "yusufali", edition: "en.yusufali", display_name: "Yusuf Ali" },
    Translation { key: "asad", edition: "en.asad", display_name: "Muhammad Asad" },
    Translation { key: "hilali", edition: "en.hilali", display_name: "Hilali & Khan" },
    Translation { key: "shakir", edition: "en.shakir", display_name: "Shakir" },
    Translation { key: "wahiduddin", edition: "en.wahiduddin", display_name: "Wahiduddin Khan" },
    Translation { key: "clearquran", edition: "en.clearquran", display_name: "Clear Quran" },
];

/// The fixed set of translations offered by name.
pub struct TranslationCatalog;

impl TranslationCatalog {
    /// Key used when the user does not pick a translation.
    pub const DEFAULT_KEY: &'static str = "sahih";

    pub fn all() -> &'static [Translation] {
        &TRANSLATIONS
    }

    /// Catalog keys in display order.
    pub fn keys() -> Vec<&'static str> {
        TRANSLATIONS.iter().map(|t| t.key).collect()
    }

    pub fn get(key: &str) -> Option<&'static Translation> {
        TRANSLATIONS.iter().find(|t| t.key == key)
    }

    /// Map a key to its upstream edition identifier.
    ///
    /// Keys outside the catalog are returned unchanged so callers can ask
    /// for any edition the upstream API serves.
    pub fn resolve(key: &str) -> &str {
        match Self::get(key) {
            Some(t) => t.edition,
            None => key,
        }
    }
}
