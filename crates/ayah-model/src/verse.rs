use crate::reference::VerseReference;
use serde::Deserialize;
use std::str::FromStr;

/// One verse in one edition, as returned in the API's `data` field.
///
/// Every field is optional: the formatter shows placeholders for whatever
/// the upstream payload leaves out.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AyahData {
    /// Global verse number across the whole text (1-6236).
    #[serde(default)]
    pub number: Option<u32>,
    #[serde(default)]
    pub text: Option<String>,
    #[serde(default)]
    pub edition: Option<EditionInfo>,
    #[serde(default)]
    pub surah: Option<SurahInfo>,
    /// Verse index within its chapter.
    #[serde(default)]
    pub number_in_surah: Option<u32>,
    /// Juz (para), 1-30.
    #[serde(default)]
    pub juz: Option<u32>,
    #[serde(default)]
    pub manzil: Option<u32>,
    /// Page in the standard Madani mushaf.
    #[serde(default)]
    pub page: Option<u32>,
    #[serde(default)]
    pub ruku: Option<u32>,
    #[serde(default)]
    pub hizb_quarter: Option<u32>,
}

/// Chapter metadata embedded in each verse payload.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SurahInfo {
    #[serde(default)]
    pub number: Option<u32>,
    /// Name in Arabic script.
    #[serde(default)]
    pub name: Option<String>,
    /// Transliterated name (e.g., "Al-Faatiha").
    #[serde(default)]
    pub english_name: Option<String>,
    #[serde(default)]
    pub english_name_translation: Option<String>,
    #[serde(default)]
    pub number_of_ayahs: Option<u32>,
    #[serde(default)]
    pub revelation_type: Option<String>,
}

/// Edition metadata (original text or a translation).
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditionInfo {
    #[serde(default)]
    pub identifier: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub english_name: Option<String>,
    #[serde(default)]
    pub direction: Option<String>,
}

/// Everything fetched for one reference.
#[derive(Debug, Clone)]
pub struct VerseRecord {
    pub reference: VerseReference,
    pub arabic: AyahData,
    /// `None` when no translation was requested or the translation fetch failed.
    pub translation: Option<AyahData>,
}

impl VerseRecord {
    pub fn new(reference: VerseReference, arabic: AyahData) -> Self {
        Self {
            reference,
            arabic,
            translation: None,
        }
    }

    pub fn with_translation(mut self, translation: AyahData) -> Self {
        self.translation = Some(translation);
        self
    }
}

/// Which sections of a verse to render.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputMode {
    Arabic,
    Translation,
    #[default]
    Both,
}

impl OutputMode {
    pub const NAMES: [&'static str; 3] = ["arabic", "translation", "both"];

    pub fn includes_arabic(self) -> bool {
        matches!(self, Self::Arabic | Self::Both)
    }

    pub fn includes_translation(self) -> bool {
        matches!(self, Self::Translation | Self::Both)
    }
}

impl FromStr for OutputMode {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "arabic" => Ok(Self::Arabic),
            "translation" => Ok(Self::Translation),
            "both" => Ok(Self::Both),
            other => Err(format!(
                "unknown output format '{other}' (expected one of: {})",
                Self::NAMES.join(", ")
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_api_payload() {
        let json = r#"{
            "number": 262,
            "text": "ٱللَّهُ لَآ إِلَٰهَ إِلَّا هُوَ",
            "edition": {"identifier": "quran-uthmani", "language": "ar", "name": "القرآن الكريم برسم العثماني", "englishName": "Uthmani", "format": "text", "type": "quran", "direction": "rtl"},
            "surah": {"number": 2, "name": "سُورَةُ البَقَرَةِ", "englishName": "Al-Baqara", "englishNameTranslation": "The Cow", "numberOfAyahs": 286, "revelationType": "Medinan"},
            "numberInSurah": 255,
            "juz": 3,
            "manzil": 1,
            "page": 42,
            "ruku": 35,
            "hizbQuarter": 17,
            "sajda": false
        }"#;
        let ayah: AyahData = serde_json::from_str(json).unwrap();
        assert_eq!(ayah.number_in_surah, Some(255));
        assert_eq!(ayah.juz, Some(3));
        assert_eq!(ayah.page, Some(42));
        let surah = ayah.surah.unwrap();
        assert_eq!(surah.english_name.as_deref(), Some("Al-Baqara"));
        assert_eq!(surah.number_of_ayahs, Some(286));
        assert_eq!(ayah.edition.unwrap().english_name.as_deref(), Some("Uthmani"));
    }

    #[test]
    fn test_deserialize_sparse_payload() {
        let ayah: AyahData = serde_json::from_str(r#"{"text": "In the name of Allah"}"#).unwrap();
        assert_eq!(ayah.text.as_deref(), Some("In the name of Allah"));
        assert!(ayah.surah.is_none());
        assert!(ayah.juz.is_none());
    }

    #[test]
    fn test_output_mode_parse() {
        assert_eq!("arabic".parse::<OutputMode>(), Ok(OutputMode::Arabic));
        assert_eq!(" Both ".parse::<OutputMode>(), Ok(OutputMode::Both));
        assert!("latin".parse::<OutputMode>().is_err());
        assert_eq!(OutputMode::default(), OutputMode::Both);
    }

    #[test]
    fn test_output_mode_sections() {
        assert!(OutputMode::Arabic.includes_arabic());
        assert!(!OutputMode::Arabic.includes_translation());
        assert!(!OutputMode::Translation.includes_arabic());
        assert!(OutputMode::Both.includes_arabic() && OutputMode::Both.includes_translation());
    }

    #[test]
    fn test_record_translation_is_optional() {
        let reference = VerseReference::new(1, 1).unwrap();
        let record = VerseRecord::new(reference, AyahData::default());
        assert!(record.translation.is_none());
        let record = record.with_translation(AyahData::default());
        assert!(record.translation.is_some());
    }
}
