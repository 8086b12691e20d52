use ayah_model::{AyahData, OutputMode, VerseRecord};

/// Width of the `=` rules framing a rendered verse.
pub const RULE_WIDTH: usize = 60;

/// Right-to-left mark, prefixed to Arabic strings so terminals lay them out RTL.
pub const RLM: char = '\u{200F}';

/// Render a fetched verse as a bordered text block.
///
/// Layout: a header with the reference and chapter names, then the Arabic
/// and translation sections allowed by `mode`, then the juz/page location.
/// Fields missing from the payload are replaced by placeholders.
pub fn format_verse(record: &VerseRecord, mode: OutputMode) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let arabic = &record.arabic;
    let mut lines = Vec::new();

    lines.push(rule.clone());
    lines.push(header_line(record));
    lines.push(rule.clone());

    if mode.includes_arabic() {
        lines.extend(arabic_section(arabic));
    }

    if mode.includes_translation() {
        if let Some(translation) = &record.translation {
            lines.extend(translation_section(translation));
        }
    }

    lines.extend(location_section(arabic));

    lines.push(String::new());
    lines.push(rule);
    lines.join("\n")
}

fn header_line(record: &VerseRecord) -> String {
    let surah = record.arabic.surah.as_ref();
    let english = surah
        .and_then(|s| s.english_name.as_deref())
        .unwrap_or("Unknown");
    let native = surah
        .and_then(|s| s.name.as_deref())
        .filter(|n| !n.is_empty())
        .map(|n| format!("{RLM}{n}"))
        .unwrap_or_default();

    format!("Verse: {} | Surah: {english} ({native})", record.reference)
}

fn arabic_section(arabic: &AyahData) -> Vec<String> {
    let text = arabic.text.as_deref().unwrap_or("No Arabic text available");
    let mut lines = vec![
        String::new(),
        "Arabic Text:".to_string(),
        format!("{RLM}{text}"),
    ];
    if let Some(n) = present(arabic.number_in_surah) {
        lines.push(format!("   └─ Verse {n} in Surah"));
    }
    lines
}

fn translation_section(translation: &AyahData) -> Vec<String> {
    let text = translation.text.as_deref().unwrap_or("No translation available");
    let edition = translation
        .edition
        .as_ref()
        .and_then(|e| e.english_name.as_deref().or(e.name.as_deref()))
        .unwrap_or("Unknown");

    vec![
        String::new(),
        "Translation:".to_string(),
        text.to_string(),
        format!("   └─ Translation: {edition}"),
    ]
}

fn location_section(arabic: &AyahData) -> Vec<String> {
    let juz = present(arabic.juz);
    let page = present(arabic.page);
    if juz.is_none() && page.is_none() {
        return Vec::new();
    }

    let mut lines = vec![String::new(), "Location:".to_string()];
    if let Some(juz) = juz {
        lines.push(format!("   └─ Juz (Para): {juz}"));
    }
    if let Some(page) = page {
        lines.push(format!("   └─ Page: {page}"));
    }
    lines
}

/// Upstream uses 0 for "unknown" in some editions.
fn present(n: Option<u32>) -> Option<u32> {
    n.filter(|&n| n > 0)
}
