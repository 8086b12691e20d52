use std::fmt;
use thiserror::Error;

/// Number of chapters (surahs).
pub const CHAPTER_COUNT: u16 = 114;

/// Verse count for each chapter, indexed by `chapter - 1`.
static CHAPTER_VERSES: [u16; CHAPTER_COUNT as usize] = [
    7, 286, 200, 176, 120, 165, 206, 75, 129, 109, // 1-10
    123, 111, 43, 52, 99, 128, 111, 110, 98, 135, // 11-20
    112, 78, 118, 64, 77, 227, 93, 88, 69, 60, // 21-30
    34, 30, 73, 54, 45, 83, 182, 88, 75, 85, // 31-40
    54, 53, 89, 59, 37, 35, 38, 29, 18, 45, // 41-50
    60, 49, 62, 55, 78, 96, 29, 22, 24, 13, // 51-60
    14, 11, 11, 18, 12, 12, 30, 52, 52, 44, // 61-70
    28, 28, 20, 56, 40, 31, 50, 40, 46, 42, // 71-80
    29, 19, 36, 25, 22, 17, 19, 26, 30, 20, // 81-90
    15, 21, 11, 8, 8, 19, 5, 8, 8, 11, // 91-100
    11, 8, 3, 9, 5, 4, 7, 3, 6, 3, // 101-110
    5, 4, 5, 6, // 111-114
];

/// Read-only view over the per-chapter verse counts.
pub struct ChapterTable;

impl ChapterTable {
    /// Total verse count of `chapter`, or `None` outside 1..=114.
    pub fn verse_count(chapter: u16) -> Option<u16> {
        if chapter == 0 {
            return None;
        }
        CHAPTER_VERSES.get(usize::from(chapter) - 1).copied()
    }

    /// Iterate `(chapter, verse_count)` pairs in chapter order.
    pub fn iter() -> impl Iterator<Item = (u16, u16)> {
        CHAPTER_VERSES
            .iter()
            .enumerate()
            .map(|(i, &count)| (i as u16 + 1, count))
    }
}

/// A chapter:verse pair that is known to exist.
///
/// The only way to obtain one is through [`VerseReference::new`], which
/// checks both numbers against the [`ChapterTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct VerseReference {
    chapter: u16,
    verse: u16,
}

impl VerseReference {
    /// Check `chapter` and `verse` against the chapter table.
    ///
    /// Numbers are taken as `u32` so callers can pass parsed input without
    /// truncating it first.
    pub fn new(chapter: u32, verse: u32) -> Result<Self, ReferenceError> {
        let max = u16::try_from(chapter)
            .ok()
            .and_then(ChapterTable::verse_count)
            .ok_or(ReferenceError::ChapterOutOfRange(chapter))?;

        if verse < 1 || verse > u32::from(max) {
            return Err(ReferenceError::VerseOutOfRange {
                chapter: chapter as u16,
                verse,
                max,
            });
        }

        Ok(Self {
            chapter: chapter as u16,
            verse: verse as u16,
        })
    }

    pub fn chapter(&self) -> u16 {
        self.chapter
    }

    pub fn verse(&self) -> u16 {
        self.verse
    }
}

impl fmt::Display for VerseReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.chapter, self.verse)
    }
}

/// Why a reference string could not become a [`VerseReference`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ReferenceError {
    #[error("Input cannot be empty")]
    Empty,

    #[error("Invalid format '{0}'. Please use 'chapter:verse' format (e.g., '2:255', '3:10')")]
    Format(String),

    #[error("Chapter number must be between 1 and {max}. Got: {0}", max = CHAPTER_COUNT)]
    ChapterOutOfRange(u32),

    #[error("Chapter {chapter} has {max} verses. Verse number must be between 1 and {max}. Got: {verse}")]
    VerseOutOfRange { chapter: u16, verse: u32, max: u16 },
}

impl ReferenceError {
    /// The input did not have the `chapter:verse` shape.
    pub fn is_format(&self) -> bool {
        matches!(self, Self::Empty | Self::Format(_))
    }

    /// The input was well formed but named a chapter or verse that does not exist.
    pub fn is_range(&self) -> bool {
        matches!(self, Self::ChapterOutOfRange(_) | Self::VerseOutOfRange { .. })
    }
}
