//! Emotion-to-glyph mapping for display.

/// Ordered `(keyword, glyph)` table. The first keyword contained in the
/// emotion text wins.
pub const EMOTION_GLYPHS: &[(&str, &str)] = &[
    ("тревога", "😰"),
    ("беспокойство", "😟"),
    ("стресс", "😓"),
    ("усталость", "😴"),
    ("грусть", "😢"),
    ("радость", "😊"),
    ("волнение", "🤩"),
    ("страх", "😨"),
    ("злость", "😤"),
    ("спокойствие", "😌"),
    ("растерянность", "😕"),
    ("надежда", "✨"),
    ("благодарность", "🙏"),
];

/// Glyph for emotions not in the table.
pub const DEFAULT_GLYPH: &str = "💭";

/// Glyph shown next to errors.
pub const ERROR_GLYPH: &str = "😔";

/// Select a glyph for free-text emotion, case-insensitively.
pub fn glyph_for(emotion: &str) -> &'static str {
    let lower = emotion.to_lowercase();
    EMOTION_GLYPHS
        .iter()
        .find(|(keyword, _)| lower.contains(*keyword))
        .map(|(_, glyph)| *glyph)
        .unwrap_or(DEFAULT_GLYPH)
}
