//! Card rendering: one fixed-height visual unit per vocabulary entry.
//!
//! Card heights are derived from the font metrics instead of being measured
//! after layout. The view draws every card at exactly the height computed
//! here, so the bounds cached for viewport detection always match what is on
//! screen.

use crate::viewport::UnitBounds;
use crate::vocab::VocabularyEntry;

pub const PLACEHOLDER: &str = "N/A";
pub const NO_TRANSLATION: &str = "No translation";

pub const LINE_HEIGHT: f32 = 1.3;
pub const CARD_PADDING_PX: f32 = 12.0;
pub const CARD_INNER_SPACING_PX: f32 = 6.0;
const HEADWORD_SCALE: f32 = 1.5;
const PHONETIC_SCALE: f32 = 0.85;
const FOOTER_SCALE: f32 = 0.75;

/// Inputs to card geometry. Two equal metrics produce identical layouts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CardMetrics {
    pub font_size: f32,
    pub spacing: f32,
    pub content_width: f32,
}

impl CardMetrics {
    pub fn new(font_size: u32, spacing: f32, content_width: f32) -> Self {
        let sanitize = |v: f32, fallback: f32| if v.is_finite() && v > 0.0 { v } else { fallback };
        Self {
            font_size: (font_size.max(1)) as f32,
            spacing: if spacing.is_finite() {
                spacing.max(0.0)
            } else {
                0.0
            },
            content_width: sanitize(content_width, 640.0),
        }
    }

    pub fn body_size(&self) -> f32 {
        self.font_size
    }

    pub fn headword_size(&self) -> f32 {
        (self.font_size * HEADWORD_SCALE).round()
    }

    pub fn phonetic_size(&self) -> f32 {
        (self.font_size * PHONETIC_SCALE).round()
    }

    pub fn footer_size(&self) -> f32 {
        (self.font_size * FOOTER_SCALE).round()
    }

    fn line_px(size: f32) -> f32 {
        (size * LINE_HEIGHT).ceil()
    }

    /// Width available to text inside a card.
    pub fn text_width(&self) -> f32 {
        (self.content_width - CARD_PADDING_PX * 2.0).max(self.font_size * 4.0)
    }

    /// Lines a paragraph needs at body size, using a greedy per-glyph estimate.
    pub fn wrapped_lines(&self, paragraph: &str) -> usize {
        let em = self.body_size().max(1.0);
        let max_units = (self.text_width() / em).max(4.0);
        let mut lines = 1usize;
        let mut line_units = 0.0f32;
        for ch in paragraph.chars() {
            let units = if ch.is_whitespace() {
                0.3
            } else if ch.is_ascii() {
                0.55
            } else {
                1.0
            };
            if line_units + units > max_units {
                lines += 1;
                line_units = units;
            } else {
                line_units += units;
            }
        }
        lines
    }

    /// Full card height, padding included.
    pub fn card_height(&self, paragraphs: &[String]) -> f32 {
        let body_line = Self::line_px(self.body_size());
        let paragraph_px: f32 = paragraphs
            .iter()
            .map(|p| self.wrapped_lines(p) as f32 * body_line)
            .sum();
        // Headword, phonetics and footer plus one row per paragraph.
        let rows = 3 + paragraphs.len();
        let gaps = rows.saturating_sub(1) as f32 * CARD_INNER_SPACING_PX;
        CARD_PADDING_PX * 2.0
            + Self::line_px(self.headword_size())
            + Self::line_px(self.phonetic_size())
            + Self::line_px(self.footer_size())
            + paragraph_px
            + gaps
    }
}

/// Rendered form of one entry, tagged with its index in the store.
#[derive(Debug, Clone, PartialEq)]
pub struct VisualUnit {
    pub index: usize,
    pub headword: String,
    pub phonetic_us: String,
    pub phonetic_uk: String,
    pub paragraphs: Vec<String>,
    pub frequency: String,
    pub bounds: UnitBounds,
}

impl VisualUnit {
    fn from_entry(index: usize, entry: &VocabularyEntry) -> Self {
        let paragraphs = if entry.translation_lines.is_empty() {
            vec![NO_TRANSLATION.to_string()]
        } else {
            entry.translation_lines.clone()
        };
        let or_placeholder = |v: &Option<String>| v.clone().unwrap_or_else(|| PLACEHOLDER.into());
        Self {
            index,
            headword: entry.text.clone(),
            phonetic_us: or_placeholder(&entry.phonetic_us),
            phonetic_uk: or_placeholder(&entry.phonetic_uk),
            paragraphs,
            frequency: format!(
                "BNC: {} | FRQ: {}",
                or_placeholder(&entry.frequency_rank),
                or_placeholder(&entry.corpus_rank)
            ),
            bounds: UnitBounds {
                top: 0.0,
                height: 0.0,
            },
        }
    }
}

/// One unit per entry, in entry order, stacked with `metrics.spacing` between
/// consecutive cards.
pub fn render_all(entries: &[VocabularyEntry], metrics: &CardMetrics) -> Vec<VisualUnit> {
    let mut units: Vec<VisualUnit> = entries
        .iter()
        .enumerate()
        .map(|(idx, entry)| VisualUnit::from_entry(idx, entry))
        .collect();
    relayout(&mut units, metrics);
    units
}

/// Recompute every unit's bounds for new metrics. Unit identity is unchanged.
pub fn relayout(units: &mut [VisualUnit], metrics: &CardMetrics) {
    let mut top = 0.0f32;
    for unit in units.iter_mut() {
        let height = metrics.card_height(&unit.paragraphs);
        unit.bounds = UnitBounds { top, height };
        top += height + metrics.spacing;
    }
}

/// Height of the stacked cards, excluding any trailing spacer.
pub fn content_height(units: &[VisualUnit]) -> f32 {
    units.last().map(|u| u.bounds.bottom()).unwrap_or(0.0)
}

/// Index range of units intersecting `[offset, offset + height]`, widened by
/// `overscan` units on both sides.
pub fn visible_range(
    units: &[VisualUnit],
    offset: f32,
    height: f32,
    overscan: usize,
) -> std::ops::Range<usize> {
    if units.is_empty() {
        return 0..0;
    }
    let bottom = offset + height.max(0.0);
    let first = units.partition_point(|u| u.bounds.bottom() <= offset);
    let last = units.partition_point(|u| u.bounds.top < bottom);
    let start = first.saturating_sub(overscan);
    let end = last.max(first + 1).saturating_add(overscan).min(units.len());
    start.min(end)..end
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::vocab::WordList;

    const SAMPLE: &str = r#"{"wordList":[{"value":"apple","translation":"苹果"},{"value":"bat","translation":"蝙蝠\n球棒"}]}"#;

    fn metrics() -> CardMetrics {
        CardMetrics::new(20, 12.0, 800.0)
    }

    #[test]
    fn one_unit_per_entry_with_paragraphs() {
        let list = WordList::parse(SAMPLE).expect("sample");
        let units = render_all(&list.entries, &metrics());
        assert_eq!(units.len(), 2);
        assert_eq!(units[0].index, 0);
        assert_eq!(units[0].paragraphs, vec!["苹果"]);
        assert_eq!(units[1].paragraphs, vec!["蝙蝠", "球棒"]);
        assert!(units[1].bounds.height > units[0].bounds.height);
    }

    #[test]
    fn missing_fields_render_placeholders() {
        let list = WordList::parse(r#"{"wordList":[{"value":"zebra"}]}"#).expect("parses");
        let units = render_all(&list.entries, &metrics());
        let unit = &units[0];
        assert_eq!(unit.phonetic_us, PLACEHOLDER);
        assert_eq!(unit.phonetic_uk, PLACEHOLDER);
        assert_eq!(unit.paragraphs, vec![NO_TRANSLATION]);
        assert_eq!(unit.frequency, "BNC: N/A | FRQ: N/A");
    }

    #[test]
    fn rendering_is_idempotent_and_stacked() {
        let list = WordList::parse(SAMPLE).expect("sample");
        let first = render_all(&list.entries, &metrics());
        let second = render_all(&list.entries, &metrics());
        assert_eq!(first, second);
        assert_eq!(first[0].bounds.top, 0.0);
        assert_eq!(
            first[1].bounds.top,
            first[0].bounds.bottom() + metrics().spacing
        );
        assert_eq!(content_height(&first), first[1].bounds.bottom());
    }

    #[test]
    fn relayout_scales_with_font_size() {
        let list = WordList::parse(SAMPLE).expect("sample");
        let mut units = render_all(&list.entries, &metrics());
        let before = units[0].bounds.height;
        relayout(&mut units, &CardMetrics::new(32, 12.0, 800.0));
        assert!(units[0].bounds.height > before);
        assert_eq!(units[0].index, 0);
    }

    #[test]
    fn long_paragraphs_wrap() {
        let narrow = CardMetrics::new(20, 12.0, 200.0);
        let long = "a".repeat(200);
        assert!(narrow.wrapped_lines(&long) > 1);
        assert_eq!(narrow.wrapped_lines("short"), 1);
    }

    #[test]
    fn visible_range_uses_overscan() {
        let entries: Vec<_> = (0..100)
            .map(|i| crate::vocab::VocabularyEntry {
                text: format!("w{i}"),
                translation_lines: vec!["x".into()],
                phonetic_us: None,
                phonetic_uk: None,
                frequency_rank: None,
                corpus_rank: None,
            })
            .collect();
        let units = render_all(&entries, &metrics());
        let h = units[0].bounds.height + metrics().spacing;
        let range = visible_range(&units, h * 50.0, h * 3.0, 2);
        assert_eq!(range.start, 48);
        assert!(range.end >= 53 && range.end <= 56);
        assert_eq!(visible_range(&[], 0.0, 100.0, 2), 0..0);
    }
}
