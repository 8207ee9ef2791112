/// Post content validation for the emote service
///
/// Posts are emoji-only: every grapheme cluster must classify as an emoji.
/// This is a strict allow-list over Unicode emoji blocks, not a blacklist.
use unicode_segmentation::UnicodeSegmentation;

/// Maximum post length, counted in grapheme clusters so that
/// multi-codepoint sequences (ZWJ families, flags, skin tones) count as one.
pub const MAX_CONTENT_GRAPHEMES: usize = 280;

/// Validate post content: non-empty, at most 280 graphemes, emoji-only.
pub fn validate_post_content(content: &str) -> Result<(), String> {
    if content.is_empty() {
        return Err("content must not be empty".to_string());
    }

    let mut count = 0usize;
    for grapheme in content.graphemes(true) {
        count += 1;
        if count > MAX_CONTENT_GRAPHEMES {
            return Err(format!(
                "content exceeds {} characters",
                MAX_CONTENT_GRAPHEMES
            ));
        }
        if !is_emoji_grapheme(grapheme) {
            return Err("only emojis are allowed".to_string());
        }
    }

    Ok(())
}

/// A grapheme is an emoji when it contains at least one emoji-base scalar
/// and nothing outside the emoji scalar/component sets. Keycap sequences
/// (`1\u{FE0F}\u{20E3}`) allow their ASCII base only in combination with
/// the combining keycap mark.
fn is_emoji_grapheme(grapheme: &str) -> bool {
    let has_keycap = grapheme.chars().any(|c| c == '\u{20E3}');
    let mut has_emoji_base = false;

    for c in grapheme.chars() {
        if is_emoji_base(c) {
            has_emoji_base = true;
        } else if is_emoji_component(c) {
            // combining marks never stand alone, checked below
        } else if has_keycap && matches!(c, '0'..='9' | '#' | '*') {
            has_emoji_base = true;
        } else {
            return false;
        }
    }

    has_emoji_base
}

/// Scalars that carry emoji presentation on their own (pictographs,
/// emoticons, symbols, transport, flags/regional indicators, and the
/// legacy symbol blocks promoted to emoji).
fn is_emoji_base(c: char) -> bool {
    matches!(c,
        '\u{00A9}' | '\u{00AE}'
        | '\u{203C}' | '\u{2049}'
        | '\u{2122}' | '\u{2139}'
        | '\u{2194}'..='\u{2199}'
        | '\u{21A9}'..='\u{21AA}'
        | '\u{231A}'..='\u{231B}'
        | '\u{2328}'
        | '\u{23CF}'
        | '\u{23E9}'..='\u{23F3}'
        | '\u{23F8}'..='\u{23FA}'
        | '\u{24C2}'
        | '\u{25AA}'..='\u{25AB}'
        | '\u{25B6}' | '\u{25C0}'
        | '\u{25FB}'..='\u{25FE}'
        | '\u{2600}'..='\u{27BF}'
        | '\u{2934}'..='\u{2935}'
        | '\u{2B05}'..='\u{2B07}'
        | '\u{2B1B}'..='\u{2B1C}'
        | '\u{2B50}' | '\u{2B55}'
        | '\u{3030}' | '\u{303D}'
        | '\u{3297}' | '\u{3299}'
        | '\u{1F000}'..='\u{1F2FF}'
        | '\u{1F300}'..='\u{1FAFF}'
    )
}

/// Scalars that only appear inside emoji sequences: zero-width joiner,
/// variation selectors, the combining keycap, skin-tone modifiers, and
/// the tag characters used by subdivision flags.
fn is_emoji_component(c: char) -> bool {
    matches!(c,
        '\u{200D}'
        | '\u{FE0E}' | '\u{FE0F}'
        | '\u{20E3}'
        | '\u{1F3FB}'..='\u{1F3FF}'
        | '\u{E0020}'..='\u{E007F}'
    )
}
