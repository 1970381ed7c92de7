/// True for characters that can start a section label: ASCII, hiragana,
/// katakana, CJK unified ideographs and CJK extension A.
pub fn is_label_char(c: char) -> bool {
    c.is_ascii()
        || ('\u{3040}'..='\u{309F}').contains(&c)
        || ('\u{30A0}'..='\u{30FF}').contains(&c)
        || ('\u{4E00}'..='\u{9FFF}').contains(&c)
        || ('\u{3400}'..='\u{4DBF}').contains(&c)
}

/// Strip the leading glyph cluster (emoji, variation selectors, symbols)
/// from a heading line and return the trimmed label text.
///
/// `"🛠️ 生成されたスキル"` becomes `"生成されたスキル"`. A heading with no
/// label character at all yields `""`.
///
/// Any script outside ASCII and Japanese is treated as glyph noise, so a
/// heading that starts with Hangul or Cyrillic loses those characters too.
pub fn normalize_heading(line: &str) -> &str {
    match line.char_indices().find(|&(_, c)| is_label_char(c)) {
        Some((start, _)) => line[start..].trim(),
        None => "",
    }
}
