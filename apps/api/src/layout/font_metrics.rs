//! Static font-metric tables for the two base-14 faces the résumé uses.
//!
//! Character widths are in em units (relative to font size), taken from the Adobe
//! Helvetica / Helvetica-Bold AFM files (advance width / 1000).
//!
//! Tables are indexed by WinAnsiEncoding byte, 0x20..=0xFF. Text is measured through
//! the same `win_ansi_byte` mapping the PDF writer draws with, so an unmappable character
//! is measured as the `?` that replaces it.

/// Millimetres per PostScript point.
pub const MM_PER_PT: f32 = 25.4 / 72.0;

const FIRST_CODE: u8 = 0x20;
const TABLE_LEN: usize = 224;

// ────────────────────────────────────────────────────────────────────────────
// Font style enum
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FontStyle {
    /// Body text.
    Regular,
    /// Header name and section titles.
    Bold,
}

impl FontStyle {
    /// PostScript name of the core font backing this style.
    pub fn base_font(self) -> &'static str {
        match self {
            FontStyle::Regular => "Helvetica",
            FontStyle::Bold => "Helvetica-Bold",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// WinAnsi encoding
// ────────────────────────────────────────────────────────────────────────────

/// WinAnsiEncoding byte for `c`. Tabs become spaces; anything unmappable becomes `?`.
pub fn win_ansi_byte(c: char) -> u8 {
    match c {
        ' '..='~' | '\u{A0}'..='\u{FF}' => c as u8,
        '€' => 0x80,
        '‚' => 0x82,
        'ƒ' => 0x83,
        '„' => 0x84,
        '…' => 0x85,
        '†' => 0x86,
        '‡' => 0x87,
        'ˆ' => 0x88,
        '‰' => 0x89,
        'Š' => 0x8A,
        '‹' => 0x8B,
        'Œ' => 0x8C,
        'Ž' => 0x8E,
        '‘' => 0x91,
        '’' => 0x92,
        '“' => 0x93,
        '”' => 0x94,
        '•' => 0x95,
        '–' => 0x96,
        '—' => 0x97,
        '˜' => 0x98,
        '™' => 0x99,
        'š' => 0x9A,
        '›' => 0x9B,
        'œ' => 0x9C,
        'ž' => 0x9E,
        'Ÿ' => 0x9F,
        '\t' => b' ',
        _ => b'?',
    }
}

/// Maps text to WinAnsiEncoding bytes.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars().map(win_ansi_byte).collect()
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// Static character-width table for a font style.
///
/// `widths[i]` = width of WinAnsi byte `(i + 0x20)` in em.
pub struct FontMetricTable {
    widths: [f32; TABLE_LEN],
}

impl FontMetricTable {
    /// Width of one encoded byte in em. Control bytes are never drawn and measure zero.
    pub fn byte_width(&self, byte: u8) -> f32 {
        byte.checked_sub(FIRST_CODE).map_or(0.0, |i| self.widths[usize::from(i)])
    }

    /// Width of `c` as drawn, in em.
    pub fn char_width(&self, c: char) -> f32 {
        self.byte_width(win_ansi_byte(c))
    }

    /// Measures the rendered width of a string in em units.
    pub fn measure_str(&self, s: &str) -> f32 {
        s.chars().map(|c| self.char_width(c)).sum()
    }

    /// Measures already-encoded WinAnsi bytes in em units.
    pub fn measure_bytes(&self, bytes: &[u8]) -> f32 {
        bytes.iter().map(|&b| self.byte_width(b)).sum()
    }

    /// Width of `s` in millimetres when set at `size_pt`.
    pub fn width_mm(&self, s: &str, size_pt: f32) -> f32 {
        self.measure_str(s) * size_pt * MM_PER_PT
    }
}

/// Returns the metric table for the given style.
pub fn get_metrics(style: FontStyle) -> &'static FontMetricTable {
    match style {
        FontStyle::Regular => &HELVETICA_TABLE,
        FontStyle::Bold => &HELVETICA_BOLD_TABLE,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables (WinAnsi 0x20..=0xFF). Codes WinAnsi leaves undefined
// (0x7F, 0x81, 0x8D, 0x8F, 0x90, 0x9D) are never emitted; they carry the `?` width.
// ────────────────────────────────────────────────────────────────────────────

static HELVETICA_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.278, 0.355, 0.556, 0.556, 0.889, 0.667, 0.191, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :      ;      <      =      >      ?      @
        0.278, 0.278, 0.584, 0.584, 0.584, 0.556, 1.015,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.667, 0.667, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.500, 0.667, 0.556, 0.833,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [      \      ]      ^      _      `
        0.278, 0.278, 0.278, 0.469, 0.556, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.556, 0.556, 0.500, 0.556, 0.556, 0.278, 0.556, 0.556, 0.222, 0.222, 0.500, 0.222, 0.833,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.556, 0.556, 0.556, 0.556, 0.333, 0.500, 0.278, 0.556, 0.500, 0.722, 0.500, 0.500, 0.500,
        // {      |      }      ~      DEL
        0.334, 0.260, 0.334, 0.584, 0.556,
        // €      0x81   ‚      ƒ      „      …      †      ‡      ˆ      ‰      Š      ‹      Œ      0x8D   Ž      0x8F
        0.556, 0.556, 0.222, 0.556, 0.333, 1.000, 0.556, 0.556, 0.333, 1.000, 0.667, 0.333, 1.000, 0.556, 0.611, 0.556,
        // 0x90   ‘      ’      “      ”      •      –      —      ˜      ™      š      ›      œ      0x9D   ž      Ÿ
        0.556, 0.222, 0.222, 0.333, 0.333, 0.350, 0.556, 1.000, 0.333, 1.000, 0.500, 0.333, 0.944, 0.556, 0.500, 0.667,
        // nbsp   ¡      ¢      £      ¤      ¥      ¦      §      ¨      ©      ª      «      ¬      shy    ®      ¯
        0.278, 0.333, 0.556, 0.556, 0.556, 0.556, 0.260, 0.556, 0.333, 0.737, 0.370, 0.556, 0.584, 0.333, 0.737, 0.333,
        // °      ±      ²      ³      ´      µ      ¶      ·      ¸      ¹      º      »      ¼      ½      ¾      ¿
        0.400, 0.584, 0.333, 0.333, 0.333, 0.556, 0.537, 0.278, 0.333, 0.333, 0.365, 0.556, 0.834, 0.834, 0.834, 0.611,
        // À      Á      Â      Ã      Ä      Å      Æ      Ç      È      É      Ê      Ë      Ì      Í      Î      Ï
        0.667, 0.667, 0.667, 0.667, 0.667, 0.667, 1.000, 0.722, 0.667, 0.667, 0.667, 0.667, 0.278, 0.278, 0.278, 0.278,
        // Ð      Ñ      Ò      Ó      Ô      Õ      Ö      ×      Ø      Ù      Ú      Û      Ü      Ý      Þ      ß
        0.722, 0.722, 0.778, 0.778, 0.778, 0.778, 0.778, 0.584, 0.778, 0.722, 0.722, 0.722, 0.722, 0.667, 0.667, 0.611,
        // à      á      â      ã      ä      å      æ      ç      è      é      ê      ë      ì      í      î      ï
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.889, 0.500, 0.556, 0.556, 0.556, 0.556, 0.278, 0.278, 0.278, 0.278,
        // ð      ñ      ò      ó      ô      õ      ö      ÷      ø      ù      ú      û      ü      ý      þ      ÿ
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.584, 0.611, 0.556, 0.556, 0.556, 0.556, 0.500, 0.556, 0.500,
    ],
};

static HELVETICA_BOLD_TABLE: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp     !      "      #      $      %      &      '      (      )      *      +      ,      -      .      /
        0.278, 0.333, 0.474, 0.556, 0.556, 0.889, 0.722, 0.238, 0.333, 0.333, 0.389, 0.584, 0.278, 0.333, 0.278, 0.278,
        // 0      1      2      3      4      5      6      7      8      9
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.556,
        // :      ;      <      =      >      ?      @
        0.333, 0.333, 0.584, 0.584, 0.584, 0.611, 0.975,
        // A      B      C      D      E      F      G      H      I      J      K      L      M
        0.722, 0.722, 0.722, 0.722, 0.667, 0.611, 0.778, 0.722, 0.278, 0.556, 0.722, 0.611, 0.833,
        // N      O      P      Q      R      S      T      U      V      W      X      Y      Z
        0.722, 0.778, 0.667, 0.778, 0.722, 0.667, 0.611, 0.722, 0.667, 0.944, 0.667, 0.667, 0.611,
        // [      \      ]      ^      _      `
        0.333, 0.278, 0.333, 0.584, 0.556, 0.333,
        // a      b      c      d      e      f      g      h      i      j      k      l      m
        0.556, 0.611, 0.556, 0.611, 0.556, 0.333, 0.611, 0.611, 0.278, 0.278, 0.556, 0.278, 0.889,
        // n      o      p      q      r      s      t      u      v      w      x      y      z
        0.611, 0.611, 0.611, 0.611, 0.389, 0.556, 0.333, 0.611, 0.556, 0.778, 0.556, 0.556, 0.500,
        // {      |      }      ~      DEL
        0.389, 0.280, 0.389, 0.584, 0.611,
        // €      0x81   ‚      ƒ      „      …      †      ‡      ˆ      ‰      Š      ‹      Œ      0x8D   Ž      0x8F
        0.556, 0.611, 0.278, 0.556, 0.500, 1.000, 0.556, 0.556, 0.333, 1.000, 0.667, 0.333, 1.000, 0.611, 0.611, 0.611,
        // 0x90   ‘      ’      “      ”      •      –      —      ˜      ™      š      ›      œ      0x9D   ž      Ÿ
        0.611, 0.278, 0.278, 0.500, 0.500, 0.350, 0.556, 1.000, 0.333, 1.000, 0.556, 0.333, 0.944, 0.611, 0.500, 0.667,
        // nbsp   ¡      ¢      £      ¤      ¥      ¦      §      ¨      ©      ª      «      ¬      shy    ®      ¯
        0.278, 0.333, 0.556, 0.556, 0.556, 0.556, 0.280, 0.556, 0.333, 0.737, 0.370, 0.556, 0.584, 0.333, 0.737, 0.333,
        // °      ±      ²      ³      ´      µ      ¶      ·      ¸      ¹      º      »      ¼      ½      ¾      ¿
        0.400, 0.584, 0.333, 0.333, 0.333, 0.611, 0.556, 0.278, 0.333, 0.333, 0.365, 0.556, 0.834, 0.834, 0.834, 0.611,
        // À      Á      Â      Ã      Ä      Å      Æ      Ç      È      É      Ê      Ë      Ì      Í      Î      Ï
        0.722, 0.722, 0.722, 0.722, 0.722, 0.722, 1.000, 0.722, 0.667, 0.667, 0.667, 0.667, 0.278, 0.278, 0.278, 0.278,
        // Ð      Ñ      Ò      Ó      Ô      Õ      Ö      ×      Ø      Ù      Ú      Û      Ü      Ý      Þ      ß
        0.722, 0.722, 0.778, 0.778, 0.778, 0.778, 0.778, 0.584, 0.778, 0.722, 0.722, 0.722, 0.722, 0.667, 0.667, 0.611,
        // à      á      â      ã      ä      å      æ      ç      è      é      ê      ë      ì      í      î      ï
        0.556, 0.556, 0.556, 0.556, 0.556, 0.556, 0.889, 0.556, 0.556, 0.556, 0.556, 0.556, 0.278, 0.278, 0.278, 0.278,
        // ð      ñ      ò      ó      ô      õ      ö      ÷      ø      ù      ú      û      ü      ý      þ      ÿ
        0.611, 0.611, 0.611, 0.611, 0.611, 0.611, 0.611, 0.584, 0.611, 0.611, 0.611, 0.611, 0.611, 0.556, 0.611, 0.556,
    ],
};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_glyph_widths() {
        let regular = get_metrics(FontStyle::Regular);
        assert!((regular.char_width('A') - 0.667).abs() < 1e-6);
        assert!((regular.char_width('i') - 0.222).abs() < 1e-6);
        assert!((regular.char_width('~') - 0.584).abs() < 1e-6);
        assert!((regular.char_width(' ') - 0.278).abs() < 1e-6);
        let bold = get_metrics(FontStyle::Bold);
        assert!((bold.char_width('b') - 0.611).abs() < 1e-6);
    }

    #[test]
    fn test_bold_is_never_narrower_for_lowercase() {
        let regular = get_metrics(FontStyle::Regular);
        let bold = get_metrics(FontStyle::Bold);
        for c in 'a'..='z' {
            assert!(bold.char_width(c) >= regular.char_width(c), "{c}");
        }
    }

    #[test]
    fn test_wide_win_ansi_glyphs_use_real_widths() {
        for style in [FontStyle::Regular, FontStyle::Bold] {
            let m = get_metrics(style);
            for c in ['—', '…', '‰', 'Œ', 'Æ', '™'] {
                assert!((m.char_width(c) - 1.0).abs() < 1e-6, "{c}");
            }
        }
        let regular = get_metrics(FontStyle::Regular);
        assert!((regular.char_width('é') - 0.556).abs() < 1e-6);
        assert!((regular.char_width('É') - 0.667).abs() < 1e-6);
        assert!((regular.char_width('•') - 0.350).abs() < 1e-6);
    }

    #[test]
    fn test_unmappable_chars_measure_as_question_mark() {
        let m = get_metrics(FontStyle::Regular);
        assert!((m.char_width('日') - m.char_width('?')).abs() < f32::EPSILON);
        assert!((m.measure_str("日本") - m.measure_bytes(b"??")).abs() < f32::EPSILON);
    }

    #[test]
    fn test_measure_str_matches_encoded_bytes() {
        let text = "José Álvarez — Œuvre… 120‰";
        for style in [FontStyle::Regular, FontStyle::Bold] {
            let m = get_metrics(style);
            let drawn = m.measure_bytes(&encode_win_ansi(text));
            assert!((m.measure_str(text) - drawn).abs() < 1e-4);
        }
    }

    #[test]
    fn test_win_ansi_encoding() {
        assert_eq!(encode_win_ansi("José"), vec![b'J', b'o', b's', 0xE9]);
        assert_eq!(encode_win_ansi("Á"), vec![0xC1]);
        assert_eq!(encode_win_ansi("•–€"), vec![0x95, 0x96, 0x80]);
        assert_eq!(encode_win_ansi("日本"), b"??".to_vec());
        assert_eq!(encode_win_ansi("a\tb"), b"a b".to_vec());
    }

    #[test]
    fn test_width_mm_scales_with_size() {
        let m = get_metrics(FontStyle::Regular);
        let at_10 = m.width_mm("Python", 10.0);
        let at_20 = m.width_mm("Python", 20.0);
        assert!((at_20 - 2.0 * at_10).abs() < 1e-4);
        // "M" at 72pt is 0.833 inch wide.
        assert!((m.width_mm("M", 72.0) - 0.833 * 25.4).abs() < 1e-3);
    }
}
