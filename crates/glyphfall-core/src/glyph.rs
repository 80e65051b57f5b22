//! Glyph catalogs and the pre-drawn glyph index stream.
//!
//! Drawing a fresh random number for every cell on every tick is wasteful for
//! a purely cosmetic effect, so the engine draws [`GLYPH_BUFFER_LEN`] indices
//! once and cycles through them. The shorter period is invisible at animation
//! speed.

use rand::Rng;

/// Index into a [`Catalog`]. Index 0 is reserved for "no visible glyph".
pub type GlyphIndex = u16;

/// Number of pre-drawn indices in a [`GlyphSource`].
pub const GLYPH_BUFFER_LEN: usize = 1000;

/// Glyph painted in place of catalog glyphs in lambda mode.
pub const LAMBDA: char = 'λ';

const LATIN: &[char] = &[
    ' ', 'A', 'B', 'C', 'D', 'E', 'F', 'G', 'H', 'I', 'J', 'K', 'L', 'M', 'N', 'O', 'P', 'Q', 'R',
    'S', 'T', 'U', 'V', 'W', 'X', 'Y', 'Z', 'a', 'b', 'c', 'd', 'e', 'f', 'g', 'h', 'i', 'j', 'k',
    'l', 'm', 'n', 'o', 'p', 'q', 'r', 's', 't', 'u', 'v', 'w', 'x', 'y', 'z', '0', '1', '2', '3',
    '4', '5', '6', '7', '8', '9',
];

const KATAKANA: &[char] = &[
    ' ', 'ﾊ', 'ﾐ', 'ﾋ', 'ｰ', 'ｳ', 'ｼ', 'ﾅ', 'ﾓ', 'ﾆ', 'ｻ', 'ﾜ', 'ﾂ', 'ｵ', 'ﾘ', 'ｱ', 'ﾎ', 'ﾃ', 'ﾏ',
    'ｹ', 'ﾒ', 'ｴ', 'ｶ', 'ｷ', 'ﾑ', 'ﾕ', 'ﾗ', 'ｾ', 'ﾈ', 'ｽ', 'ﾀ', 'ﾇ', 'ﾍ', '0', '1', '2', '3', '4',
    '5', '6', '7', '8', '9', 'Z',
];

/// Set of displayable glyphs.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum Catalog {
    /// Latin letters and digits.
    #[default]
    Latin,
    /// Half-width katakana, digits and `Z`. Needs a font that has them.
    Katakana,
}

impl Catalog {
    /// Largest index any catalog can resolve without folding.
    ///
    /// The glyph stream draws from `1..=MAX_INDEX` so the active catalog can
    /// change between ticks without invalidating stored indices.
    pub const MAX_INDEX: GlyphIndex = (LATIN.len() - 1) as GlyphIndex;

    fn glyphs(self) -> &'static [char] {
        match self {
            Self::Latin => LATIN,
            Self::Katakana => KATAKANA,
        }
    }

    /// Number of entries, including the reserved index 0.
    pub fn len(self) -> usize {
        self.glyphs().len()
    }

    /// Always `false`; every catalog has at least one visible glyph.
    pub fn is_empty(self) -> bool {
        self.len() <= 1
    }

    /// The other catalog.
    #[must_use]
    pub fn toggled(self) -> Self {
        match self {
            Self::Latin => Self::Katakana,
            Self::Katakana => Self::Latin,
        }
    }

    /// Glyph for `index`. Index 0 is a blank; indices past the end of this
    /// catalog fold back into `1..len`.
    pub fn glyph(self, index: GlyphIndex) -> char {
        let glyphs = self.glyphs();
        if index == 0 {
            return ' ';
        }
        let visible = glyphs.len() - 1;
        let slot = 1 + (usize::from(index) - 1) % visible;
        glyphs.get(slot).copied().unwrap_or(' ')
    }
}

/// Cyclic stream of pre-drawn glyph indices.
///
/// One cursor is shared by every column; each request advances it by one and
/// wraps to the start after [`GLYPH_BUFFER_LEN`] requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GlyphSource {
    buffer: Vec<GlyphIndex>,
    cursor: usize,
}

impl GlyphSource {
    /// Draw a fresh buffer uniformly from `1..=Catalog::MAX_INDEX`.
    pub fn generate<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let buffer =
            (0..GLYPH_BUFFER_LEN).map(|_| rng.gen_range(1..=Catalog::MAX_INDEX)).collect();
        Self { buffer, cursor: 0 }
    }

    /// Next index in the stream. Never returns 0.
    pub fn next_index(&mut self) -> GlyphIndex {
        let index = self.buffer.get(self.cursor).copied().unwrap_or(1);
        self.cursor += 1;
        if self.cursor >= self.buffer.len() {
            self.cursor = 0;
        }
        index
    }

    /// Position of the next index to be handed out.
    pub fn cursor(&self) -> usize {
        self.cursor
    }
}
