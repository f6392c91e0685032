//! The color table mapping escape counts to pixels.  Built once at
//! startup, read-only afterward, shared by every presentation step.

/// One RGBA table entry.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Rgba {
    /// Red component.
    pub r: u8,
    /// Green component.
    pub g: u8,
    /// Blue component.
    pub b: u8,
    /// Alpha component, always opaque here.
    pub a: u8,
}

impl Rgba {
    /// Packs the entry as 0xAARRGGBB, the layout minifb and friends
    /// expect for a 32-bit framebuffer word.
    pub fn to_argb(&self) -> u32 {
        (u32::from(self.a) << 24)
            | (u32::from(self.r) << 16)
            | (u32::from(self.g) << 8)
            | u32::from(self.b)
    }
}

/// A lookup table with one entry per possible escape count below the
/// iteration limit.  In-set pixels (count == limit) wrap around to
/// entry zero, which stays black.
#[derive(Clone, Debug)]
pub struct Palette {
    colors: Vec<Rgba>,
}

impl Palette {
    /// The classic banded table: each channel is a small modular
    /// perturbation of the count itself, truncated to a byte.  The
    /// deliberate u8 wrap-around is what produces the color bands.
    ///
    /// # Panics
    ///
    /// Panics if `limit` is zero; a table with no entries could never
    /// answer a lookup.
    pub fn classic(limit: u32) -> Palette {
        assert!(limit > 0, "a color table needs at least one entry");
        let black = Rgba {
            r: 0,
            g: 0,
            b: 0,
            a: 255,
        };
        let mut colors = vec![black; limit as usize];
        for (i, entry) in colors.iter_mut().enumerate().skip(1) {
            let i = i as u32;
            entry.r = (i + 32 % i) as u8;
            entry.g = (i + 64 % i) as u8;
            entry.b = (i + 96) as u8;
        }
        Palette { colors }
    }

    /// Number of entries, which equals the iteration limit.
    pub fn len(&self) -> usize {
        self.colors.len()
    }

    /// True for a zero-entry table, which `classic` never builds.
    pub fn is_empty(&self) -> bool {
        self.colors.is_empty()
    }

    /// The color for an escape count, wrapping counts at or above the
    /// table length back into range.
    pub fn color(&self, count: u32) -> Rgba {
        self.colors[(count as usize) % self.colors.len()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_zero_is_black_and_opaque() {
        let p = Palette::classic(256);
        let zero = p.color(0);
        assert_eq!((zero.r, zero.g, zero.b, zero.a), (0, 0, 0, 255));
    }

    #[test]
    fn in_set_counts_wrap_to_black() {
        let p = Palette::classic(256);
        assert_eq!(p.color(256), p.color(0));
        assert_eq!(p.color(513), p.color(1));
    }

    #[test]
    fn table_has_one_entry_per_count() {
        assert_eq!(Palette::classic(512).len(), 512);
    }

    #[test]
    fn channel_formula_matches_the_banding() {
        let p = Palette::classic(256);
        let e = p.color(10);
        assert_eq!(e.r, (10 + 32 % 10) as u8);
        assert_eq!(e.g, (10 + 64 % 10) as u8);
        assert_eq!(e.b, 10 + 96);
        // Blue wraps past 255 in the upper half of the table.
        assert_eq!(p.color(200).b, ((200u32 + 96) % 256) as u8);
    }

    #[test]
    #[should_panic(expected = "at least one entry")]
    fn zero_entry_table_is_refused() {
        Palette::classic(0);
    }

    #[test]
    fn argb_packing() {
        let c = Rgba {
            r: 0x12,
            g: 0x34,
            b: 0x56,
            a: 0xff,
        };
        assert_eq!(c.to_argb(), 0xff12_3456);
    }
}
