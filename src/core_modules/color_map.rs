// THEORY:
// The `ColorMap` module decides what a cell looks like. It is a family of pure
// functions from a cell value to a 16-bit RGB triple, and nothing else: no state,
// no knowledge of where the cell sits in the grid.
//
// Key architectural principles:
// 1.  **Capability, not hierarchy**: `ColorPolicy` is the seam. Anything that can
//     answer `r`, `g` and `b` for a value can drive the renderer, including
//     caller-defined maps. The built-in maps are a closed `ColorMap` enum that
//     implements the trait, chosen at call time.
// 2.  **One channel width**: every channel is `u16` (0..=65535). The categorical
//     palette is authored in 8-bit sRGB bytes and widened by `* 256` on lookup.
// 3.  **Explicit domains**: maps that only make sense for a range of values (the
//     heat maps, `0..=8`) report it through `domain()`. The infallible lookups
//     saturate or clamp out-of-domain values; `checked_rgb` and the strict
//     renderer refuse them instead.

pub mod color_map {
    use crate::error::ConfigError;
    use std::ops::RangeInclusive;
    use std::str::FromStr;

    pub type Channel = u16;
    pub type Rgb16 = [Channel; 3];

    pub const CHANNEL_MAX: i64 = Channel::MAX as i64;

    /// Number of living neighbours a cell can have, and so the top of the heat scale.
    pub const HEAT_LEVELS: i64 = 8;

    /// 9-level categorical palette (8-bit sRGB), indexed by cell value.
    pub static CATEGORICAL_PALETTE: [[u8; 3]; 9] = [
        [0, 0, 0],
        [128, 128, 128],
        [255, 255, 25],
        [245, 130, 48],
        [0, 130, 200],
        [240, 50, 230],
        [237, 77, 62],
        [60, 180, 75],
        [145, 30, 255],
    ];

    /// Maps a cell value to 16-bit color channels.
    pub trait ColorPolicy {
        fn r(&self, value: i64) -> Channel;
        fn g(&self, value: i64) -> Channel;
        fn b(&self, value: i64) -> Channel;

        fn rgb(&self, value: i64) -> Rgb16 {
            [self.r(value), self.g(value), self.b(value)]
        }

        /// Values this map is defined for. `None` means every value.
        fn domain(&self) -> Option<RangeInclusive<i64>> {
            None
        }

        /// Like `rgb`, but `None` for values outside `domain()`.
        fn checked_rgb(&self, value: i64) -> Option<Rgb16> {
            match self.domain() {
                Some(domain) if !domain.contains(&value) => None,
                _ => Some(self.rgb(value)),
            }
        }
    }

    /// The built-in color maps.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
    pub enum ColorMap {
        /// Pseudo-gradient keyed by value, wrapping every 13107 steps.
        #[default]
        Procedural,
        /// Dead cells black, anything else white.
        BlackWhite,
        /// Red ramp over `0..=8`.
        Heat,
        /// One palette entry per value in `0..=8`.
        CategoricalHeat,
    }

    #[inline]
    fn procedural_channel(offset: i64, value: i64) -> Channel {
        let raw = offset.wrapping_add(value.wrapping_mul(500));
        raw.rem_euclid(CHANNEL_MAX) as Channel
    }

    #[inline]
    fn heat_channel(value: i64) -> Channel {
        (value.saturating_mul(CHANNEL_MAX) / HEAT_LEVELS).clamp(0, CHANNEL_MAX) as Channel
    }

    #[inline]
    fn palette_entry(value: i64) -> &'static [u8; 3] {
        let index = value.clamp(0, CATEGORICAL_PALETTE.len() as i64 - 1) as usize;
        &CATEGORICAL_PALETTE[index]
    }

    #[inline]
    fn bw_channel(value: i64) -> Channel {
        if value != 0 { Channel::MAX } else { 0 }
    }

    impl ColorPolicy for ColorMap {
        fn r(&self, value: i64) -> Channel {
            match self {
                ColorMap::Procedural => procedural_channel(2500, value),
                ColorMap::BlackWhite => bw_channel(value),
                ColorMap::Heat => heat_channel(value),
                ColorMap::CategoricalHeat => palette_entry(value)[0] as Channel * 256,
            }
        }

        fn g(&self, value: i64) -> Channel {
            match self {
                ColorMap::Procedural => procedural_channel(10408, value),
                ColorMap::BlackWhite => bw_channel(value),
                ColorMap::Heat => 0,
                ColorMap::CategoricalHeat => palette_entry(value)[1] as Channel * 256,
            }
        }

        fn b(&self, value: i64) -> Channel {
            match self {
                ColorMap::Procedural => procedural_channel(7401, value),
                ColorMap::BlackWhite => bw_channel(value),
                ColorMap::Heat => 0,
                ColorMap::CategoricalHeat => palette_entry(value)[2] as Channel * 256,
            }
        }

        fn domain(&self) -> Option<RangeInclusive<i64>> {
            match self {
                ColorMap::Procedural | ColorMap::BlackWhite => None,
                ColorMap::Heat | ColorMap::CategoricalHeat => Some(0..=HEAT_LEVELS),
            }
        }
    }

    impl FromStr for ColorMap {
        type Err = ConfigError;

        fn from_str(name: &str) -> Result<Self, Self::Err> {
            match name.to_ascii_lowercase().as_str() {
                "default" | "procedural" => Ok(ColorMap::Procedural),
                "black-white" | "blackwhite" | "bw" => Ok(ColorMap::BlackWhite),
                "heat" => Ok(ColorMap::Heat),
                "categorical" | "color-heat" => Ok(ColorMap::CategoricalHeat),
                _ => Err(ConfigError::UnknownColorMap(name.to_string())),
            }
        }
    }
}
