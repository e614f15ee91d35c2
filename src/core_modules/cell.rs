// THEORY:
// A grid is a flat buffer of some scalar type chosen by the caller: `bool` for a
// plain Game of Life world, `u8`/`i32` for worlds that store neighbour counts or
// heat levels. The rest of the pipeline only needs two things from that type:
// 1.  **Widening**: color maps do their arithmetic on `i64`, so every cell type
//     must widen losslessly (or saturate, for the 64-bit unsigned types).
// 2.  **Construction**: the text loader writes "alive" and "dead" cells, which
//     are `1` and `0` in whatever type the buffer holds.

pub mod cell {
    /// A scalar type that can live in a grid buffer.
    pub trait CellValue: Copy {
        /// Widens the value for color arithmetic.
        ///
        /// `u64` and `usize` values above `i64::MAX` saturate to `i64::MAX`, so
        /// they all get the same color.
        fn to_i64(self) -> i64;

        /// `1` for a living cell, `0` for a dead one.
        fn from_alive(alive: bool) -> Self;
    }

    impl CellValue for bool {
        fn to_i64(self) -> i64 {
            self as i64
        }

        fn from_alive(alive: bool) -> Self {
            alive
        }
    }

    macro_rules! impl_cell_value {
        ($($ty:ty),* $(,)?) => {
            $(
                impl CellValue for $ty {
                    #[inline]
                    fn to_i64(self) -> i64 {
                        i64::try_from(self).unwrap_or(i64::MAX)
                    }

                    #[inline]
                    fn from_alive(alive: bool) -> Self {
                        if alive { 1 } else { 0 }
                    }
                }
            )*
        };
    }

    impl_cell_value!(u8, u16, u32, u64, usize, i8, i16, i32, i64);
}
