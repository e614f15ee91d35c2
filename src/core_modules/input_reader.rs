// THEORY:
// The `InputReader` turns a plain-text world description into grid cells. The
// format is deliberately minimal: a stream of whitespace-separated tokens, top
// row first, with `x`, `X` or `1` meaning a living cell and anything else a dead
// one. There are no row terminators; rows are cut purely by the renderable width.
// Tokens are raw bytes split on the C-locale whitespace set, so a token that is
// not UTF-8 is simply a dead cell and non-ASCII spaces do not split tokens.
//
// Key architectural principles:
// 1.  **Same addressing as the renderer**: tokens are written through
//     `GridLayout::renderable_positions`, so ghost cells are skipped exactly where
//     the renderer will skip them, and are never written.
// 2.  **Fail fast on overflow**: the moment a token would land past the last
//     renderable cell the load stops with `TooManyTokens`. Cells already written
//     stay written; callers get no partial-state guarantee.
// 3.  **Short input is the caller's business**: fewer tokens than cells is not an
//     error. The remaining cells keep whatever the buffer held, so callers should
//     clear the buffer first.

pub mod input_reader {
    use crate::core_modules::cell::cell::CellValue;
    use crate::core_modules::grid_layout::GridLayout;
    use crate::error::LoadError;
    use log::{debug, error};
    use std::fs::File;
    use std::io::{BufRead, BufReader};
    use std::path::Path;

    /// Whether a token describes a living cell.
    #[inline]
    pub fn is_alive(token: &[u8]) -> bool {
        matches!(token, b"x" | b"X" | b"1")
    }

    /// Space, tab, newline, vertical tab, form feed and carriage return.
    #[inline]
    pub fn is_separator(byte: u8) -> bool {
        matches!(byte, b' ' | b'\t' | b'\n' | b'\x0B' | b'\x0C' | b'\r')
    }

    /// Loads the grid file at `path` into `grid`. Returns the number of cells written.
    pub fn read_input<T: CellValue>(
        path: impl AsRef<Path>,
        grid: &mut [T],
        layout: &GridLayout,
    ) -> Result<usize, LoadError> {
        let path = path.as_ref();
        let file = File::open(path).map_err(|source| {
            error!("can't open file {}", path.display());
            LoadError::FileOpen { path: path.to_path_buf(), source }
        })?;
        read_from(BufReader::new(file), path, grid, layout)
    }

    /// Loads tokens from any buffered reader. `origin` names the source in errors.
    pub fn read_from<T: CellValue, R: BufRead>(
        reader: R,
        origin: &Path,
        grid: &mut [T],
        layout: &GridLayout,
    ) -> Result<usize, LoadError> {
        layout.check_buffer(grid.len())?;

        let mut positions = layout.renderable_positions();
        let mut count_elements = 0usize;

        for line in reader.split(b'\n') {
            let line = line.map_err(|source| LoadError::Read {
                path: origin.to_path_buf(),
                source,
            })?;

            for word in line.split(|&byte| is_separator(byte)).filter(|word| !word.is_empty()) {
                let Some((x, y)) = positions.next() else {
                    error!("too many elements in file {}", origin.display());
                    return Err(LoadError::TooManyTokens { path: origin.to_path_buf() });
                };
                grid[layout.index(x, y)] = T::from_alive(is_alive(word));
                count_elements += 1;
            }
        }

        if count_elements < layout.renderable_cells() {
            debug!(
                "{} filled {} of {} renderable cells",
                origin.display(),
                count_elements,
                layout.renderable_cells()
            );
        }
        Ok(count_elements)
    }
}
