pub mod cell;
pub mod color_map;
pub mod grid_layout;
pub mod input_reader;
pub mod pixel_buffer;
pub mod renderer;
pub mod utils;
