pub mod draw_command;

pub use draw_command::{DrawCommand, Stroke, corner_radius, generate_draw_commands};
