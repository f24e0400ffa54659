//! Pure part of the renderer: content model, options, text, layout and
//! the markup backends. Nothing in here touches files, fonts or sockets.

pub mod color;
pub mod content;
pub mod icons;
pub mod layouter;
pub mod options;
pub mod path;
pub mod renderer;
pub mod renderer_model;
pub mod text;
