//! Everything that touches the outside world: font files, pixels,
//! sockets and the local file system.

pub mod font;
pub mod io;
pub mod network;
pub mod renderer;

pub(crate) mod os;
