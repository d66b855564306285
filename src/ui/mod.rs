pub mod console;
pub mod input;
pub mod renderer;
