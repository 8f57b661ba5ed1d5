pub mod frame;
pub mod level;
pub mod world;
