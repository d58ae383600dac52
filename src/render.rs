pub mod driver;
pub mod frame;
pub mod geometry;
pub mod sprite;
