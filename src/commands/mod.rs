pub mod general;
pub mod music;
