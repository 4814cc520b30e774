pub mod meme;
pub mod ping;
