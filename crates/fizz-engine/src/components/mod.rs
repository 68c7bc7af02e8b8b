pub mod config;
pub mod element;
pub mod layer;
pub mod palette;
