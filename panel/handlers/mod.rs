pub mod network;
pub mod panel;
pub mod tiles;
pub mod train;
