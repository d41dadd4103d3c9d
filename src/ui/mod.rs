pub mod assets;
pub mod board_layout;
pub mod components;
pub mod theme;
pub mod view_models;
pub mod views;

pub use assets::FileAssets;
pub use board_layout::BoardLayout;
