pub mod app;
pub mod layout;
pub mod render;
pub mod terminal;
pub mod theme;

pub use app::App;
pub use terminal::Tui;
