mod component;
pub mod config;
mod detail;
pub mod index;
pub mod layout;
mod render;
pub mod scene;
mod state;
pub mod types;
pub mod viewport;

pub use component::EvolutionTreeCanvas;
pub use config::TreeConfig;
pub use detail::DetailPanel;
pub use state::Selection;
pub use types::load_lines;
