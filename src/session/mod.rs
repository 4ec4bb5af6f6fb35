pub mod variant;
pub mod view;
pub mod session;

pub use variant::Variant;
pub use view::PanelView;
pub use session::Session;
