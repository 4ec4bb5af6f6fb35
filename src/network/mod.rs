pub mod network;
pub mod snapshot;
pub mod spec;

pub use network::Network;
pub use snapshot::{LayerSnapshot, ParameterSnapshot};
pub use spec::{LayerSpec, Topology};
