pub mod mse;
pub mod bce;
pub mod loss_type;

pub use mse::MseLoss;
pub use bce::BceLoss;
pub use loss_type::LossType;
