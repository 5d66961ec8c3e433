mod const_input;
mod permit_input;
mod scalar_input;

pub use const_input::ConstInput;
pub use permit_input::PermitInput;
pub use scalar_input::ScalarInput;
