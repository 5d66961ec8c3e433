mod drain_gate;

pub use drain_gate::DrainGate;
