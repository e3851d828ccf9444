pub mod defaults;
pub mod evaluator;
pub mod partner;

pub use defaults::default_gates;
pub use evaluator::{evaluate, GateReport, GateResult, ValidationGate};
pub use partner::handoff_gates;
