//! Password strength policy and the interactive entry flow.

pub mod flow;
pub mod policy;

pub use flow::{FlowEvent, FlowMode, PasswordFlow, Prompt};
pub use policy::{validate_password, PasswordPolicy, PasswordVerdict, Strength};
