//! IO modules - side effects (network, filesystem)

pub mod cdn;
pub mod fetch;
pub mod output;
