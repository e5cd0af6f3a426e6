pub mod cycles;
pub mod dead_code;
pub mod detector;
pub mod engine;
pub mod hubs;
pub mod memory_adapter;
pub mod orphans;
pub mod remediation;
pub mod snapshot;

pub use cycles::*;
pub use dead_code::*;
pub use detector::*;
pub use engine::*;
pub use hubs::*;
pub use memory_adapter::*;
pub use orphans::*;
pub use remediation::*;
pub use snapshot::*;
