pub mod instance;
pub mod result;

pub use instance::{BlockDevice, InstanceMap, InstanceRecord};
pub use result::{DriftReport, DriftedAttribute, SingleResult};
