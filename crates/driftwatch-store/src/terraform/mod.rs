//! Terraform desired-state loading
//!
//! JSON state files and HCL configuration are both understood;
//! `aws_instance` resources are mapped onto instance records and
//! everything else is ignored.

pub mod format;
mod hcl;
pub mod parser;

pub use self::hcl::parse_hcl;
pub use parser::{parse_state_file, parse_state_json, TerraformStateSource};
