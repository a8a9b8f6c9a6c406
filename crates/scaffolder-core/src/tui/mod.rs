//! Interactive project creation using cliclack prompts
//!
//! Every prompt has a matching field in [`CreateArgs`]; `yes` accepts the
//! defaults and the newest versions for anything left unset.

mod prompts;

pub use prompts::{run, CreateArgs};
