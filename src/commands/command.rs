//! Command trait definition for CLI commands.
//!
//! Every vcfload subcommand implements [`Command`]; `enum_dispatch` gives the
//! subcommand enum efficient static dispatch over the variants.

use enum_dispatch::enum_dispatch;

/// Trait implemented by all vcfload CLI commands.
#[enum_dispatch]
pub trait Command {
    /// Run the command's main logic.
    fn execute(&self) -> anyhow::Result<()>;
}
