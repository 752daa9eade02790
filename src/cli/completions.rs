//! Shell completion scripts for the starqr binary.

use std::io::Write;

use clap::{Args, CommandFactory};
use clap_complete::Shell;

use crate::error::Result;

use super::Cli;

/// Generate shell completions
#[derive(Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}

/// Write the completion script for `shell` to `out`.
pub fn write_completions(shell: Shell, out: &mut dyn Write) {
    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    clap_complete::generate(shell, &mut cmd, name, out);
}

pub fn run(args: CompletionsArgs) -> Result<()> {
    let stdout = std::io::stdout();
    write_completions(args.shell, &mut stdout.lock());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bash_completions_mention_subcommands() {
        let mut out = Vec::new();
        write_completions(Shell::Bash, &mut out);

        let script = String::from_utf8(out).unwrap();
        assert!(script.contains("starqr"));
        assert!(script.contains("generate"));
        assert!(script.contains("serve"));
    }
}
