// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shell completion generation for the chime CLI.
//!
//! ```bash
//! chime completions bash > ~/.local/share/bash-completion/completions/chime
//! chime completions zsh > ~/.zfunc/_chime
//! chime completions fish > ~/.config/fish/completions/chime.fish
//! ```

use clap::CommandFactory;
use clap_complete::{generate, Shell};
use std::io::Write;

/// Generate shell completions for `C` into `out`.
pub fn generate_completions<C: CommandFactory>(shell: Shell, out: &mut dyn Write) {
    let mut cmd = C::command();
    generate(shell, &mut cmd, "chime", out);
}

/// Arguments for the completions command.
#[derive(clap::Args, Debug)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: Shell,
}
