// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Clock recovery commands
//!
//! The daemon notices reboots and wall clock changes on its own. These
//! commands apply the same batch reconciliation by hand, for machines that
//! run without the daemon.

use super::CliModel;
use crate::error::from_model;
use crate::output::{self, OutputFormat};
use anyhow::Result;
use clap::{ArgGroup, Args};
use serde::Serialize;
use std::fmt;

#[derive(Args)]
#[command(group(ArgGroup::new("event").required(true).args(["reboot", "time_set"])))]
pub struct RecoverArgs {
    /// The boot clock restarted; mark long-overdue running timers missed
    #[arg(long)]
    pub reboot: bool,
    /// The wall clock was changed; re-anchor running timers to it
    #[arg(long)]
    pub time_set: bool,
}

#[derive(Debug, Serialize)]
pub struct RecoverReport {
    pub event: &'static str,
    pub running: usize,
    pub missed: usize,
}

impl fmt::Display for RecoverReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Recovered after {}: {} running, {} missed",
            self.event, self.running, self.missed
        )
    }
}

pub fn handle(model: &mut CliModel, args: RecoverArgs, format: OutputFormat) -> Result<()> {
    let event = if args.reboot {
        model.update_timers_after_reboot().map_err(from_model)?;
        "reboot"
    } else {
        model.update_timers_after_time_set().map_err(from_model)?;
        "time set"
    };

    let report = RecoverReport {
        event,
        running: model.timers().iter().filter(|t| t.is_running()).count(),
        missed: model.missed_timers().len(),
    };
    output::print(&report, format);
    Ok(())
}
