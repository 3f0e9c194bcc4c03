// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Desktop notifications via `notify-send` or `osascript`

use super::{NotifyError, TimerNotifier};
use chime_core::notification::{self, Notification, NotifyUrgency};
use chime_core::{Clock, PresenterId, Timer};
use std::collections::HashMap;
use std::process::Command;
use std::sync::{Arc, Mutex};

/// Which desktop facility delivers notifications
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DesktopBackend {
    /// libnotify (Linux desktops)
    NotifySend,
    /// AppleScript `display notification` (macOS)
    Osascript,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum Category {
    Unexpired,
    Missed,
    HeadsUp,
}

/// Posts timer notifications to the desktop
///
/// Desktop notifications cannot be withdrawn once shown, so clearing a
/// category only forgets it. Identical content is not re-posted.
#[derive(Clone)]
pub struct DesktopNotifier<C> {
    backend: DesktopBackend,
    clock: C,
    posted: Arc<Mutex<HashMap<Category, Notification>>>,
}

impl<C: Clock> DesktopNotifier<C> {
    pub fn new(backend: DesktopBackend, clock: C) -> Self {
        Self {
            backend,
            clock,
            posted: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    fn post(&self, category: Category, content: Option<Notification>) -> Result<(), NotifyError> {
        let mut posted = self.posted.lock().unwrap_or_else(|e| e.into_inner());
        let Some(content) = content else {
            posted.remove(&category);
            return Ok(());
        };
        if posted.get(&category) == Some(&content) {
            return Ok(());
        }
        self.deliver(&content)?;
        posted.insert(category, content);
        Ok(())
    }

    fn deliver(&self, content: &Notification) -> Result<(), NotifyError> {
        let (backend, mut command) = match self.backend {
            DesktopBackend::NotifySend => {
                let mut command = Command::new("notify-send");
                command.args(notify_send_args(content));
                ("notify-send", command)
            }
            DesktopBackend::Osascript => {
                let mut command = Command::new("osascript");
                command.arg("-e").arg(build_script(content));
                ("osascript", command)
            }
        };

        let output = command
            .output()
            .map_err(|e| NotifyError::Failed(e.to_string()))?;
        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(NotifyError::Backend {
                backend,
                stderr: stderr.trim().to_string(),
            });
        }
        Ok(())
    }
}

impl<C: Clock + 'static> TimerNotifier for DesktopNotifier<C> {
    fn update_unexpired(&self, timers: &[Timer]) -> Result<(), NotifyError> {
        self.post(
            Category::Unexpired,
            notification::unexpired(timers, &self.clock),
        )
    }

    fn update_missed(&self, timers: &[Timer]) -> Result<(), NotifyError> {
        self.post(Category::Missed, notification::missed(timers, &self.clock))
    }

    fn update_heads_up(
        &self,
        _presenter: &PresenterId,
        expired: &[Timer],
    ) -> Result<(), NotifyError> {
        self.post(Category::HeadsUp, notification::heads_up(expired))
    }
}

fn notify_send_args(content: &Notification) -> Vec<String> {
    let urgency = match content.urgency {
        NotifyUrgency::Normal => "low",
        NotifyUrgency::Important => "normal",
        NotifyUrgency::Critical => "critical",
    };
    vec![
        "--app-name=chime".to_string(),
        format!("--urgency={}", urgency),
        content.title.clone(),
        content.message.clone(),
    ]
}

fn build_script(content: &Notification) -> String {
    let mut script = format!(
        r#"display notification "{}" with title "{}""#,
        escape_applescript(&content.message),
        escape_applescript(&content.title),
    );
    match content.urgency {
        NotifyUrgency::Normal => {}
        NotifyUrgency::Important => script.push_str(r#" sound name "default""#),
        NotifyUrgency::Critical => script.push_str(r#" sound name "Glass""#),
    }
    script
}

/// Escape special characters for AppleScript strings
fn escape_applescript(s: &str) -> String {
    s.replace('\\', "\\\\").replace('"', "\\\"")
}

#[cfg(test)]
#[path = "desktop_tests.rs"]
mod tests;
