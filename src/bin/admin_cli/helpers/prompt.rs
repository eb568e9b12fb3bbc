// ABOUTME: Terminal implementations of the shell's confirm and notify collaborators
// ABOUTME: Prompts on stderr and reads the answer from stdin
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Admin Panel Contributors

use admin_panel::shell::{Confirm, Notifier};
use async_trait::async_trait;
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::warn;

/// Asks on the terminal unless `assume_yes` is set
pub struct StdinConfirm {
    pub assume_yes: bool,
}

#[async_trait]
impl Confirm for StdinConfirm {
    async fn confirm(&self, message: &str) -> bool {
        if self.assume_yes {
            return true;
        }
        let mut stderr = io::stderr();
        let prompt = format!("{message} [y/N] ");
        if let Err(e) = stderr.write_all(prompt.as_bytes()).await {
            warn!(error = %e, "Could not show confirmation prompt");
            return false;
        }
        if stderr.flush().await.is_err() {
            return false;
        }
        let mut answer = String::new();
        match BufReader::new(io::stdin()).read_line(&mut answer).await {
            Ok(_) => matches!(answer.trim().to_lowercase().as_str(), "y" | "yes"),
            Err(e) => {
                warn!(error = %e, "Could not read confirmation");
                false
            }
        }
    }
}

/// Prints alerts on stderr
pub struct StderrNotifier;

impl Notifier for StderrNotifier {
    fn alert(&self, message: &str) {
        eprintln!("Error: {message}");
    }
}
