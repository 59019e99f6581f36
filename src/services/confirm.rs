use std::io::{self, BufRead, Write};

/// Interactive yes/no gate consulted before a destructive action.
pub trait Confirm: Send + Sync {
    fn confirm(&self, prompt: &str) -> bool;
}

/// Proof that the confirmation gate answered yes.
///
/// Deletions take one by value, so a delete cannot be issued without asking.
#[derive(Debug)]
pub struct Approval {
    _private: (),
}

/// Ask `gate`; `None` means the user declined and nothing should happen.
pub fn request_approval(gate: &dyn Confirm, prompt: &str) -> Option<Approval> {
    if gate.confirm(prompt) {
        Some(Approval { _private: () })
    } else {
        tracing::debug!(prompt, "confirmation declined");
        None
    }
}

/// Prompts on stdout and reads `y`/`yes` from stdin.
#[derive(Debug, Default, Clone, Copy)]
pub struct StdinConfirm;

impl Confirm for StdinConfirm {
    fn confirm(&self, prompt: &str) -> bool {
        print!("{prompt} [y/N] ");
        if io::stdout().flush().is_err() {
            return false;
        }
        let mut line = String::new();
        match io::stdin().lock().read_line(&mut line) {
            Ok(_) => matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes"),
            Err(_) => false,
        }
    }
}

/// Always gives the same answer. Useful for scripted runs.
#[derive(Debug, Clone, Copy)]
pub struct FixedConfirm(pub bool);

impl Confirm for FixedConfirm {
    fn confirm(&self, _prompt: &str) -> bool {
        self.0
    }
}
