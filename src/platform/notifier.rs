use crate::screen::Notifier;
use tracing::info;

/// Notifier that logs each message and keeps a history
#[derive(Debug, Clone, Default)]
pub struct LogNotifier {
    echo: bool,
    history: Vec<String>,
}

impl LogNotifier {
    /// Also print every message to stderr
    pub fn stderr() -> Self {
        Self {
            echo: true,
            history: Vec::new(),
        }
    }

    /// Messages shown so far, oldest first
    pub fn history(&self) -> &[String] {
        &self.history
    }
}

impl Notifier for LogNotifier {
    fn notify(&mut self, message: &str) {
        info!(text = message, "notification shown");
        if self.echo {
            eprintln!("{}", message);
        }
        self.history.push(message.to_string());
    }
}
