use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::{Config, Editor};
use scrape_logging::scrape_warn;

/// Why a prompt produced no answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Interrupt {
    /// Ctrl-C: abandon the current command and return to the menu.
    Cancelled,
    /// Ctrl-D or a broken terminal: leave the program.
    Closed,
}

pub struct Prompter {
    editor: Editor<(), DefaultHistory>,
}

impl Prompter {
    pub fn new() -> rustyline::Result<Self> {
        let config = Config::builder()
            .history_ignore_space(true)
            .auto_add_history(true)
            .build();
        let editor = Editor::with_config(config)?;
        Ok(Self { editor })
    }

    pub fn ask(&mut self, prompt: &str) -> Result<String, Interrupt> {
        match self.editor.readline(prompt) {
            Ok(line) => Ok(line.trim().to_string()),
            Err(ReadlineError::Interrupted) => Err(Interrupt::Cancelled),
            Err(ReadlineError::Eof) => Err(Interrupt::Closed),
            Err(err) => {
                scrape_warn!("Prompt failed: {}", err);
                Err(Interrupt::Closed)
            }
        }
    }
}
