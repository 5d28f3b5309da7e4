use std::str::FromStr;

/// The closed set of interactive menu commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuCommand {
    ScrapePage,
    ScrapePages,
    SaveCsv,
    SaveSqlite,
    SaveJson,
    Preview,
    ToggleMergeMode,
    Exit,
}

impl MenuCommand {
    pub const ALL: [MenuCommand; 8] = [
        MenuCommand::ScrapePage,
        MenuCommand::ScrapePages,
        MenuCommand::SaveCsv,
        MenuCommand::SaveSqlite,
        MenuCommand::SaveJson,
        MenuCommand::Preview,
        MenuCommand::ToggleMergeMode,
        MenuCommand::Exit,
    ];

    pub fn key(self) -> &'static str {
        match self {
            MenuCommand::ScrapePage => "1",
            MenuCommand::ScrapePages => "2",
            MenuCommand::SaveCsv => "3",
            MenuCommand::SaveSqlite => "4",
            MenuCommand::SaveJson => "5",
            MenuCommand::Preview => "6",
            MenuCommand::ToggleMergeMode => "7",
            MenuCommand::Exit => "8",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            MenuCommand::ScrapePage => "Scrape a Single Page",
            MenuCommand::ScrapePages => "Scrape Multiple Pages (Pagination)",
            MenuCommand::SaveCsv => "Save Data to CSV",
            MenuCommand::SaveSqlite => "Save Data to SQLite Database",
            MenuCommand::SaveJson => "Save Data to JSON",
            MenuCommand::Preview => "Preview Data",
            MenuCommand::ToggleMergeMode => "Toggle Merge Mode (replace/append)",
            MenuCommand::Exit => "Exit",
        }
    }

    pub fn parse(input: &str) -> Result<Self, InputError> {
        let choice = input.trim();
        if let Some(command) = Self::ALL.into_iter().find(|c| c.key() == choice) {
            return Ok(command);
        }
        match choice.to_ascii_lowercase().as_str() {
            "q" | "quit" | "exit" => Ok(MenuCommand::Exit),
            _ => Err(InputError::UnknownCommand(choice.to_string())),
        }
    }
}

impl FromStr for MenuCommand {
    type Err = InputError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("unknown menu choice '{0}'")]
    UnknownCommand(String),
    #[error("invalid page count '{0}': expected a positive whole number")]
    InvalidPageCount(String),
}

/// Parse the page-count prompt. No re-prompt: a bad value aborts the command.
pub fn parse_page_count(input: &str) -> Result<u32, InputError> {
    let trimmed = input.trim();
    match trimmed.parse::<u32>() {
        Ok(count) if count > 0 => Ok(count),
        _ => Err(InputError::InvalidPageCount(trimmed.to_string())),
    }
}

/// Use `default` when the answer is blank.
pub fn or_default(input: &str, default: &str) -> String {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        default.to_string()
    } else {
        trimmed.to_string()
    }
}
