pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";
pub const DIM: &str = "\x1b[90m";
pub const RED: &str = "\x1b[31m";
pub const GREEN: &str = "\x1b[32m";
pub const YELLOW: &str = "\x1b[33m";
pub const BLUE: &str = "\x1b[34m";
pub const CYAN: &str = "\x1b[36m";

pub const PROMPT_CHOICE: &str = "Enter your choice: ";
pub const PROMPT_URL: &str = "Enter the URL to scrape: ";
pub const PROMPT_BASE_URL: &str = "Enter the base URL for pagination: ";
pub const PROMPT_TAG: &str = "Enter the HTML tag to scrape (e.g., 'h1', 'p', 'div', 'span'): ";
pub const PROMPT_ATTRIBUTE: &str = "Enter the attribute to filter by (e.g., 'class', 'id'): ";
pub const PROMPT_VALUE: &str = "Enter the value of the attribute: ";

pub const INVALID_CHOICE: &str = "Invalid choice. Please try again.";
