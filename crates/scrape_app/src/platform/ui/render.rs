use scrape_core::{AppViewModel, MenuCommand, Notice, NoticeLevel};
use scrape_engine::FetchError;

use super::constants::*;

pub fn banner() -> String {
    format!(
        "{GREEN}\u{25c9}{RESET} {BOLD}tagscrape v{}{RESET} {DIM}tag/attribute web scraper{RESET}",
        env!("CARGO_PKG_VERSION")
    )
}

pub fn menu(view: &AppViewModel) -> Vec<String> {
    let mut lines = vec![
        String::new(),
        format!("{BOLD}Web Scraper Menu{RESET}"),
    ];
    lines.extend(
        MenuCommand::ALL
            .iter()
            .map(|command| format!("  {CYAN}{}{RESET}. {}", command.key(), command.label())),
    );
    lines.push(format!(
        "{DIM}Session: {} records | merge mode: {}{RESET}",
        view.record_count, view.merge_mode
    ));
    lines
}

pub fn notice(notice: &Notice) -> String {
    let color = match notice.level {
        NoticeLevel::Info => BLUE,
        NoticeLevel::Success => GREEN,
        NoticeLevel::Warning => YELLOW,
        NoticeLevel::Error => RED,
    };
    format!("{color}{}{RESET}", notice.text)
}

pub fn fetch_failure(err: &FetchError) -> String {
    format!("{RED}Failed to fetch {}. Check error log.{RESET}", err.url)
}

/// Numbered `field: value` lines for the first preview rows.
pub fn preview(view: &AppViewModel) -> Vec<String> {
    if view.preview.is_empty() {
        return Vec::new();
    }
    let mut lines: Vec<String> = view
        .preview
        .iter()
        .enumerate()
        .map(|(index, record)| format!("  {:>3}  {}", index + 1, record))
        .collect();
    let hidden = view.record_count.saturating_sub(view.preview.len());
    if hidden > 0 {
        lines.push(format!("  {DIM}... and {hidden} more{RESET}"));
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use scrape_core::{MergeMode, ScrapedRecord};

    #[test]
    fn menu_lists_every_command_in_order() {
        let lines = menu(&AppViewModel::default());
        let body: Vec<&String> = lines.iter().skip(2).take(8).collect();
        assert!(body[0].contains("1") && body[0].ends_with("Scrape a Single Page"));
        assert!(body[7].contains("8") && body[7].ends_with("Exit"));
        assert!(lines.last().unwrap().contains("merge mode: replace"));
    }

    #[test]
    fn notice_is_colored_by_level() {
        let line = notice(&Notice::new(NoticeLevel::Error, "No data to save!"));
        assert_eq!(line, format!("{RED}No data to save!{RESET}"));
    }

    #[test]
    fn preview_reports_hidden_rows() {
        let view = AppViewModel {
            record_count: 12,
            merge_mode: MergeMode::Append,
            preview: vec![ScrapedRecord::new("Span", "$10")],
            ..AppViewModel::default()
        };
        let lines = preview(&view);
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("Span: $10"));
        assert!(lines[1].contains("and 11 more"));
    }
}
