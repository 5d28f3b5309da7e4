use std::collections::VecDeque;
use std::path::PathBuf;

use scrape_core::{
    capitalize, or_default, parse_page_count, update, AppState, ExtractRule, MenuCommand, Msg,
    Notice, NoticeLevel, PaginationPlan, ScrapeJob, SinkTarget,
};
use scrape_logging::scrape_info;

use super::config::ScraperConfig;
use super::effects::EffectRunner;
use super::ui::constants::*;
use super::ui::prompt::{Interrupt, Prompter};
use super::ui::render;

pub fn run_app(config: ScraperConfig) -> anyhow::Result<()> {
    let mut prompter = Prompter::new()?;
    let runner = EffectRunner::new(config.engine_settings());
    let mut state = AppState::with_merge_mode(config.merge_mode);

    println!("{}", render::banner());
    loop {
        for line in render::menu(&state.view()) {
            println!("{line}");
        }
        let choice = match prompter.ask(PROMPT_CHOICE) {
            Ok(choice) => choice,
            Err(Interrupt::Cancelled) => continue,
            Err(Interrupt::Closed) => break,
        };
        let command = match MenuCommand::parse(&choice) {
            Ok(command) => command,
            Err(_) => {
                show(&Notice::new(NoticeLevel::Error, INVALID_CHOICE));
                continue;
            }
        };
        match read_command(command, &mut prompter, &config) {
            Ok(Some(msg)) => state = dispatch(state, msg, &runner),
            Ok(None) => break,
            Err(Interrupt::Cancelled) => continue,
            Err(Interrupt::Closed) => break,
        }
    }

    println!("Exiting...");
    scrape_info!("Session ended with {} records", state.session().len());
    Ok(())
}

/// Runs `msg` through `update`, executing effects until no follow-up messages remain.
fn dispatch(mut state: AppState, msg: Msg, runner: &EffectRunner) -> AppState {
    let mut inbox = VecDeque::from([msg]);
    while let Some(msg) = inbox.pop_front() {
        let wants_preview = matches!(msg, Msg::PreviewRequested);
        let (next, effects) = update(state, msg);
        state = next;

        if let Some(notice) = state.take_notice() {
            show(&notice);
        }
        if wants_preview {
            for line in render::preview(&state.view()) {
                println!("{line}");
            }
        }
        state.consume_dirty();

        for effect in effects {
            inbox.extend(runner.run(effect));
        }
    }
    state
}

fn show(notice: &Notice) {
    println!("{}", render::notice(notice));
}

/// Collects the answers a command needs and turns them into a message; `None` for Exit.
fn read_command(
    command: MenuCommand,
    prompter: &mut Prompter,
    config: &ScraperConfig,
) -> Result<Option<Msg>, Interrupt> {
    let msg = match command {
        MenuCommand::ScrapePage => {
            let url = prompter.ask(PROMPT_URL)?;
            let rule = read_rule(prompter)?;
            Msg::ScrapeRequested(ScrapeJob::Single { url, rule })
        }
        MenuCommand::ScrapePages => {
            let base_url = prompter.ask(PROMPT_BASE_URL)?;
            let rule = read_rule(prompter)?;
            let answer = prompter.ask(&format!(
                "Enter the number of pages to scrape (default {}): ",
                config.default_max_pages
            ))?;
            match page_count(&answer, config.default_max_pages) {
                Ok(max_pages) => {
                    let plan = PaginationPlan::new(base_url)
                        .with_page_param(config.page_param.clone())
                        .with_max_pages(max_pages);
                    Msg::ScrapeRequested(ScrapeJob::Paginated { plan, rule })
                }
                Err(err) => Msg::InputRejected(err.to_string()),
            }
        }
        MenuCommand::SaveCsv => {
            let answer = prompter.ask(&default_prompt("CSV filename", &config.csv_file))?;
            Msg::SaveRequested(SinkTarget::Csv {
                path: PathBuf::from(or_default(&answer, &config.csv_file)),
            })
        }
        MenuCommand::SaveJson => {
            let answer = prompter.ask(&default_prompt("JSON filename", &config.json_file))?;
            Msg::SaveRequested(SinkTarget::Json {
                path: PathBuf::from(or_default(&answer, &config.json_file)),
            })
        }
        MenuCommand::SaveSqlite => {
            let db = prompter.ask(&default_prompt("database filename", &config.db_file))?;
            let table = prompter.ask(&default_prompt("table name", &config.table))?;
            Msg::SaveRequested(SinkTarget::Sqlite {
                db_path: PathBuf::from(or_default(&db, &config.db_file)),
                table: or_default(&table, &config.table),
            })
        }
        MenuCommand::Preview => Msg::PreviewRequested,
        MenuCommand::ToggleMergeMode => Msg::MergeModeToggled,
        MenuCommand::Exit => return Ok(None),
    };
    Ok(Some(msg))
}

fn read_rule(prompter: &mut Prompter) -> Result<ExtractRule, Interrupt> {
    let tag = prompter.ask(PROMPT_TAG)?;
    let attribute = prompter.ask(PROMPT_ATTRIBUTE)?;
    let value = prompter.ask(PROMPT_VALUE)?;
    let default_field = capitalize(&tag.to_lowercase());
    let field = prompter.ask(&default_prompt("output field name", &default_field))?;
    Ok(build_rule(&tag, &attribute, &value, &field))
}

/// Tag and attribute names are matched lowercased; a blank field keeps the tag-derived name.
fn build_rule(tag: &str, attribute: &str, value: &str, field: &str) -> ExtractRule {
    let rule = ExtractRule::new(tag.to_lowercase(), attribute.to_lowercase(), value);
    if field.is_empty() {
        rule
    } else {
        rule.with_field(field)
    }
}

fn page_count(answer: &str, default: u32) -> Result<u32, scrape_core::InputError> {
    if answer.trim().is_empty() {
        Ok(default)
    } else {
        parse_page_count(answer)
    }
}

fn default_prompt(what: &str, default: &str) -> String {
    format!("Enter the {what} (default: {default}): ")
}
