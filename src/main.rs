use anyhow::{anyhow, Context, Result};
use crossterm::style::Stylize;
use reedline::{
    FileBackedHistory, Prompt, PromptEditMode, PromptHistorySearch, PromptHistorySearchStatus,
    Reedline, Signal,
};
use record_table::config::config::Config;
use record_table::data::column::{ColumnDescriptor, DataRecord};
use record_table::data::data_view::RecordTable;
use record_table::data::loaders::load_records;
use record_table::data::search_filter::find_matching_columns;
use record_table::state::dispatcher::StateDispatcher;
use record_table::state::events::TableAction;
use record_table::utils::app_paths::AppPaths;
use record_table::utils::logging::{get_log_buffer, init_tracing};
use std::borrow::Cow;
use tracing::{info, warn};

mod table_display;

use table_display::{display_view, search_hint};

/// Shows the active search, or the placeholder when there is none
struct TablePrompt {
    search_hint: Option<String>,
}

impl Prompt for TablePrompt {
    fn render_prompt_left(&self) -> Cow<'_, str> {
        Cow::Borrowed("table")
    }

    fn render_prompt_right(&self) -> Cow<'_, str> {
        match &self.search_hint {
            Some(hint) => Cow::Owned(format!("[{}]", hint)),
            None => Cow::Borrowed(""),
        }
    }

    fn render_prompt_indicator(&self, edit_mode: PromptEditMode) -> Cow<'_, str> {
        match edit_mode {
            PromptEditMode::Default | PromptEditMode::Emacs => "> ".into(),
            PromptEditMode::Vi(vi_mode) => match vi_mode {
                reedline::PromptViMode::Normal => "N> ".into(),
                reedline::PromptViMode::Insert => "I> ".into(),
            },
            PromptEditMode::Custom(str) => format!("{str}> ").into(),
        }
    }

    fn render_prompt_multiline_indicator(&self) -> Cow<'_, str> {
        Cow::Borrowed("... ")
    }

    fn render_prompt_history_search_indicator(
        &self,
        history_search: PromptHistorySearch,
    ) -> Cow<'_, str> {
        let prefix = match history_search.status {
            PromptHistorySearchStatus::Passing => "",
            PromptHistorySearchStatus::Failing => "failing ",
        };
        Cow::Owned(format!(
            "({}reverse search: {})",
            prefix, history_search.term
        ))
    }
}

#[derive(Debug, Default)]
struct CliArgs {
    data_file: Option<String>,
    search: Option<String>,
    sort: Option<String>,
    descending: bool,
    page: Option<usize>,
    page_size: Option<usize>,
    interactive: bool,
    verbose: bool,
    generate_config: bool,
    help: bool,
}

fn parse_args(args: &[String]) -> Result<CliArgs> {
    let mut parsed = CliArgs::default();
    let mut iter = args.iter().skip(1);

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--search" => parsed.search = Some(next_value(&mut iter, arg)?),
            "--sort" => parsed.sort = Some(next_value(&mut iter, arg)?),
            "--desc" => parsed.descending = true,
            "--page" => parsed.page = Some(parse_number(&next_value(&mut iter, arg)?, arg)?),
            "--page-size" => {
                parsed.page_size = Some(parse_number(&next_value(&mut iter, arg)?, arg)?)
            }
            "--interactive" | "-i" => parsed.interactive = true,
            "--verbose" | "-v" => parsed.verbose = true,
            "--generate-config" => parsed.generate_config = true,
            "--help" | "-h" => parsed.help = true,
            other if other.starts_with("--") => return Err(anyhow!("Unknown option: {}", other)),
            other => parsed.data_file = Some(other.to_string()),
        }
    }

    Ok(parsed)
}

fn next_value<'a>(iter: &mut impl Iterator<Item = &'a String>, flag: &str) -> Result<String> {
    iter.next()
        .cloned()
        .ok_or_else(|| anyhow!("{} requires a value", flag))
}

fn parse_number(value: &str, flag: &str) -> Result<usize> {
    value
        .parse()
        .with_context(|| format!("{} expects a number, got '{}'", flag, value))
}

fn print_help() {
    println!("{}", "Record Table - search, sort and page tabular data".blue().bold());
    println!();
    println!("{}", "Usage:".yellow());
    println!("  record-table [OPTIONS] FILE.csv|FILE.json");
    println!();
    println!("{}", "Options:".yellow());
    println!("  {}    - Only show records containing <text>", "--search <text>".green());
    println!("  {}     - Sort by column key", "--sort <column>".green());
    println!("  {}                - Sort descending", "--desc".green());
    println!("  {}          - Show page <n>", "--page <n>".green());
    println!("  {}     - Rows per page", "--page-size <n>".green());
    println!("  {}   - Open the interactive table", "--interactive, -i".green());
    println!("  {}       - Debug logging", "--verbose, -v".green());
    println!(
        "  {}     - Generate config file with defaults",
        "--generate-config".green()
    );
    println!();
}

fn print_repl_help() {
    println!("{}", "Commands:".yellow());
    println!("  {}       - Search for <text> (a lone / clears it)", "/<text>".green());
    println!("  {}  - Sort by column, again to flip direction", "\\sort <col>".green());
    println!("  {}     - Go to page <n>", "\\page <n>".green());
    println!("  {}     - Rows per page", "\\size <n>".green());
    println!("  {}         - Next page", "\\next".green());
    println!("  {}         - Previous page", "\\prev".green());
    println!("  {}        - Clear search and sort", "\\clear".green());
    println!("  {}     - Show recent log entries", "\\logs [n]".green());
    println!("  {}         - Show this help", "\\help".green());
    println!("  {}  - Exit", "\\quit, Ctrl+D".green());
    println!();
}

fn main() -> Result<()> {
    let raw_args: Vec<String> = std::env::args().collect();
    let args = match parse_args(&raw_args) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("{}", format!("Error: {}", e).red());
            print_help();
            std::process::exit(2);
        }
    };

    if args.help {
        print_help();
        return Ok(());
    }

    if args.generate_config {
        let config_path = Config::get_config_path()?;
        if let Some(parent) = config_path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&config_path, Config::create_default_with_comments())?;
        println!("Configuration file created at: {:?}", config_path);
        println!("Edit this file to customize page size, search and display.");
        return Ok(());
    }

    init_tracing(args.verbose);

    let config = Config::load().unwrap_or_else(|e| {
        warn!("Using default configuration: {}", e);
        Config::default()
    });

    let Some(data_file) = args.data_file.as_deref() else {
        print_help();
        std::process::exit(2);
    };

    let loaded = load_records(data_file)?;
    info!("{} records, columns: {:?}", loaded.len(), loaded.columns);

    let columns: Vec<ColumnDescriptor<DataRecord>> = loaded
        .columns
        .iter()
        .map(|name| ColumnDescriptor::field(name.as_str(), name.as_str()))
        .collect();

    let mut table = RecordTable::new(columns).with_options(config.table_options());
    if let Some(size) = args.page_size {
        table = table.with_page_size(size);
    }

    let data = loaded.records;
    let mut dispatcher = StateDispatcher::for_table(&table);

    if let Some(query) = args.search.clone() {
        dispatcher.dispatch(&table, &data, TableAction::SetSearch(query));
    }
    if let Some(key) = args.sort.clone() {
        if table.column(&key).is_none() {
            warn!("Unknown sort column '{}'", key);
            eprintln!("{}", format!("Unknown column: {}", key).red());
        }
        dispatcher.dispatch(&table, &data, TableAction::ToggleSort(key.clone()));
        if args.descending {
            dispatcher.dispatch(&table, &data, TableAction::ToggleSort(key));
        }
    }
    if let Some(page) = args.page {
        dispatcher.dispatch(&table, &data, TableAction::GoToPage(page));
    }

    if !args.interactive {
        display_view(&dispatcher.view(&table, &data), &config.display);
        return Ok(());
    }

    run_interactive(&table, &data, dispatcher, &config)
}

fn run_interactive(
    table: &RecordTable<DataRecord>,
    data: &[DataRecord],
    mut dispatcher: StateDispatcher,
    config: &Config,
) -> Result<()> {
    let mut line_editor = Reedline::create();
    if config.behavior.enable_history {
        let history_file = AppPaths::history_file()?;
        let history = FileBackedHistory::with_file(config.behavior.max_history_entries, history_file)
            .map_err(|e| anyhow!("Error configuring history: {}", e))?;
        line_editor = line_editor.with_history(Box::new(history));
    }

    print_repl_help();
    display_view(&dispatcher.view(table, data), &config.display);

    loop {
        let prompt = TablePrompt {
            search_hint: search_hint(&dispatcher.view(table, data), &dispatcher.state().search_query),
        };
        let sig = line_editor.read_line(&prompt)?;
        match sig {
            Signal::Success(buffer) => {
                let trimmed = buffer.trim();
                if trimmed.is_empty() {
                    continue;
                }

                match parse_command(trimmed, table) {
                    Ok(Command::Quit) => break,
                    Ok(Command::Help) => print_repl_help(),
                    Ok(Command::Logs(count)) => show_logs(count),
                    Ok(Command::Actions(actions)) => {
                        for action in actions {
                            dispatcher.dispatch(table, data, action);
                        }
                        display_view(&dispatcher.view(table, data), &config.display);
                    }
                    Err(e) => eprintln!("{}", format!("Error: {}", e).red()),
                }
            }
            Signal::CtrlD | Signal::CtrlC => {
                println!("\nGoodbye!");
                break;
            }
        }
    }

    Ok(())
}

enum Command {
    Actions(Vec<TableAction>),
    Logs(usize),
    Help,
    Quit,
}

fn parse_command(input: &str, table: &RecordTable<DataRecord>) -> Result<Command> {
    if let Some(query) = input.strip_prefix('/') {
        let action = if query.trim().is_empty() {
            TableAction::ClearSearch
        } else {
            TableAction::SetSearch(query.to_string())
        };
        return Ok(Command::Actions(vec![action]));
    }

    let (command, arg) = match input.split_once(char::is_whitespace) {
        Some((command, arg)) => (command, arg.trim()),
        None => (input, ""),
    };

    let command = match command {
        "\\sort" => Command::Actions(vec![TableAction::ToggleSort(resolve_column(table, arg)?)]),
        "\\page" => Command::Actions(vec![TableAction::GoToPage(parse_number(arg, command)?)]),
        "\\size" => Command::Actions(vec![TableAction::SetPageSize(parse_number(arg, command)?)]),
        "\\next" => Command::Actions(vec![TableAction::NextPage]),
        "\\prev" => Command::Actions(vec![TableAction::PreviousPage]),
        "\\clear" => Command::Actions(vec![TableAction::ClearSearch, TableAction::ClearSort]),
        "\\logs" if arg.is_empty() => Command::Logs(20),
        "\\logs" => Command::Logs(parse_number(arg, command)?),
        "\\help" => Command::Help,
        "\\quit" | "\\q" => Command::Quit,
        other => return Err(anyhow!("Unknown command: {} (try \\help)", other)),
    };
    Ok(command)
}

/// Accept a column key, or a unique part of a column label
fn resolve_column(table: &RecordTable<DataRecord>, name: &str) -> Result<String> {
    if name.is_empty() {
        return Err(anyhow!("Usage: \\sort <column>"));
    }
    if table.column(name).is_some() {
        return Ok(name.to_string());
    }

    let matches = find_matching_columns(table.columns(), name);
    match matches.as_slice() {
        [key] => Ok(key.clone()),
        [] => Err(anyhow!("Unknown column: {}", name)),
        _ => Err(anyhow!("'{}' matches several columns: {}", name, matches.join(", "))),
    }
}

fn show_logs(count: usize) {
    let Some(buffer) = get_log_buffer() else {
        println!("{}", "Logging is not initialized".yellow());
        return;
    };
    for entry in buffer.get_recent(count) {
        println!("{}", entry.format_for_display().dark_grey());
    }
}
