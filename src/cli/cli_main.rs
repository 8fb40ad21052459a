use crate::ReactionOrder::interpretation::AnalysisResult;
use crate::ReactionOrder::order_analysis::analyze_file;
use crate::ReactionOrder::order_errors::KineticsError;
use crate::settings::{AnalysisSettings, SettingsManager};
use log::{LevelFilter, error};
use simplelog::{ColorChoice, Config, TermLogger, TerminalMode};
use std::io::{self, BufRead, Write};

/// Terminal logger for the binary. A second call is ignored.
pub fn init_logger(level: LevelFilter) {
    let _ = TermLogger::init(level, Config::default(), TerminalMode::Mixed, ColorChoice::Auto);
}

/// Analyses the file and prints the table, or the error with guidance.
pub fn analyze_and_print(
    file_name: &str,
    settings: &AnalysisSettings,
) -> Result<AnalysisResult, KineticsError> {
    match analyze_file(file_name, settings) {
        Ok(result) => {
            result.pretty_print();
            Ok(result)
        }
        Err(e) => {
            error!("analysis of '{}' failed: {}", file_name, e);
            println!("\x1b[31m{}: {}\x1b[0m", e.kind(), e);
            println!("{}", e.guidance());
            Err(e)
        }
    }
}

pub fn run_interactive_menu(manager: SettingsManager) {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    run_menu(&mut input, manager);
}

/// Menu loop over any line source; returns on "0" or end of input.
pub fn run_menu<R: BufRead>(input: &mut R, manager: SettingsManager) -> Option<AnalysisResult> {
    let mut last_result: Option<AnalysisResult> = None;
    loop {
        show_main_menu();
        let Some(choice) = get_user_input(input) else {
            break;
        };
        match choice.trim() {
            "1" => {
                print!("\x1b[36mPath to the data file (time, absorbance): \x1b[0m");
                let _ = io::stdout().flush();
                let Some(file_name) = get_user_input(input) else {
                    break;
                };
                if let Ok(result) = analyze_and_print(file_name.trim(), manager.get_settings()) {
                    last_result = Some(result);
                }
            }
            "2" => match manager.to_json() {
                Ok(json) => println!("Settings ({}):\n{}", manager.config_file(), json),
                Err(e) => println!("{}", e),
            },
            "3" => match &last_result {
                Some(result) => match result.to_json() {
                    Ok(json) => println!("{}", json),
                    Err(e) => println!("{}", e),
                },
                None => println!("No analysis has been done yet."),
            },
            "0" => {
                println!("Goodbye!");
                break;
            }
            _ => println!("Invalid choice. Please try again."),
        }
    }
    last_result
}

/* colors
Blue (\x1b[34m) - Welcome header text
Yellow (\x1b[33m) - Menu options
Cyan (\x1b[36m) - prompts
Red (\x1b[31m) - errors
Reset (\x1b[0m)
*/
fn show_main_menu() {
    println!("\x1b[34m\n Reaction order from time-absorbance data (orders 0, 1, 2)\n \x1b[0m");
    println!("\x1b[33m1. Analyse data file\x1b[0m");
    println!("\x1b[33m2. Show settings\x1b[0m");
    println!("\x1b[33m3. Print last result as JSON\x1b[0m");
    println!("\x1b[33m0. Exit\x1b[0m");
    print!("\x1b[36mEnter your choice: \x1b[0m");
    let _ = io::stdout().flush();
}

/// `None` at end of input or on a read error
fn get_user_input<R: BufRead>(input: &mut R) -> Option<String> {
    let mut line = String::new();
    match input.read_line(&mut line) {
        Ok(0) => None,
        Ok(_) => Some(line),
        Err(e) => {
            error!("failed to read input: {}", e);
            None
        }
    }
}
