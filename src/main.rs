use KiOrder::cli::cli_main::{analyze_and_print, init_logger, run_interactive_menu};
use KiOrder::settings::SettingsManager;

pub fn main() {
    let manager = SettingsManager::new();
    init_logger(manager.get_settings().level_filter());
    // a data file given as the first argument is analysed directly
    match std::env::args().nth(1) {
        Some(file_name) => {
            if analyze_and_print(&file_name, manager.get_settings()).is_err() {
                std::process::exit(1);
            }
        }
        None => run_interactive_menu(manager),
    }
}
