use colored::Colorize;

pub fn display_error(message: &str) {
    eprintln!("{} {}", "Error:".red().bold(), message);
}

pub fn display_info(message: &str) {
    println!("{} {}", "Info:".cyan(), message);
}
