use colored::*;

pub fn print_header(channel: &str) {
    let name = "authbridge".yellow().bold();
    let version = format!("v{}", env!("CARGO_PKG_VERSION")).black().bold();
    eprintln!("  {} {}  •  {}", name, version, channel.cyan());
}

pub fn print_step(msg: &str) {
    println!("  {} {}", "•".green(), msg);
}

pub fn print_success(msg: &str) {
    println!("  {} {}", "✓".green().bold(), msg.green());
}

pub fn print_error(msg: &str) {
    eprintln!("  {} {}", "❌".red().bold(), msg.red());
}

/// Print a labelled value; the value stays uncoloured so it can be copied
pub fn print_field(label: &str, value: &str) {
    println!("  {:<22} {}", label.cyan(), value);
}
