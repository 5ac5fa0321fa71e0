use std::fmt::Display;

use colored::*;

pub const TOTAL_WIDTH: usize = 64;
const KEY_WIDTH: usize = 12;

pub fn header(msg: &str) {
    let formatted = format!("⟦ {} ⟧", msg);
    let msg_len = formatted.chars().count();

    let dash_count = TOTAL_WIDTH.saturating_sub(msg_len);
    let left = dash_count / 2;
    let right = dash_count - left;

    let line = format!(
        "{}{}{}",
        "─".repeat(left),
        formatted.to_uppercase().bright_green(),
        "─".repeat(right)
    )
    .bright_black();

    println!("{line}");
}

pub fn status<T: AsRef<str>>(msg: T) {
    let prefix = ">".bright_black();
    println!("{} {}", prefix, msg.as_ref());
}

pub fn aligned_line<V: Display>(key: &str, value: V) {
    let dots = ".".repeat(KEY_WIDTH.saturating_sub(key.len()));
    println!(
        "  {}{}{} {}",
        key.cyan(),
        dots.bright_black(),
        ":".bright_black(),
        value
    );
}

pub fn tree_head(idx: usize, name: &str) {
    let idx_str = format!("[{}]", idx.to_string().yellow());
    println!("{} {}", idx_str.bright_black(), name.cyan().bold());
}
