use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;

pub fn create_spinner(message: impl Into<String>) -> ProgressBar {
    let style = ProgressStyle::default_spinner()
        .tick_strings(&["-", "\\", "|", "/", "✓"])
        .template("{msg} {spinner}")
        .unwrap_or_else(|_| ProgressStyle::default_spinner());

    let spinner = ProgressBar::new_spinner();
    spinner.set_style(style);
    spinner.set_message(message.into());
    spinner.enable_steady_tick(std::time::Duration::from_millis(80));
    spinner
}

/// A block drawn in the given `#rrggbb` color, or the color name in dim text.
pub fn color_swatch(color: &str) -> String {
    match parse_hex(color) {
        Some((r, g, b)) => "■".truecolor(r, g, b).to_string(),
        None => color.dimmed().to_string(),
    }
}

fn parse_hex(color: &str) -> Option<(u8, u8, u8)> {
    let hex = color.strip_prefix('#')?;
    if hex.len() != 6 {
        return None;
    }
    let channel = |i: usize| u8::from_str_radix(hex.get(i..i + 2)?, 16).ok();
    Some((channel(0)?, channel(2)?, channel(4)?))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_hex() {
        assert_eq!(parse_hex("#4A6FA5"), Some((0x4a, 0x6f, 0xa5)));
        assert_eq!(parse_hex("green"), None);
        assert_eq!(parse_hex("#12345"), None);
        assert_eq!(parse_hex("#zz0000"), None);
    }
}
