use clap::Parser;

use crate::fields::ClickForm;

/// Auto Clicker: repeated left clicks at a fixed screen position.
#[derive(Parser, Debug, Clone, Default)]
#[command(name = "auto_clicker", version)]
pub struct Settings {
    /// Prefill for "Total Clicks"
    #[arg(long)]
    pub clicks: Option<String>,

    /// Prefill for "Interval (ms)"
    #[arg(long)]
    pub interval: Option<String>,

    /// Prefill for "X Coord"
    #[arg(long, allow_hyphen_values = true)]
    pub x: Option<String>,

    /// Prefill for "Y Coord"
    #[arg(long, allow_hyphen_values = true)]
    pub y: Option<String>,

    /// Log at debug level (RUST_LOG still wins)
    #[arg(short, long)]
    pub verbose: bool,
}

impl Settings {
    pub fn log_filter(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    pub fn form(&self) -> ClickForm {
        let text = |v: &Option<String>| v.clone().unwrap_or_default();
        ClickForm {
            clicks: text(&self.clicks),
            interval: text(&self.interval),
            x: text(&self.x),
            y: text(&self.y),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_flags_gives_empty_form() {
        let settings = Settings::try_parse_from(["auto_clicker"]).unwrap();
        assert_eq!(settings.form(), ClickForm::default());
        assert_eq!(settings.log_filter(), "info");
    }

    #[test]
    fn test_prefill_flags() {
        let settings = Settings::try_parse_from([
            "auto_clicker", "--clicks", "5", "--interval", "100", "--x", "-10", "--y", "20", "-v",
        ])
        .unwrap();
        let form = settings.form();
        assert_eq!(form.clicks, "5");
        assert_eq!(form.interval, "100");
        assert_eq!(form.x, "-10");
        assert_eq!(form.y, "20");
        assert_eq!(settings.log_filter(), "debug");
    }
}
