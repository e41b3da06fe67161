//! Configuration and CLI argument handling

use std::time::Duration;

use clap::Parser;

use crate::{countdown::TimeInput, notify::NotificationPermission};

/// CLI argument parsing structure
#[derive(Parser, Debug)]
#[command(name = "countdown-panel")]
#[command(about = "A countdown timer, counter and offer modal behind a small HTTP API")]
#[command(version)]
pub struct Config {
    /// Port to bind the server to
    #[arg(short, long, default_value = "20554")]
    pub port: u16,

    /// Host address to bind to
    #[arg(long, default_value = "127.0.0.1")]
    pub host: String,

    /// Milliseconds between countdown ticks (at most one minute)
    #[arg(long, default_value = "1000", value_parser = clap::value_parser!(u64).range(1..=60_000))]
    pub tick_millis: u64,

    /// Desktop notification permission; anything but granted uses a terminal alert
    #[arg(long, value_enum, default_value_t = NotificationPermission::Granted)]
    pub notifications: NotificationPermission,

    /// Pre-fill the hours input
    #[arg(long, default_value = "")]
    pub hours: String,

    /// Pre-fill the minutes input
    #[arg(long, default_value = "")]
    pub minutes: String,

    /// Pre-fill the seconds input
    #[arg(long, default_value = "")]
    pub seconds: String,

    /// Start the countdown immediately
    #[arg(long)]
    pub start: bool,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,
}

impl Config {
    /// Parse configuration from command line arguments
    pub fn parse() -> Self {
        Parser::parse()
    }

    /// Get the server address as a formatted string
    pub fn address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }

    /// Get the appropriate log level based on verbose flag
    pub fn log_level(&self) -> &'static str {
        if self.verbose { "debug" } else { "info" }
    }

    pub fn tick_period(&self) -> Duration {
        Duration::from_millis(self.tick_millis)
    }

    /// Initial values for the timer inputs
    pub fn time_input(&self) -> TimeInput {
        TimeInput::with_values(&self.hours, &self.minutes, &self.seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let config = Config::try_parse_from(["countdown-panel"]).unwrap();
        assert_eq!(config.address(), "127.0.0.1:20554");
        assert_eq!(config.tick_period(), Duration::from_secs(1));
        assert_eq!(config.notifications, NotificationPermission::Granted);
        assert_eq!(config.log_level(), "info");
        assert!(config.time_input().is_empty());
        assert!(!config.start);
    }

    #[test]
    fn prefilled_inputs_and_flags() {
        let config = Config::try_parse_from([
            "countdown-panel",
            "--minutes",
            "25",
            "--notifications",
            "denied",
            "--tick-millis",
            "250",
            "--start",
            "-v",
        ])
        .unwrap();

        assert_eq!(config.time_input().total_seconds(), 1500);
        assert_eq!(config.notifications, NotificationPermission::Denied);
        assert_eq!(config.tick_period(), Duration::from_millis(250));
        assert_eq!(config.log_level(), "debug");
        assert!(config.start);
    }

    #[test]
    fn zero_tick_period_is_rejected() {
        assert!(Config::try_parse_from(["countdown-panel", "--tick-millis", "0"]).is_err());
    }

    #[test]
    fn tick_period_is_capped_at_one_minute() {
        let config = Config::try_parse_from(["countdown-panel", "--tick-millis", "60000"]).unwrap();
        assert_eq!(config.tick_period(), Duration::from_secs(60));

        assert!(Config::try_parse_from(["countdown-panel", "--tick-millis", "60001"]).is_err());
        assert!(Config::try_parse_from([
            "countdown-panel",
            "--tick-millis",
            "18446744073709551615",
        ])
        .is_err());
    }
}
