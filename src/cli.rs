//! Command line.
//!
//! Accepts the classic screensaver switches as well as long flags:
//!
//! | Switch               | Long form         |
//! |----------------------|-------------------|
//! | `/s`                 | `--screensaver`   |
//! | `/c`, `/c:<id>`      | `--configure [id]`|
//! | `/p <id>`, `/p:<id>` | `--preview [id]`  |
//! | (none)               | `--standalone`    |
//!
//! Switches are case-insensitive and rewritten to their long form before
//! clap sees them.

use clap::{ArgGroup, Parser};
use cube_core::RunMode;
use std::ffi::OsString;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "bouncing_cube")]
#[command(about = "A bouncing, spinning cube screensaver that spans every monitor")]
#[command(group(ArgGroup::new("mode").args(["screensaver", "standalone", "preview", "configure"])))]
pub struct Cli {
    /// Run as a screensaver: fullscreen, exit on any input
    #[arg(long)]
    pub screensaver: bool,
    /// Run fullscreen until Escape is pressed (the default)
    #[arg(long)]
    pub standalone: bool,
    /// Small preview window; the optional parent window id is ignored
    #[arg(long, value_name = "WINDOW_ID", num_args = 0..=1)]
    pub preview: Option<Option<String>>,
    /// Open the settings dialog; the optional parent window id is ignored
    #[arg(long, value_name = "WINDOW_ID", num_args = 0..=1)]
    pub configure: Option<Option<String>>,
    /// Same view on every monitor for this run, whatever the settings say
    #[arg(long)]
    pub mirror: bool,
    /// Seed the random number generator for a reproducible run
    #[arg(long)]
    pub seed: Option<u64>,
    /// Settings file (defaults to bouncing_cube.json next to the executable)
    #[arg(long, value_name = "PATH")]
    pub settings: Option<PathBuf>,
}

impl Cli {
    /// Parse after rewriting screensaver-style switches.
    pub fn parse_normalized<I, T>(args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::parse_from(normalize_args(args))
    }

    pub fn try_parse_normalized<I, T>(args: I) -> Result<Self, clap::Error>
    where
        I: IntoIterator<Item = T>,
        T: Into<OsString>,
    {
        Self::try_parse_from(normalize_args(args))
    }

    pub fn run_mode(&self) -> RunMode {
        if self.configure.is_some() {
            RunMode::Configure
        } else if self.preview.is_some() {
            RunMode::Preview
        } else if self.screensaver {
            RunMode::Screensaver
        } else {
            RunMode::Standalone
        }
    }
}

/// Rewrite `/s`, `/c[:id]` and `/p[:id]` (any case, `/` or `-`) into long flags.
///
/// The value after `--settings` is never touched, so a settings path that
/// happens to look like a switch survives.
pub fn normalize_args<I, T>(args: I) -> Vec<OsString>
where
    I: IntoIterator<Item = T>,
    T: Into<OsString>,
{
    let mut out = Vec::new();
    let mut takes_value = false;

    for (index, arg) in args.into_iter().enumerate() {
        let arg: OsString = arg.into();
        if index == 0 || takes_value {
            takes_value = false;
            out.push(arg);
            continue;
        }

        let text = arg.to_string_lossy().into_owned();
        takes_value = text == "--settings" || text == "--seed";

        match rewrite_switch(&text) {
            Some(rewritten) => out.extend(rewritten.into_iter().map(OsString::from)),
            None => out.push(arg),
        }
    }

    out
}

fn rewrite_switch(arg: &str) -> Option<Vec<String>> {
    let body = arg.strip_prefix('/').or_else(|| {
        // Single-dash short forms only; `--foo` is left to clap.
        arg.strip_prefix('-').filter(|rest| !rest.starts_with('-'))
    })?;

    let (switch, id) = match body.split_once(':') {
        Some((switch, id)) => (switch, Some(id)),
        None => (body, None),
    };

    let long = match switch.to_ascii_lowercase().as_str() {
        "s" => "--screensaver",
        "c" => "--configure",
        "p" => "--preview",
        _ => return None,
    };

    let mut rewritten = vec![long.to_string()];
    if let Some(id) = id.filter(|id| !id.is_empty()) {
        if long == "--screensaver" {
            return None;
        }
        rewritten.push(id.to_string());
    }
    Some(rewritten)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_normalized(std::iter::once("bouncing_cube").chain(args.iter().copied()))
            .unwrap()
    }

    fn normalized(args: &[&str]) -> Vec<String> {
        normalize_args(std::iter::once("bouncing_cube").chain(args.iter().copied()))
            .into_iter()
            .skip(1)
            .map(|a| a.to_string_lossy().into_owned())
            .collect()
    }

    #[test]
    fn test_no_arguments_is_standalone() {
        assert_eq!(parse(&[]).run_mode(), RunMode::Standalone);
    }

    #[test]
    fn test_screensaver_switch_any_case() {
        for switch in ["/s", "/S", "-s", "--screensaver"] {
            assert_eq!(
                parse(&[switch]).run_mode(),
                RunMode::Screensaver,
                "switch {}",
                switch
            );
        }
    }

    #[test]
    fn test_configure_with_and_without_id() {
        assert_eq!(parse(&["/c"]).run_mode(), RunMode::Configure);
        assert_eq!(normalized(&["/C:1234"]), vec!["--configure", "1234"]);

        let cli = parse(&["/c:1234"]);
        assert_eq!(cli.run_mode(), RunMode::Configure);
        assert_eq!(cli.configure, Some(Some("1234".to_string())));
    }

    #[test]
    fn test_preview_with_separate_id() {
        let cli = parse(&["/p", "5678"]);
        assert_eq!(cli.run_mode(), RunMode::Preview);
        assert_eq!(cli.preview, Some(Some("5678".to_string())));
    }

    #[test]
    fn test_settings_path_is_not_rewritten() {
        assert_eq!(normalized(&["--settings", "/s"]), vec!["--settings", "/s"]);
        let cli = parse(&["--settings", "/c", "/s"]);
        assert_eq!(cli.settings, Some(PathBuf::from("/c")));
        assert_eq!(cli.run_mode(), RunMode::Screensaver);
    }

    #[test]
    fn test_extra_flags() {
        let cli = parse(&["/s", "--mirror", "--seed", "42"]);
        assert!(cli.mirror);
        assert_eq!(cli.seed, Some(42));
    }

    #[test]
    fn test_conflicting_modes_rejected() {
        let result =
            Cli::try_parse_normalized(["bouncing_cube", "/s", "/c"].iter().copied());
        assert!(result.is_err());
    }

    #[test]
    fn test_unknown_switch_passed_through() {
        assert_eq!(normalized(&["/x"]), vec!["/x"]);
        assert!(Cli::try_parse_normalized(["bouncing_cube", "/x"]).is_err());
    }
}
