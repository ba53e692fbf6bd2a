#![allow(clippy::module_name_repetitions)]
//! Color mode detection and ANSI painting for stderr diagnostics.
//!
//! Policy:
//! - Only stderr one-liners are painted. The `command: ...` line on stdout and error
//!   lines printed there are never colored, so they stay pipeable.
//! - Compute `let use_err = color_enabled_stderr();` once per function and reuse it.

use once_cell::sync::OnceCell;

#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum ColorMode {
    Auto,
    Always,
    Never,
}

static ENV_COLOR_MODE: OnceCell<Option<ColorMode>> = OnceCell::new();

pub(crate) fn parse_color_mode(s: &str) -> Option<ColorMode> {
    match s.trim().to_ascii_lowercase().as_str() {
        "auto" => Some(ColorMode::Auto),
        "always" | "on" | "true" | "yes" => Some(ColorMode::Always),
        "never" | "off" | "false" | "no" => Some(ColorMode::Never),
        _ => None,
    }
}

fn env_color_mode_pref() -> Option<ColorMode> {
    *ENV_COLOR_MODE.get_or_init(|| {
        std::env::var("GO_DOCKER_RUN_COLOR")
            .ok()
            .and_then(|v| parse_color_mode(&v))
    })
}

fn no_color_env() -> bool {
    // Per https://no-color.org/
    std::env::var("NO_COLOR").is_ok()
}

fn color_enabled_for(no_color: bool, pref: Option<ColorMode>, is_tty: bool) -> bool {
    if no_color {
        return false;
    }
    match pref {
        Some(ColorMode::Always) => true,
        Some(ColorMode::Never) => false,
        Some(ColorMode::Auto) | None => is_tty,
    }
}

pub fn color_enabled_stderr() -> bool {
    color_enabled_for(
        no_color_env(),
        env_color_mode_pref(),
        atty::is(atty::Stream::Stderr),
    )
}

/// Wrap string with ANSI color code when enabled; otherwise return unchanged.
pub fn paint(enabled: bool, code: &str, s: &str) -> String {
    if enabled {
        format!("{code}{s}\x1b[0m")
    } else {
        s.to_string()
    }
}

pub fn log_warn_stderr(use_color: bool, msg: &str) {
    eprintln!("{}", paint(use_color, "\x1b[33m", msg));
}

pub fn log_error_stderr(use_color: bool, msg: &str) {
    eprintln!("{}", paint(use_color, "\x1b[31;1m", msg));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_aliases() {
        assert_eq!(parse_color_mode(" Always "), Some(ColorMode::Always));
        assert_eq!(parse_color_mode("off"), Some(ColorMode::Never));
        assert_eq!(parse_color_mode("auto"), Some(ColorMode::Auto));
        assert_eq!(parse_color_mode("rainbow"), None);
    }

    #[test]
    fn no_color_beats_everything() {
        assert!(!color_enabled_for(true, Some(ColorMode::Always), true));
    }

    #[test]
    fn preference_then_tty() {
        assert!(color_enabled_for(false, Some(ColorMode::Always), false));
        assert!(!color_enabled_for(false, Some(ColorMode::Never), true));
        assert!(color_enabled_for(false, None, true));
        assert!(!color_enabled_for(false, Some(ColorMode::Auto), false));
    }

    #[test]
    fn paint_only_when_enabled() {
        assert_eq!(paint(false, "\x1b[33m", "x"), "x");
        assert_eq!(paint(true, "\x1b[33m", "x"), "\x1b[33mx\x1b[0m");
    }
}
