use crate::ui::terminal::{detect_capabilities, TerminalCapabilities};
use uv_tidy::config::{ColorMode, Config};

/// Resolved output settings for one run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiContext {
    pub json: bool,
    pub verbose: u8,
    pub caps: TerminalCapabilities,
    pub color: bool,
    pub unicode: bool,
}

impl UiContext {
    /// `config.output.color` already carries any `--color` flag.
    pub fn new(json: bool, verbose: u8, config: &Config) -> Self {
        Self::from_caps(json, verbose, config, detect_capabilities())
    }

    pub(crate) fn from_caps(
        json: bool,
        verbose: u8,
        config: &Config,
        caps: TerminalCapabilities,
    ) -> Self {
        let unicode = config.output.unicode && caps.supports_unicode;

        let color = match config.output.color {
            ColorMode::Never => false,
            ColorMode::Always => true,
            ColorMode::Auto => caps.supports_color && !caps.is_ci,
        };

        Self {
            json,
            verbose,
            caps,
            color: color && !json,
            unicode,
        }
    }

    /// A confirmation prompt can be shown
    pub fn can_prompt(&self) -> bool {
        !self.json && self.caps.is_tty && self.caps.stdin_tty
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ci_caps() -> TerminalCapabilities {
        TerminalCapabilities {
            is_tty: true,
            stdin_tty: true,
            supports_color: true,
            supports_unicode: true,
            is_ci: true,
        }
    }

    #[test]
    fn ci_defaults_to_no_color_when_auto() {
        let config = Config::default();
        let ui = UiContext::from_caps(false, 0, &config, ci_caps());
        assert!(!ui.color);
    }

    #[test]
    fn explicit_color_always_wins_in_ci() {
        let mut config = Config::default();
        config.output.color = ColorMode::Always;
        let ui = UiContext::from_caps(false, 0, &config, ci_caps());
        assert!(ui.color);
    }

    #[test]
    fn unicode_config_off_forces_ascii() {
        let mut config = Config::default();
        config.output.unicode = false;
        let ui = UiContext::from_caps(false, 0, &config, ci_caps());
        assert!(!ui.unicode);
    }

    #[test]
    fn json_never_prompts() {
        let ui = UiContext::from_caps(true, 0, &Config::default(), ci_caps());
        assert!(!ui.can_prompt());
    }
}
