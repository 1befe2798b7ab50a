use uv_tidy::config::ConfigWarning;

use crate::ui::json::{emit_event, events::ErrorEvent};
use crate::ui::primitives::icon::Icon;
use crate::ui::terminal::detect_capabilities;

/// Unknown-key warnings go to stderr; with `--json` they become log events.
pub fn print_config_warnings(warnings: &[ConfigWarning], json: bool) {
    if warnings.is_empty() {
        return;
    }
    if json {
        for w in warnings {
            tracing::warn!(key = %w.key, file = %w.file.display(), "{}", w);
        }
        return;
    }

    let caps = detect_capabilities();
    for w in warnings {
        eprintln!("{} {}", Icon::Warning.render(caps.supports_unicode), w);
    }
}

/// Report a fatal error on stderr, or as an `error` event with `--json`.
pub fn print_error(err: &anyhow::Error, json: bool) {
    if json {
        let _ = emit_event(&ErrorEvent::new(format!("{:#}", err)));
        return;
    }

    let caps = detect_capabilities();
    eprintln!(
        "{} {:#}",
        Icon::Error.colored(caps.supports_color, caps.supports_unicode),
        err
    );
}
