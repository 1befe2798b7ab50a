use crossterm::style::Stylize;

use crate::ui::theme;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Icon {
    Success,
    Error,
    Warning,
    Arrow,
    Keep,
    Remove,
    Scan,
}

impl Icon {
    pub fn render(&self, supports_unicode: bool) -> &'static str {
        match (supports_unicode, self) {
            (true, Icon::Success) => theme::icons::SUCCESS,
            (true, Icon::Error) => theme::icons::ERROR,
            (true, Icon::Warning) => theme::icons::WARNING,
            (true, Icon::Arrow) => theme::icons::ARROW,
            (true, Icon::Keep) => theme::icons::KEEP,
            (true, Icon::Remove) => theme::icons::REMOVE,
            (true, Icon::Scan) => theme::icons::SCAN,
            (false, Icon::Success) => theme::icons_ascii::SUCCESS,
            (false, Icon::Error) => theme::icons_ascii::ERROR,
            (false, Icon::Warning) => theme::icons_ascii::WARNING,
            (false, Icon::Arrow) => theme::icons_ascii::ARROW,
            (false, Icon::Keep) => theme::icons_ascii::KEEP,
            (false, Icon::Remove) => theme::icons_ascii::REMOVE,
            (false, Icon::Scan) => theme::icons_ascii::SCAN,
        }
    }

    pub fn colored(&self, supports_color: bool, supports_unicode: bool) -> String {
        let s = self.render(supports_unicode);
        if !supports_color {
            return s.to_string();
        }
        let color = match self {
            Icon::Success | Icon::Keep => theme::colors::SUCCESS,
            Icon::Error => theme::colors::ERROR,
            Icon::Warning | Icon::Remove => theme::colors::WARNING,
            Icon::Arrow => theme::colors::DIM,
            Icon::Scan => theme::colors::INFO,
        };
        format!("{}", s.with(color))
    }
}
