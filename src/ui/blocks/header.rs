use crate::ui::primitives::icon::Icon;
use crate::ui::primitives::text::ColoredText;

/// Icon and title line followed by aligned `label: value` rows
#[derive(Debug, Clone)]
pub struct CommandHeader {
    icon: Icon,
    title: String,
    items: Vec<(String, String)>,
}

impl CommandHeader {
    pub fn new(icon: Icon, title: impl Into<String>) -> Self {
        Self {
            icon,
            title: title.into(),
            items: Vec::new(),
        }
    }

    pub fn add(&mut self, label: impl Into<String>, value: impl Into<String>) {
        self.items.push((label.into(), value.into()));
    }

    pub fn render(&self, supports_color: bool, supports_unicode: bool) -> String {
        let title = ColoredText::info(self.title.as_str())
            .bold()
            .render(supports_color);
        let mut out = format!(
            "{} {}\n",
            self.icon.colored(supports_color, supports_unicode),
            title
        );

        let width = self.items.iter().map(|(l, _)| l.len()).max().unwrap_or(0);
        for (label, value) in &self.items {
            let label = format!("{:<width$}", format!("{}:", label), width = width + 1);
            out.push_str(&format!(
                "  {} {}\n",
                ColoredText::dim(label).render(supports_color),
                value
            ));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn renders_ascii_icon_when_unicode_unsupported() {
        let mut header = CommandHeader::new(Icon::Scan, "uv-tidy");
        header.add("Roots", "/srv");

        let rendered = header.render(false, false);
        insta::assert_snapshot!(rendered, @r"
        [SCAN] uv-tidy
          Roots: /srv
        ");
    }

    #[test]
    fn aligns_labels() {
        let mut header = CommandHeader::new(Icon::Scan, "uv-tidy");
        header.add("Mode", "dry run");
        header.add("Min age", "30 days");

        let rendered = header.render(false, true);
        assert!(rendered.contains("  Mode:    dry run\n"));
        assert!(rendered.contains("  Min age: 30 days\n"));
    }
}
