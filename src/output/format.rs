use colored::Colorize;

/// Whether output should carry ANSI colors.
///
/// Passed to every formatting call; nothing reads color state from globals.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    pub color: bool,
}

impl Style {
    pub fn plain() -> Self {
        Self { color: false }
    }

    pub fn colored() -> Self {
        Self { color: true }
    }

    pub fn yellow(&self, s: &str) -> String {
        self.paint(s, |s| s.yellow().to_string())
    }

    pub fn green(&self, s: &str) -> String {
        self.paint(s, |s| s.green().to_string())
    }

    pub fn red(&self, s: &str) -> String {
        self.paint(s, |s| s.red().to_string())
    }

    pub fn cyan(&self, s: &str) -> String {
        self.paint(s, |s| s.cyan().to_string())
    }

    fn paint(&self, s: &str, f: impl FnOnce(&str) -> String) -> String {
        if self.color { f(s) } else { s.to_string() }
    }
}

/// `Label:` padded to 8 columns, followed by the value.
pub fn format_field(style: Style, label: &str, value: &str) -> String {
    let label = format!("{:<8}", format!("{}:", label));
    format!("{} {}", style.yellow(&label), value)
}

pub fn status_text(style: Style, online: bool) -> String {
    if online {
        style.green("Online")
    } else {
        style.red("Offline")
    }
}

/// The value, or `fallback` when it is blank.
pub fn value_or<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    if value.trim().is_empty() {
        fallback
    } else {
        value
    }
}

/// Collapse all runs of whitespace (newlines included) to single spaces.
pub fn one_line(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

pub fn bool_text(v: bool) -> &'static str {
    if v { "True" } else { "False" }
}

/// Render an error for stderr: `Error: <message>`, red and bold when colored.
pub fn error_line(style: Style, message: &str) -> String {
    let line = format!("Error: {}", message);
    if style.color {
        line.red().bold().to_string()
    } else {
        line
    }
}
