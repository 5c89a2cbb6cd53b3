//! Framed boxes for terminal output.

use super::format::Style;

const PADDING: usize = 1;

/// Width of `s` as displayed, ignoring ANSI escape sequences.
fn visible_width(s: &str) -> usize {
    strip_ansi_escapes::strip_str(s).chars().count()
}

/// Render `lines` inside a bold frame with `title` set into the top border.
pub fn render_box(style: Style, title: &str, lines: &[String]) -> String {
    let title_width = visible_width(title);
    let content_width = lines.iter().map(|l| visible_width(l)).max().unwrap_or(0);
    let inner = (content_width + PADDING * 2).max(title_width + 4);

    let top_fill = inner - title_width - 3;
    let top = format!(
        "{} {} {}",
        style.cyan("┏━"),
        title,
        style.cyan(&format!("{}┓", "━".repeat(top_fill)))
    );

    let side = style.cyan("┃");
    let mut out = vec![top];
    for line in lines {
        let fill = inner - PADDING * 2 - visible_width(line);
        out.push(format!(
            "{side}{pad}{line}{fill}{pad}{side}",
            pad = " ".repeat(PADDING),
            fill = " ".repeat(fill),
        ));
    }
    out.push(style.cyan(&format!("┗{}┛", "━".repeat(inner))));

    out.join("\n")
}
