use console::{Alignment, Emoji, measure_text_width, pad_str, style};

pub static WARN_ICON: Emoji<'_, '_> = Emoji("⚠️  ", "");
pub static ERROR_ICON: Emoji<'_, '_> = Emoji("❌ ", "");

const GUTTER: &str = "  ";

pub fn print_warn(msg: &str) {
    eprintln!("{} {}", WARN_ICON, style(msg).yellow());
}

pub fn print_error(msg: &str) {
    eprintln!("{} {}", ERROR_ICON, style(msg).red().bold());
}

pub fn print_empty(noun: &str) {
    println!("{}", style(format!("No {} found.", noun)).dim());
}

/// Lay out `rows` under `headers` with columns padded to their widest cell.
pub fn render_table(headers: &[&str], rows: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = headers.iter().map(|h| measure_text_width(h)).collect();
    for row in rows {
        for (i, cell) in row.iter().enumerate().take(widths.len()) {
            widths[i] = widths[i].max(measure_text_width(cell));
        }
    }

    let mut out = String::new();
    let header_line = headers
        .iter()
        .zip(&widths)
        .map(|(h, w)| style(pad_str(h, *w, Alignment::Left, None)).bold().to_string())
        .collect::<Vec<_>>()
        .join(GUTTER);
    out.push_str(header_line.trim_end());
    out.push('\n');

    for row in rows {
        let line = widths
            .iter()
            .enumerate()
            .map(|(i, w)| {
                let cell = row.get(i).map(String::as_str).unwrap_or("");
                pad_str(cell, *w, Alignment::Left, None).into_owned()
            })
            .collect::<Vec<_>>()
            .join(GUTTER);
        out.push_str(line.trim_end());
        out.push('\n');
    }
    out
}

/// A titled block of help text.
pub struct GuideSection {
    title: String,
    lines: Vec<String>,
}

impl GuideSection {
    pub fn new(title: &str) -> Self {
        Self {
            title: title.to_string(),
            lines: Vec::new(),
        }
    }

    pub fn command(mut self, usage: &str, description: &str) -> Self {
        self.lines.push(format!(
            "  {}  {}",
            style(pad_str(usage, 42, Alignment::Left, None)).green(),
            description
        ));
        self
    }

    pub fn text(mut self, text: &str) -> Self {
        self.lines.push(format!("  {}", text));
        self
    }

    pub fn blank(mut self) -> Self {
        self.lines.push(String::new());
        self
    }

    pub fn print(&self) {
        println!("\n{}", style(&self.title).bold().cyan());
        for line in &self.lines {
            println!("{}", line);
        }
    }
}
