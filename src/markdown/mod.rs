//! Markdown to styled ratatui lines
//!
//! Assistant replies are markdown. This renders headings, paragraphs,
//! lists, block quotes, code, links, emphasis and GFM tables into
//! `Line`s. Incomplete markdown (a reply still streaming) renders as far
//! as it parses.

mod styles;

use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};
use ratatui::style::{Modifier, Style};
use ratatui::text::{Line, Span};
use unicode_width::UnicodeWidthStr;

use styles::{
    STYLE_CODE_BLOCK, STYLE_HEADING, STYLE_INLINE_CODE, STYLE_LINK, STYLE_QUOTE,
    STYLE_TABLE_BORDER, STYLE_TABLE_HEADER,
};

/// Render markdown text to styled lines.
///
/// Blocks are separated by one blank line. Always returns at least one
/// line.
pub fn render_markdown(text: &str) -> Vec<Line<'static>> {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);

    let mut renderer = Renderer::default();
    for event in Parser::new_ext(text, options) {
        renderer.event(event);
    }
    renderer.finish()
}

#[derive(Default)]
struct TableBuffer {
    rows: Vec<Vec<String>>,
    row: Vec<String>,
    cell: String,
}

#[derive(Default)]
struct Renderer {
    lines: Vec<Line<'static>>,
    spans: Vec<Span<'static>>,
    styles: Vec<Style>,
    /// `Some(n)` for ordered lists: the next item number
    lists: Vec<Option<u64>>,
    quote_depth: usize,
    in_code_block: bool,
    table: Option<TableBuffer>,
}

impl Renderer {
    fn style(&self) -> Style {
        self.styles.last().copied().unwrap_or_default()
    }

    fn push_style(&mut self, f: impl FnOnce(Style) -> Style) {
        let next = f(self.style());
        self.styles.push(next);
    }

    fn prefix(&self) -> Vec<Span<'static>> {
        let mut prefix = Vec::new();
        if self.quote_depth > 0 {
            prefix.push(Span::styled("│ ".repeat(self.quote_depth), STYLE_QUOTE));
        }
        if self.lists.len() > 1 {
            prefix.push(Span::raw("  ".repeat(self.lists.len() - 1)));
        }
        prefix
    }

    /// Finish the current line, if it has content
    fn flush(&mut self) {
        if self.spans.is_empty() {
            return;
        }
        let mut spans = self.prefix();
        spans.append(&mut self.spans);
        self.lines.push(Line::from(spans));
    }

    /// End a block: flush and leave one blank line after it
    fn end_block(&mut self) {
        self.flush();
        if self.lists.is_empty() && !self.lines.last().is_some_and(|l| l.width() == 0) {
            self.lines.push(Line::default());
        }
    }

    fn text(&mut self, text: &str) {
        if let Some(table) = self.table.as_mut() {
            table.cell.push_str(text);
            return;
        }
        let style = self.style();
        if self.in_code_block {
            let mut parts = text.split('\n').peekable();
            while let Some(part) = parts.next() {
                if !part.is_empty() {
                    self.spans.push(Span::styled(part.to_string(), style));
                }
                if parts.peek().is_some() {
                    if self.spans.is_empty() {
                        self.spans.push(Span::raw(""));
                    }
                    self.flush();
                }
            }
            return;
        }
        self.spans.push(Span::styled(text.to_string(), style));
    }

    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(tag) => self.end(tag),
            Event::Text(text) => self.text(&text),
            Event::Code(code) => match self.table.as_mut() {
                Some(table) => table.cell.push_str(&code),
                None => self
                    .spans
                    .push(Span::styled(code.to_string(), STYLE_INLINE_CODE)),
            },
            Event::SoftBreak => self.text(" "),
            Event::HardBreak => {
                if let Some(table) = self.table.as_mut() {
                    table.cell.push(' ');
                } else {
                    self.flush();
                }
            }
            Event::Rule => {
                self.flush();
                self.lines
                    .push(Line::from(Span::styled("─".repeat(24), STYLE_TABLE_BORDER)));
                self.end_block();
            }
            Event::TaskListMarker(done) => {
                self.spans
                    .push(Span::raw(if done { "[x] " } else { "[ ] " }));
            }
            Event::Html(html) | Event::InlineHtml(html) => self.text(&html),
            _ => {}
        }
    }

    fn start(&mut self, tag: Tag<'_>) {
        match tag {
            Tag::Heading { .. } => {
                self.flush();
                self.push_style(|_| STYLE_HEADING);
            }
            Tag::CodeBlock(_) => {
                self.flush();
                self.in_code_block = true;
                self.push_style(|_| STYLE_CODE_BLOCK);
            }
            Tag::BlockQuote(_) => {
                self.flush();
                self.quote_depth += 1;
                self.push_style(|_| STYLE_QUOTE);
            }
            Tag::List(first) => {
                self.flush();
                self.lists.push(first);
            }
            Tag::Item => {
                self.flush();
                let marker = match self.lists.last_mut() {
                    Some(Some(n)) => {
                        let marker = format!("{}. ", n);
                        *n += 1;
                        marker
                    }
                    _ => "• ".to_string(),
                };
                self.spans.push(Span::raw(marker));
            }
            Tag::Strong => self.push_style(|s| s.add_modifier(Modifier::BOLD)),
            Tag::Emphasis => self.push_style(|s| s.add_modifier(Modifier::ITALIC)),
            Tag::Strikethrough => self.push_style(|s| s.add_modifier(Modifier::CROSSED_OUT)),
            Tag::Link { .. } => self.push_style(|s| s.patch(STYLE_LINK)),
            Tag::Table(_) => {
                self.flush();
                self.table = Some(TableBuffer::default());
            }
            Tag::TableHead | Tag::TableRow => {
                if let Some(table) = self.table.as_mut() {
                    table.row.clear();
                }
            }
            Tag::TableCell => {
                if let Some(table) = self.table.as_mut() {
                    table.cell.clear();
                }
            }
            _ => {}
        }
    }

    fn end(&mut self, tag: TagEnd) {
        match tag {
            TagEnd::Paragraph => self.end_block(),
            TagEnd::Heading(_) => {
                self.styles.pop();
                self.end_block();
            }
            TagEnd::CodeBlock => {
                self.flush();
                self.in_code_block = false;
                self.styles.pop();
                self.end_block();
            }
            TagEnd::BlockQuote(_) => {
                self.flush();
                self.quote_depth = self.quote_depth.saturating_sub(1);
                self.styles.pop();
                self.end_block();
            }
            TagEnd::List(_) => {
                self.flush();
                self.lists.pop();
                self.end_block();
            }
            TagEnd::Item => self.flush(),
            TagEnd::Strong | TagEnd::Emphasis | TagEnd::Strikethrough | TagEnd::Link => {
                self.styles.pop();
            }
            TagEnd::TableCell => {
                if let Some(table) = self.table.as_mut() {
                    let cell = std::mem::take(&mut table.cell);
                    table.row.push(cell.trim().to_string());
                }
            }
            TagEnd::TableHead | TagEnd::TableRow => {
                if let Some(table) = self.table.as_mut() {
                    let row = std::mem::take(&mut table.row);
                    if !row.is_empty() {
                        table.rows.push(row);
                    }
                }
            }
            TagEnd::Table => {
                if let Some(table) = self.table.take() {
                    render_table(&table.rows, &mut self.lines);
                }
                self.end_block();
            }
            _ => {}
        }
    }

    fn finish(mut self) -> Vec<Line<'static>> {
        // A table cut off mid-stream still shows what arrived
        if let Some(table) = self.table.take() {
            render_table(&table.rows, &mut self.lines);
        }
        self.flush();
        while self.lines.last().is_some_and(|l| l.width() == 0) {
            self.lines.pop();
        }
        if self.lines.is_empty() {
            self.lines.push(Line::default());
        }
        self.lines
    }
}

fn table_border(widths: &[usize], left: char, mid: char, right: char) -> String {
    let mut border = String::new();
    border.push(left);
    for (i, width) in widths.iter().enumerate() {
        border.push_str(&"─".repeat(width + 2));
        border.push(if i + 1 == widths.len() { right } else { mid });
    }
    border
}

fn render_table(rows: &[Vec<String>], lines: &mut Vec<Line<'static>>) {
    let columns = rows.iter().map(Vec::len).max().unwrap_or(0);
    if columns == 0 {
        return;
    }
    let mut widths = vec![3; columns];
    for row in rows {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.width());
        }
    }

    lines.push(Line::from(Span::styled(
        table_border(&widths, '┌', '┬', '┐'),
        STYLE_TABLE_BORDER,
    )));
    for (index, row) in rows.iter().enumerate() {
        let style = if index == 0 {
            STYLE_TABLE_HEADER
        } else {
            Style::default()
        };
        let mut spans = vec![Span::styled("│", STYLE_TABLE_BORDER)];
        for (i, width) in widths.iter().enumerate() {
            let cell = row.get(i).map(String::as_str).unwrap_or("");
            let pad = width.saturating_sub(cell.width());
            spans.push(Span::styled(format!(" {}{} ", cell, " ".repeat(pad)), style));
            spans.push(Span::styled("│", STYLE_TABLE_BORDER));
        }
        lines.push(Line::from(spans));
        if index == 0 && rows.len() > 1 {
            lines.push(Line::from(Span::styled(
                table_border(&widths, '├', '┼', '┤'),
                STYLE_TABLE_BORDER,
            )));
        }
    }
    lines.push(Line::from(Span::styled(
        table_border(&widths, '└', '┴', '┘'),
        STYLE_TABLE_BORDER,
    )));
}
