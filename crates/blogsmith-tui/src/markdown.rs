//! Markdown preview renderer
//!
//! Turns the post's markdown into styled terminal lines: headings, emphasis,
//! lists, quotes, rules, links, inline code and tables. Fenced code blocks
//! are highlighted with syntect, by the declared language or by first-line
//! detection, falling back to plain text.
//!
//! The source is sanitized before parsing, so no escape or control sequence
//! from the backend can reach a cell. If highlighting fails, the whole
//! preview degrades to the raw markdown as preformatted lines.

use std::sync::OnceLock;

use blogsmith_core::prelude::*;
use blogsmith_core::sanitize_block;
use pulldown_cmark::{CodeBlockKind, Event, HeadingLevel, Options, Parser, Tag};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use syntect::easy::HighlightLines;
use syntect::highlighting::{FontStyle, Theme, ThemeSet};
use syntect::parsing::SyntaxSet;
use syntect::util::LinesWithEndings;
use unicode_width::UnicodeWidthStr;

use crate::theme::{palette, styles};

/// Highlighting theme for fenced code blocks
const CODE_THEME: &str = "base16-ocean.dark";

/// Left padding of code block rows
const CODE_INDENT: &str = "  ";

/// Width of a horizontal rule
const RULE_WIDTH: usize = 40;

static SYNTAX_SET: OnceLock<SyntaxSet> = OnceLock::new();
static THEME_SET: OnceLock<ThemeSet> = OnceLock::new();

fn syntax_set() -> &'static SyntaxSet {
    SYNTAX_SET.get_or_init(SyntaxSet::load_defaults_newlines)
}

fn code_theme() -> Option<&'static Theme> {
    let themes = THEME_SET.get_or_init(ThemeSet::load_defaults);
    themes
        .themes
        .get(CODE_THEME)
        .or_else(|| themes.themes.values().next())
}

/// Render markdown for the preview tab, falling back to raw text
pub fn render_preview(markdown: &str) -> Vec<Line<'static>> {
    preview_with(markdown, render_markdown)
}

fn preview_with<F>(markdown: &str, render: F) -> Vec<Line<'static>>
where
    F: FnOnce(&str) -> std::result::Result<Vec<Line<'static>>, syntect::Error>,
{
    match render(markdown) {
        Ok(lines) => lines,
        Err(e) => {
            warn!("Code highlighting failed, showing raw markdown: {}", e);
            raw_lines(markdown)
        }
    }
}

/// The markdown source as sanitized, unstyled preformatted lines
pub fn raw_lines(markdown: &str) -> Vec<Line<'static>> {
    sanitize_block(markdown)
        .lines()
        .map(|line| Line::styled(line.to_string(), styles::text_primary()))
        .collect()
}

/// Render markdown into styled lines.
///
/// Fails only when syntect cannot highlight a code block.
pub fn render_markdown(
    markdown: &str,
) -> std::result::Result<Vec<Line<'static>>, syntect::Error> {
    let source = sanitize_block(markdown);

    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let mut writer = MarkdownWriter::default();
    for event in Parser::new_ext(&source, options) {
        writer.handle(event)?;
    }
    Ok(writer.finish())
}

/// Highlight a code block into indented lines
fn highlight_code(
    code: &str,
    lang: Option<&str>,
) -> std::result::Result<Vec<Line<'static>>, syntect::Error> {
    let ss = syntax_set();
    let syntax = lang
        .and_then(|token| ss.find_syntax_by_token(token))
        .or_else(|| {
            code.lines()
                .next()
                .and_then(|first| ss.find_syntax_by_first_line(first))
        })
        .unwrap_or_else(|| ss.find_syntax_plain_text());

    let Some(theme) = code_theme() else {
        return Ok(plain_code_lines(code));
    };

    let mut highlighter = HighlightLines::new(syntax, theme);
    let mut lines = Vec::new();
    for line in LinesWithEndings::from(code) {
        let ranges = highlighter.highlight_line(line, ss)?;
        let mut spans = vec![Span::styled(CODE_INDENT, code_style())];
        spans.extend(ranges.into_iter().filter_map(|(style, text)| {
            let text = text.trim_end_matches(['\n', '\r']);
            (!text.is_empty()).then(|| Span::styled(text.to_string(), convert_style(style)))
        }));
        lines.push(Line::from(spans));
    }
    Ok(lines)
}

fn plain_code_lines(code: &str) -> Vec<Line<'static>> {
    code.lines()
        .map(|line| Line::styled(format!("{}{}", CODE_INDENT, line), code_style()))
        .collect()
}

fn code_style() -> Style {
    Style::default()
        .fg(palette::TEXT_PRIMARY)
        .bg(palette::CODE_BG)
}

fn convert_style(style: syntect::highlighting::Style) -> Style {
    let fg = style.foreground;
    let mut out = Style::default()
        .fg(Color::Rgb(fg.r, fg.g, fg.b))
        .bg(palette::CODE_BG);
    if style.font_style.contains(FontStyle::BOLD) {
        out = out.add_modifier(Modifier::BOLD);
    }
    if style.font_style.contains(FontStyle::ITALIC) {
        out = out.add_modifier(Modifier::ITALIC);
    }
    if style.font_style.contains(FontStyle::UNDERLINE) {
        out = out.add_modifier(Modifier::UNDERLINED);
    }
    out
}

fn heading_style(level: HeadingLevel) -> Style {
    let style = Style::default()
        .fg(palette::HEADING)
        .add_modifier(Modifier::BOLD);
    match level {
        HeadingLevel::H1 => style.add_modifier(Modifier::UNDERLINED),
        HeadingLevel::H2 => style,
        _ => style.remove_modifier(Modifier::BOLD).fg(palette::TEXT_BRIGHT),
    }
}

/// An open markdown element. Every `Start` pushes one and every `End` pops
/// one, so closing tags never need to be inspected.
#[derive(Debug)]
enum Container {
    Paragraph,
    Heading,
    Quote,
    List,
    Item,
    CodeBlock { lang: Option<String>, code: String },
    Styled,
    /// `text_start` is where the link text begins, see `inline_len`
    Link { url: String, text_start: usize },
    Image { url: String },
    Table,
    TableHead,
    TableRow,
    TableCell,
    Other,
}

#[derive(Debug, Default)]
struct TableBuffer {
    header: Vec<String>,
    rows: Vec<Vec<String>>,
    row: Vec<String>,
    cell: String,
    in_head: bool,
}

#[derive(Debug, Default)]
struct MarkdownWriter {
    lines: Vec<Line<'static>>,
    current: Vec<Span<'static>>,
    stack: Vec<Container>,
    styles: Vec<Style>,
    /// Next number per open list (`None` = bullets)
    lists: Vec<Option<u64>>,
    table: Option<TableBuffer>,
}

impl MarkdownWriter {
    fn handle(&mut self, event: Event<'_>) -> std::result::Result<(), syntect::Error> {
        match event {
            Event::Start(tag) => self.start(tag),
            Event::End(_) => {
                if let Some(container) = self.stack.pop() {
                    self.end(container)?;
                }
            }
            Event::Text(text) => self.text(&text),
            Event::Code(code) => {
                self.push_inline(code.to_string(), Style::default().fg(palette::INLINE_CODE))
            }
            Event::SoftBreak => self.text(" "),
            Event::HardBreak => self.flush_line(),
            Event::Rule => {
                self.flush_line();
                self.lines
                    .push(Line::styled("─".repeat(RULE_WIDTH), styles::text_muted()));
                self.blank_line();
            }
            Event::TaskListMarker(checked) => {
                let marker = if checked { "[x] " } else { "[ ] " };
                self.push_inline(marker.to_string(), Style::default());
            }
            Event::Html(html) | Event::InlineHtml(html) => {
                self.push_inline(html.trim_end().to_string(), styles::text_muted());
                if html.ends_with('\n') && self.table.is_none() {
                    self.flush_line();
                }
            }
            Event::FootnoteReference(name) => {
                self.push_inline(format!("[^{}]", name), styles::text_muted());
            }
            _ => {}
        }
        Ok(())
    }

    fn start(&mut self, tag: Tag<'_>) {
        let container = match tag {
            Tag::Paragraph => Container::Paragraph,
            Tag::Heading { level, .. } => {
                self.flush_line();
                let marker = "#".repeat(level as usize);
                let style = heading_style(level);
                self.current.push(Span::styled(format!("{} ", marker), style));
                self.styles.push(style);
                Container::Heading
            }
            Tag::BlockQuote(_) => {
                self.flush_line();
                Container::Quote
            }
            Tag::CodeBlock(kind) => {
                self.flush_line();
                let lang = match kind {
                    CodeBlockKind::Fenced(info) => info
                        .split([',', ' '])
                        .next()
                        .filter(|token| !token.is_empty())
                        .map(str::to_string),
                    CodeBlockKind::Indented => None,
                };
                Container::CodeBlock {
                    lang,
                    code: String::new(),
                }
            }
            Tag::List(first) => {
                self.flush_line();
                self.lists.push(first);
                Container::List
            }
            Tag::Item => {
                self.flush_line();
                let depth = self.lists.len().saturating_sub(1);
                let marker = match self.lists.last_mut() {
                    Some(Some(n)) => {
                        let marker = format!("{}. ", n);
                        *n += 1;
                        marker
                    }
                    _ => "• ".to_string(),
                };
                self.current.push(Span::styled(
                    format!("{}{}", "  ".repeat(depth), marker),
                    styles::accent(),
                ));
                Container::Item
            }
            Tag::Emphasis => self.push_style(Style::default().add_modifier(Modifier::ITALIC)),
            Tag::Strong => self.push_style(Style::default().add_modifier(Modifier::BOLD)),
            Tag::Strikethrough => {
                self.push_style(Style::default().add_modifier(Modifier::CROSSED_OUT))
            }
            Tag::Link { dest_url, .. } => {
                self.styles.push(
                    Style::default()
                        .fg(palette::LINK)
                        .add_modifier(Modifier::UNDERLINED),
                );
                Container::Link {
                    url: dest_url.to_string(),
                    text_start: self.inline_len(),
                }
            }
            Tag::Image { dest_url, .. } => {
                self.push_inline("[image: ".to_string(), styles::text_muted());
                Container::Image {
                    url: dest_url.to_string(),
                }
            }
            Tag::Table(_) => {
                self.flush_line();
                self.table = Some(TableBuffer::default());
                Container::Table
            }
            Tag::TableHead => {
                if let Some(table) = self.table.as_mut() {
                    table.in_head = true;
                }
                Container::TableHead
            }
            Tag::TableRow => Container::TableRow,
            Tag::TableCell => Container::TableCell,
            _ => Container::Other,
        };
        self.stack.push(container);
    }

    fn end(&mut self, container: Container) -> std::result::Result<(), syntect::Error> {
        match container {
            Container::Paragraph => {
                self.flush_line();
                if !self.in_list() {
                    self.blank_line();
                }
            }
            Container::Heading => {
                self.styles.pop();
                self.flush_line();
                self.blank_line();
            }
            Container::Quote => {
                self.flush_line();
                self.blank_line();
            }
            Container::List => {
                self.flush_line();
                self.lists.pop();
                if !self.in_list() {
                    self.blank_line();
                }
            }
            Container::Item => self.flush_line(),
            Container::CodeBlock { lang, code } => {
                let highlighted = highlight_code(&code, lang.as_deref())?;
                self.lines.extend(highlighted);
                self.blank_line();
            }
            Container::Styled => {
                self.styles.pop();
            }
            Container::Link { url, text_start } => {
                self.styles.pop();
                // Autolinks already show the URL
                if !url.is_empty() && self.inline_text_since(text_start) != url {
                    self.push_inline(format!(" <{}>", url), styles::text_muted());
                }
            }
            Container::Image { url } => {
                self.push_inline("]".to_string(), styles::text_muted());
                if !url.is_empty() {
                    self.push_inline(format!(" <{}>", url), styles::text_muted());
                }
            }
            Container::TableCell => {
                if let Some(table) = self.table.as_mut() {
                    let cell = std::mem::take(&mut table.cell);
                    table.row.push(cell.trim().to_string());
                }
            }
            Container::TableHead => {
                if let Some(table) = self.table.as_mut() {
                    table.header = std::mem::take(&mut table.row);
                    table.in_head = false;
                }
            }
            Container::TableRow => {
                if let Some(table) = self.table.as_mut() {
                    let row = std::mem::take(&mut table.row);
                    if table.in_head {
                        table.header = row;
                    } else {
                        table.rows.push(row);
                    }
                }
            }
            Container::Table => {
                if let Some(table) = self.table.take() {
                    self.lines.extend(table_lines(&table));
                    self.blank_line();
                }
            }
            Container::Other => {}
        }
        Ok(())
    }

    fn text(&mut self, text: &str) {
        if let Some(Container::CodeBlock { code, .. }) = self.stack.last_mut() {
            code.push_str(text);
            return;
        }
        if let Some(table) = self.table.as_mut() {
            table.cell.push_str(text);
            return;
        }
        // Block text only reaches here as whole lines of inline content
        let style = self.current_style();
        for (i, part) in text.split('\n').enumerate() {
            if i > 0 {
                self.flush_line();
            }
            if !part.is_empty() {
                self.current.push(Span::styled(part.to_string(), style));
            }
        }
    }

    /// Append inline content to the open table cell, or to the current line
    fn push_inline(&mut self, text: String, style: Style) {
        match self.table.as_mut() {
            Some(table) => table.cell.push_str(&text),
            None => self.current.push(Span::styled(text, style)),
        }
    }

    /// Position of the next inline content: a byte offset into the open
    /// table cell, or a span index into the current line
    fn inline_len(&self) -> usize {
        match &self.table {
            Some(table) => table.cell.len(),
            None => self.current.len(),
        }
    }

    fn inline_text_since(&self, start: usize) -> String {
        match &self.table {
            Some(table) => table.cell.get(start..).unwrap_or_default().to_string(),
            None => self
                .current
                .get(start..)
                .unwrap_or_default()
                .iter()
                .map(|s| s.content.as_ref())
                .collect(),
        }
    }

    fn push_style(&mut self, style: Style) -> Container {
        self.styles.push(style);
        Container::Styled
    }

    fn current_style(&self) -> Style {
        let quoted = self.quote_depth() > 0;
        let base = if quoted {
            Style::default()
                .fg(palette::QUOTE)
                .add_modifier(Modifier::ITALIC)
        } else {
            styles::text_primary()
        };
        self.styles.iter().fold(base, |acc, s| acc.patch(*s))
    }

    fn quote_depth(&self) -> usize {
        self.stack
            .iter()
            .filter(|c| matches!(c, Container::Quote))
            .count()
    }

    fn in_list(&self) -> bool {
        !self.lists.is_empty()
    }

    fn flush_line(&mut self) {
        if self.current.is_empty() {
            return;
        }
        let depth = self.quote_depth();
        let mut spans = Vec::with_capacity(self.current.len() + 1);
        if depth > 0 {
            spans.push(Span::styled("│ ".repeat(depth), styles::text_muted()));
        }
        spans.append(&mut self.current);
        self.lines.push(Line::from(spans));
    }

    fn blank_line(&mut self) {
        if self.lines.last().is_some_and(|l| l.width() > 0) {
            self.lines.push(Line::default());
        }
    }

    fn finish(mut self) -> Vec<Line<'static>> {
        self.flush_line();
        while self.lines.last().is_some_and(|l| l.width() == 0) {
            self.lines.pop();
        }
        self.lines
    }
}

/// Render a buffered table as aligned text rows
fn table_lines(table: &TableBuffer) -> Vec<Line<'static>> {
    let columns = std::iter::once(&table.header)
        .chain(table.rows.iter())
        .map(Vec::len)
        .max()
        .unwrap_or(0);
    if columns == 0 {
        return Vec::new();
    }

    let mut widths = vec![0usize; columns];
    for row in std::iter::once(&table.header).chain(table.rows.iter()) {
        for (i, cell) in row.iter().enumerate() {
            widths[i] = widths[i].max(cell.width());
        }
    }

    let format_row = |row: &[String]| -> String {
        widths
            .iter()
            .enumerate()
            .map(|(i, width)| {
                let cell = row.get(i).map(String::as_str).unwrap_or("");
                let pad = width.saturating_sub(cell.width());
                format!("{}{}", cell, " ".repeat(pad))
            })
            .collect::<Vec<_>>()
            .join(" │ ")
    };

    let mut lines = Vec::with_capacity(table.rows.len() + 2);
    if !table.header.is_empty() {
        lines.push(Line::styled(
            format_row(&table.header),
            styles::text_bright_bold(),
        ));
        let separator = widths
            .iter()
            .map(|w| "─".repeat(*w))
            .collect::<Vec<_>>()
            .join("─┼─");
        lines.push(Line::styled(separator, styles::text_muted()));
    }
    for row in &table.rows {
        lines.push(Line::styled(format_row(row), styles::text_primary()));
    }
    lines
}
