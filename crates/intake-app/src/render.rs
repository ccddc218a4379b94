//! Terminal rendering of assistant markdown

use colored::Colorize;
use pulldown_cmark::{Event, Options, Parser, Tag, TagEnd};

/// Render markdown with terminal colors
pub fn render_terminal(markdown: &str) -> String {
    TerminalWriter::new(true).render(markdown)
}

/// Strip markdown down to readable plain text
pub fn plain_text(markdown: &str) -> String {
    TerminalWriter::new(false).render(markdown)
}

struct TerminalWriter {
    out: String,
    styled: bool,
    strong: usize,
    emphasis: usize,
    heading: bool,
    code_block: bool,
    lists: Vec<Option<u64>>,
}

impl TerminalWriter {
    fn new(styled: bool) -> Self {
        Self {
            out: String::new(),
            styled,
            strong: 0,
            emphasis: 0,
            heading: false,
            code_block: false,
            lists: Vec::new(),
        }
    }

    fn render(mut self, markdown: &str) -> String {
        let mut options = Options::empty();
        options.insert(Options::ENABLE_STRIKETHROUGH);
        options.insert(Options::ENABLE_TABLES);
        options.insert(Options::ENABLE_TASKLISTS);

        for event in Parser::new_ext(markdown, options) {
            self.event(event);
        }
        self.out.trim_end().to_string()
    }

    fn event(&mut self, event: Event<'_>) {
        match event {
            Event::Start(Tag::Strong) => self.strong += 1,
            Event::End(TagEnd::Strong) => self.strong = self.strong.saturating_sub(1),
            Event::Start(Tag::Emphasis) => self.emphasis += 1,
            Event::End(TagEnd::Emphasis) => self.emphasis = self.emphasis.saturating_sub(1),
            Event::Start(Tag::Heading { .. }) => self.heading = true,
            Event::End(TagEnd::Heading(_)) => {
                self.heading = false;
                self.out.push_str("\n\n");
            }
            Event::End(TagEnd::Paragraph) => {
                if self.lists.is_empty() {
                    self.out.push_str("\n\n");
                } else {
                    self.newline();
                }
            }
            Event::Start(Tag::List(start)) => {
                self.newline();
                self.lists.push(start);
            }
            Event::End(TagEnd::List(_)) => {
                self.lists.pop();
                if self.lists.is_empty() {
                    self.out.push('\n');
                }
            }
            Event::Start(Tag::Item) => {
                let depth = self.lists.len().saturating_sub(1);
                self.out.push_str(&"  ".repeat(depth));
                match self.lists.last_mut() {
                    Some(Some(n)) => {
                        self.out.push_str(&format!("{}. ", n));
                        *n += 1;
                    }
                    _ => self.out.push_str("• "),
                }
            }
            Event::End(TagEnd::Item) => self.newline(),
            Event::Start(Tag::CodeBlock(_)) => {
                self.newline();
                self.code_block = true;
            }
            Event::End(TagEnd::CodeBlock) => {
                self.code_block = false;
                self.newline();
                self.out.push('\n');
            }
            Event::Text(text) => self.text(&text),
            Event::Code(code) => {
                if self.styled {
                    self.out.push_str(&code.cyan().to_string());
                } else {
                    self.out.push_str(&code);
                }
            }
            Event::SoftBreak | Event::HardBreak => self.out.push('\n'),
            Event::Rule => self.out.push_str("────────\n\n"),
            Event::TaskListMarker(done) => self.out.push_str(if done { "[x] " } else { "[ ] " }),
            _ => {}
        }
    }

    fn text(&mut self, text: &str) {
        if !self.styled {
            self.out.push_str(text);
            return;
        }
        let styled = if self.heading {
            text.bright_cyan().bold()
        } else if self.code_block {
            text.cyan()
        } else if self.strong > 0 {
            text.bold()
        } else if self.emphasis > 0 {
            text.italic()
        } else {
            text.normal()
        };
        self.out.push_str(&styled.to_string());
    }

    fn newline(&mut self) {
        if !self.out.is_empty() && !self.out.ends_with('\n') {
            self.out.push('\n');
        }
    }
}
