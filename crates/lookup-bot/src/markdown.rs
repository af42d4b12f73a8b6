//! Telegram MarkdownV2 helpers.
//!
//! Every piece of text that reaches the chat goes through [`escape`], either
//! directly or via [`MessageBuilder`]. Only the builder adds markup.

/// Characters with meaning in MarkdownV2.
pub const RESERVED: [char; 19] = [
    '_', '*', '[', ']', '(', ')', '~', '`', '>', '#', '+', '-', '=', '|', '{', '}', '.', '!', '\\',
];

/// Escape text so Telegram renders it literally.
pub fn escape(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len() + text.len() / 4);
    for c in text.chars() {
        if RESERVED.contains(&c) {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

pub fn bold(text: &str) -> String {
    format!("*{}*", escape(text))
}

pub fn code(text: &str) -> String {
    format!("`{}`", escape(text))
}

/// Cut text to at most `max_chars` characters, marking the cut with `...`.
pub fn truncate(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    if max_chars < 3 {
        return text.chars().take(max_chars).collect();
    }
    let kept: String = text.chars().take(max_chars - 3).collect();
    format!("{kept}...")
}

/// True if any reserved character appears without a preceding escape.
pub fn has_unescaped_reserved(text: &str) -> bool {
    let mut chars = text.chars();
    while let Some(c) = chars.next() {
        if c == '\\' {
            // The escaped character, whatever it is, is literal.
            if chars.next().is_none() {
                return true;
            }
        } else if RESERVED.contains(&c) {
            return true;
        }
    }
    false
}

/// Line-oriented MarkdownV2 message assembly.
#[derive(Debug, Default, Clone)]
pub struct MessageBuilder {
    text: String,
}

impl MessageBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bold heading line.
    pub fn title(&mut self, title: &str) -> &mut Self {
        self.push_line(&bold(title))
    }

    pub fn line(&mut self, text: &str) -> &mut Self {
        self.push_line(&escape(text))
    }

    pub fn blank(&mut self) -> &mut Self {
        self.text.push('\n');
        self
    }

    /// `icon *label:* value`
    pub fn field(&mut self, icon: &str, label: &str, value: &str) -> &mut Self {
        let line = format!("{} {} {}", escape(icon), bold(&format!("{label}:")), escape(value));
        self.push_line(&line)
    }

    /// `icon *label:* `value``
    pub fn code_field(&mut self, icon: &str, label: &str, value: &str) -> &mut Self {
        let line = format!("{} {} {}", escape(icon), bold(&format!("{label}:")), code(value));
        self.push_line(&line)
    }

    pub fn bullet(&mut self, text: &str) -> &mut Self {
        self.push_line(&format!("• {}", escape(text)))
    }

    /// Bullet showing a sample value in monospace, with an optional note.
    pub fn code_bullet(&mut self, sample: &str, note: Option<&str>) -> &mut Self {
        let line = match note {
            Some(note) => format!("• {} {}", code(sample), escape(&format!("({note})"))),
            None => format!("• {}", code(sample)),
        };
        self.push_line(&line)
    }

    /// Length of the message so far, in characters.
    pub fn char_count(&self) -> usize {
        self.text.chars().count()
    }

    pub fn build(&self) -> String {
        self.text.trim_end().to_string()
    }

    fn push_line(&mut self, markup: &str) -> &mut Self {
        self.text.push_str(markup);
        self.text.push('\n');
        self
    }
}
