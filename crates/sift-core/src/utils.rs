/// A line of source, with comments blanked out and string contents replaced by
/// spaces in `code`. Columns in `code` are the same as in `text`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLine<'a> {
    /// 1-based.
    pub number: usize,
    pub text: &'a str,
    pub code: String,
    /// The line starts inside a block comment or a template literal.
    pub starts_in_literal: bool,
    /// The line ends inside a block comment or a template literal.
    pub ends_in_literal: bool,
}

impl SourceLine<'_> {
    pub fn code_trimmed(&self) -> &str {
        self.code.trim()
    }

    pub fn is_blank(&self) -> bool {
        self.code.trim().is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Comment {
    pub line: usize,
    /// 1-based column of the opening `//` or `/*`.
    pub column: usize,
    /// Text after the comment marker, up to the end of the comment or line.
    pub text: String,
}

#[derive(Debug, Clone, Default)]
pub struct ScannedSource<'a> {
    pub lines: Vec<SourceLine<'a>>,
    pub comments: Vec<Comment>,
}

#[derive(Clone, Copy, PartialEq, Eq)]
enum State {
    Code,
    BlockComment,
    Str(char),
    Template,
}

/// Split `source` into lines, separating code from comments and strings.
///
/// This is a lexical pass only: regular expression literals are not
/// recognized and `${}` placeholders are part of their template.
pub fn scan(source: &str) -> ScannedSource<'_> {
    let mut scanned = ScannedSource::default();
    let mut state = State::Code;

    for (index, text) in source.lines().enumerate() {
        let number = index + 1;
        // Plain strings cannot span lines.
        if matches!(state, State::Str(_)) {
            state = State::Code;
        }
        let starts_in_literal = state != State::Code;

        let chars: Vec<char> = text.chars().collect();
        let mut code = String::with_capacity(text.len());
        // Only set for a block comment opened on this line.
        let mut block: Option<Comment> = None;

        let mut i = 0;
        while i < chars.len() {
            let c = chars[i];
            let next = chars.get(i + 1).copied();
            match state {
                State::Code => match (c, next) {
                    ('/', Some('/')) => {
                        scanned.comments.push(Comment {
                            line: number,
                            column: i + 1,
                            text: chars[i + 2..].iter().collect(),
                        });
                        break;
                    }
                    ('/', Some('*')) => {
                        state = State::BlockComment;
                        block = Some(Comment { line: number, column: i + 1, text: String::new() });
                        code.push_str("  ");
                        i += 2;
                        continue;
                    }
                    ('\'' | '"', _) => {
                        state = State::Str(c);
                        code.push(c);
                    }
                    ('`', _) => {
                        state = State::Template;
                        code.push(c);
                    }
                    _ => code.push(c),
                },
                State::BlockComment => {
                    if c == '*' && next == Some('/') {
                        state = State::Code;
                        scanned.comments.extend(block.take());
                        code.push_str("  ");
                        i += 2;
                        continue;
                    }
                    if let Some(comment) = block.as_mut() {
                        comment.text.push(c);
                    }
                    code.push(' ');
                }
                State::Str(_) | State::Template if c == '\\' => {
                    code.push(' ');
                    if next.is_some() {
                        code.push(' ');
                        i += 2;
                        continue;
                    }
                }
                State::Str(quote) if c == quote => {
                    state = State::Code;
                    code.push(c);
                }
                State::Template if c == '`' => {
                    state = State::Code;
                    code.push(c);
                }
                State::Str(_) | State::Template => code.push(' '),
            }
            i += 1;
        }

        // A block comment running past this line is reported where it starts.
        scanned.comments.extend(block.take());

        scanned.lines.push(SourceLine {
            number,
            text,
            code,
            starts_in_literal,
            ends_in_literal: matches!(state, State::BlockComment | State::Template),
        });
    }

    scanned
}
