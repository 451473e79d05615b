use crate::config::EffectiveConfig;
use crate::diagnostic::*;
use crate::utils::{ScannedSource, SourceLine};

pub struct MissingSemicolon;
pub struct ExtraSemicolon;

/// ## What it does
///
/// Checks that statements end with a semicolon, or that they don't when the
/// `semicolon` option is disabled.
///
/// ## Why is this bad?
///
/// Relying on automatic semicolon insertion in some files and not in others
/// makes the code base inconsistent, and a line starting with `(` or `[` can
/// silently continue the previous statement.
///
/// ## Example
///
/// ```js
/// const a = 1
/// ```
///
/// Use instead:
/// ```js
/// const a = 1;
/// ```
impl Violation for MissingSemicolon {
    fn name(&self) -> &'static str {
        "semi"
    }
    fn body(&self) -> String {
        "Missing semicolon.".to_string()
    }
}

impl Violation for ExtraSemicolon {
    fn name(&self) -> &'static str {
        "semi"
    }
    fn body(&self) -> String {
        "Extra semicolon.".to_string()
    }
}

/// Lines ending with one of these do not end a statement.
const CONTINUATION_ENDINGS: &[char] = &[
    '{', '}', '(', '[', ',', ':', ';', '+', '-', '*', '/', '%', '=', '&', '|', '<', '>', '?', '!', '.',
];

/// Keywords starting a statement that never takes a semicolon.
const BLOCK_KEYWORDS: &[&str] = &[
    "if", "else", "for", "while", "do", "switch", "try", "catch", "finally", "function", "class",
];

/// A line starting with one of these continues the previous statement.
const CONTINUATION_STARTS: &[&str] = &[".", "?.", "?", ":", "&&", "||", "??"];

/// Keywords after which `{` opens an object literal or a binding list.
const EXPRESSION_KEYWORDS: &[&str] = &["return", "export", "import", "default", "yield", "await"];

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Opener {
    Paren,
    Bracket,
    Object,
    /// A statement block or a function body. `expression` is set for function
    /// bodies that are part of an assignment, whose closing brace ends the
    /// statement.
    Block { expression: bool },
}

pub fn semi(source: &ScannedSource<'_>, config: &EffectiveConfig, severity: Severity) -> Vec<Finding> {
    let mut findings = Vec::new();
    let mut stack: Vec<Opener> = Vec::new();

    for (index, line) in source.lines.iter().enumerate() {
        let closed_last = track(&mut stack, &line.code);

        let code = line.code.trim_end();
        if line.starts_in_literal || line.ends_in_literal || code.trim_start().is_empty() {
            continue;
        }
        // Inside parentheses, brackets or object literals, lines are not
        // statements.
        if !matches!(stack.last(), None | Some(Opener::Block { .. })) {
            continue;
        }

        let end_column = code.chars().count();
        if config.semicolon {
            let ends = if code.ends_with('}') {
                matches!(closed_last, Some(Opener::Object | Opener::Block { expression: true }))
            } else {
                ends_statement(code)
            };
            if ends && !continues_on_next_line(&source.lines[index + 1..]) {
                findings.push(Finding::new(MissingSemicolon, severity, line.number, end_column + 1));
            }
        } else if code.ends_with(';') && code.trim() != ";" {
            findings.push(Finding::new(ExtraSemicolon, severity, line.number, end_column));
        }
    }

    findings
}

/// Update the stack of open delimiters with `code`, and return the delimiter
/// closed by the last character of the line, if it is a closing one.
fn track(stack: &mut Vec<Opener>, code: &str) -> Option<Opener> {
    let mut closed_last = None;
    for (i, c) in code.char_indices() {
        match c {
            '(' => stack.push(Opener::Paren),
            '[' => stack.push(Opener::Bracket),
            '{' => stack.push(brace_opener(code, &code[..i])),
            ')' | ']' | '}' => {
                closed_last = stack.pop();
                continue;
            }
            _ => {}
        }
        if !c.is_whitespace() {
            closed_last = None;
        }
    }
    closed_last
}

fn brace_opener(line: &str, before: &str) -> Opener {
    let before = before.trim_end();
    if before.is_empty() {
        return Opener::Block { expression: false };
    }
    if before.ends_with(['=', '(', ',', ':', '[', '?', '|', '&']) {
        return Opener::Object;
    }
    if EXPRESSION_KEYWORDS.contains(&last_word(before)) {
        return Opener::Object;
    }
    let expression = has_assignment(before) && !BLOCK_KEYWORDS.contains(&first_word(line));
    Opener::Block { expression }
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

fn first_word(code: &str) -> &str {
    let code = code.trim_start_matches(['}', ' ', '\t']);
    let end = code.find(|c: char| !is_word_char(c)).unwrap_or(code.len());
    &code[..end]
}

fn last_word(code: &str) -> &str {
    let start = code.rfind(|c: char| !is_word_char(c)).map_or(0, |i| i + 1);
    &code[start..]
}

/// Whether `code` holds a `=` that is neither a comparison nor an arrow.
fn has_assignment(code: &str) -> bool {
    let chars: Vec<char> = code.chars().collect();
    chars.iter().enumerate().any(|(i, &c)| {
        let prev = i.checked_sub(1).map(|p| chars[p]);
        let next = chars.get(i + 1).copied();
        c == '='
            && !matches!(prev, Some('=' | '!' | '<' | '>'))
            && !matches!(next, Some('=' | '>'))
    })
}

fn ends_statement(code: &str) -> bool {
    let trimmed = code.trim_start();
    // `++` and `--` end an expression.
    if trimmed.ends_with("++") || trimmed.ends_with("--") {
        return true;
    }
    if trimmed.ends_with(CONTINUATION_ENDINGS) || trimmed.starts_with('@') {
        return false;
    }
    !BLOCK_KEYWORDS.contains(&first_word(trimmed))
}

fn continues_on_next_line(rest: &[SourceLine<'_>]) -> bool {
    rest.iter()
        .find(|line| !line.is_blank())
        .is_some_and(|line| CONTINUATION_STARTS.iter().any(|start| line.code_trimmed().starts_with(start)))
}
