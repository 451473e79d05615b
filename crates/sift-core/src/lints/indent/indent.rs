use crate::config::{EffectiveConfig, Indent};
use crate::diagnostic::*;
use crate::utils::ScannedSource;

pub struct WrongIndentation {
    expected: usize,
    indent: Indent,
    spaces: usize,
    tabs: usize,
}

/// ## What it does
///
/// Checks that every line is indented with the configured indentation: tabs
/// by default, or a number of spaces per level with the `space` option.
///
/// The nesting level of a line is the number of earlier lines that opened a
/// bracket, parenthesis or brace still open at that point. Lines starting with
/// a closing delimiter belong to the enclosing level.
///
/// ## Example
///
/// ```js
/// function f() {
///   return 1;
/// }
/// ```
///
/// Use instead:
/// ```js
/// function f() {
/// 	return 1;
/// }
/// ```
impl Violation for WrongIndentation {
    fn name(&self) -> &'static str {
        "indent"
    }
    fn body(&self) -> String {
        let (unit, amount) = match self.indent {
            Indent::Tabs => ("tab", self.expected),
            Indent::Spaces(width) => ("space", self.expected * width as usize),
        };
        let expected = format!("{amount} {unit}{}", plural(amount));

        let found = if self.spaces > 0 {
            match self.indent {
                Indent::Spaces(_) => self.spaces.to_string(),
                Indent::Tabs => format!("{} space{}", self.spaces, plural(self.spaces)),
            }
        } else if self.tabs > 0 {
            match self.indent {
                Indent::Tabs => self.tabs.to_string(),
                Indent::Spaces(_) => format!("{} tab{}", self.tabs, plural(self.tabs)),
            }
        } else {
            "0".to_string()
        };

        format!("Expected indentation of {expected} but found {found}.")
    }
}

fn plural(amount: usize) -> &'static str {
    if amount == 1 { "" } else { "s" }
}

pub fn indent(source: &ScannedSource<'_>, config: &EffectiveConfig, severity: Severity) -> Vec<Finding> {
    let mut findings = Vec::new();
    // Line numbers of the delimiters currently open, in opening order.
    let mut open: Vec<usize> = Vec::new();

    for line in &source.lines {
        let code = line.code.trim();
        let closers = code.chars().take_while(|c| matches!(c, '}' | ')' | ']')).count();
        let level = nesting_level(&open[..open.len().saturating_sub(closers)]);
        update_open(&mut open, line.number, code);

        if line.starts_in_literal || code.is_empty() {
            continue;
        }

        let leading: String = line.text.chars().take_while(|c| *c == ' ' || *c == '\t').collect();
        let spaces = leading.chars().filter(|c| *c == ' ').count();
        let tabs = leading.len() - spaces;

        let expected_ok = match config.indent {
            Indent::Tabs => spaces == 0 && tabs == level,
            Indent::Spaces(width) => tabs == 0 && spaces == level * width as usize,
        };
        if !expected_ok {
            let violation = WrongIndentation { expected: level, indent: config.indent, spaces, tabs };
            findings.push(Finding::new(violation, severity, line.number, 1));
        }
    }

    findings
}

/// Delimiters opened on the same line only count for one level.
fn nesting_level(open: &[usize]) -> usize {
    let mut lines = open.to_vec();
    lines.dedup();
    lines.len()
}

fn update_open(open: &mut Vec<usize>, line: usize, code: &str) {
    for c in code.chars() {
        match c {
            '{' | '(' | '[' => open.push(line),
            '}' | ')' | ']' => {
                open.pop();
            }
            _ => {}
        }
    }
}
