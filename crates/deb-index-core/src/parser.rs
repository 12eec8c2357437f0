//! Lenient parser for the Debian control block.
//!
//! Only single-line `Name: value` fields whose name is a [`ControlField`]
//! are extracted. Parsing never fails: anything else is skipped.
//!
//! # Limitations
//!
//! Continuation lines (starting with a space or tab) are skipped, so a
//! multi-line value such as the extended `Description` keeps only its
//! first line. A field whose value lives entirely on continuation lines
//! (`Depends:` followed by indented lines) is treated as absent.

use crate::fields::ControlField;
use crate::mapping::ControlMapping;

/// Parse a control block given as text.
pub fn parse_control(text: &str) -> ControlMapping {
    parse_control_lines(text.lines())
}

/// Parse a control block given as ordered lines.
///
/// Field names match case-insensitively and values are trimmed. When a
/// field repeats, the last occurrence wins.
pub fn parse_control_lines<I, S>(lines: I) -> ControlMapping
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut mapping = ControlMapping::new();
    for line in lines {
        if let Some((field, value)) = parse_line(line.as_ref()) {
            mapping.insert(field, value);
        }
    }
    mapping
}

fn parse_line(line: &str) -> Option<(ControlField, &str)> {
    let line = line.strip_suffix('\r').unwrap_or(line);

    // continuation
    if line.starts_with(' ') || line.starts_with('\t') {
        return None;
    }

    let (name, value) = line.split_once(':')?;
    let field = ControlField::from_name(name.trim_end())?;
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    Some((field, value))
}
