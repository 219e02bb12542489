//! Renderings of the durable error log
//!
//! Both renderings produce the same text in the same order; the console form
//! only adds styling.

use super::console::{ConsoleLine, Level, Style, Tint};
use super::record::ErrorRecord;

const HEADER_SIZE: u8 = 24;
const INDEX_SIZE: u8 = 16;
const BODY_SIZE: u8 = 14;

/// Render the log as numbered plain-text blocks under a session header
pub fn render_plain(data_id: &str, records: &[ErrorRecord]) -> String {
    render_console(data_id, records).plain_text()
}

/// Render the log as a single styled console line
pub fn render_console(data_id: &str, records: &[ErrorRecord]) -> ConsoleLine {
    let header = Style::PLAIN.size(HEADER_SIZE);
    let mut line = ConsoleLine::new(Level::Info)
        .with("Error Dump", header.bold())
        .with(" for instance ", header)
        .with(data_id, header.bold().underline())
        .with(":\n\n", header);

    for (index, record) in records.iter().enumerate() {
        if index > 0 {
            line.push("\n\n", Style::PLAIN);
        }
        let number = (index + 1).to_string();
        // message lines align under the id, past " N. "
        let indent = format!(" {}  ", " ".repeat(number.len()));

        line.push(format!(" {}. ", number), Style::PLAIN.size(INDEX_SIZE));
        line.push(
            record.id_string(),
            Style::PLAIN.size(INDEX_SIZE).color(Tint::Red).bold(),
        );
        line.push(
            format!("\n{}{}", indent, continue_lines(record.message(), &indent)),
            Style::PLAIN.size(BODY_SIZE),
        );
        for value in record.context() {
            let text = value.to_string();
            line.push(
                format!("\n{}| {}", indent, continue_lines(&text, &format!("{}| ", indent))),
                Style::PLAIN.size(BODY_SIZE).monospace(),
            );
        }
    }
    line
}

/// Prefix every line after the first with `prefix`
fn continue_lines(text: &str, prefix: &str) -> String {
    text.replace('\n', &format!("\n{}", prefix))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::record::ContextValue;

    #[test]
    fn test_empty_log_is_header_only() {
        assert_eq!(
            render_plain("abc", &[]),
            "Error Dump for instance abc:\n\n"
        );
    }

    #[test]
    fn test_blocks_are_numbered_and_aligned() {
        let records = vec![
            ErrorRecord::new("first message", "First"),
            ErrorRecord::new("second message", "Second")
                .with_context(vec![ContextValue::from("extra")]),
        ];
        insta::assert_snapshot!(render_plain("session-1", &records), @r###"
        Error Dump for instance session-1:

         1. First
            first message

         2. Second
            second message
            | extra
        "###);
    }

    #[test]
    fn test_two_digit_numbers_widen_indent() {
        let records: Vec<_> = (0..10)
            .map(|i| ErrorRecord::new(format!("m{}", i), "E"))
            .collect();
        let dump = render_plain("s", &records);
        assert!(dump.ends_with(" 10. E\n     m9"));
    }

    #[test]
    fn test_multiline_message_stays_in_block() {
        let records = vec![
            ErrorRecord::new("first line\nsecond line", "Multi")
                .with_context(vec![ContextValue::Trace("at a\nat b".to_string())]),
        ];
        insta::assert_snapshot!(render_plain("s", &records), @r###"
        Error Dump for instance s:

         1. Multi
            first line
            second line
            | trace: at a
            | at b
        "###);
    }

    #[test]
    fn test_console_styles_match_layout() {
        let records = vec![ErrorRecord::new("boom", "Crash")];
        let line = render_console("s", &records);
        let id = line
            .segments
            .iter()
            .find(|s| s.text == "Crash")
            .expect("id segment");
        assert_eq!(id.style.css(), "font-size: 16px; color: red; font-weight: bold;");
        assert_eq!(line.segments[0].style.css(), "font-size: 24px; font-weight: bold;");
    }
}
