//! Integration tests for the error manager's log and dumps

use std::rc::Rc;

use pretty_assertions::assert_eq;

use viewcore::config::ErrorsConfig;
use viewcore::diagnostics::{
    ContextValue, ErrorManager, ErrorRecord, ErrorSymbol, Level, MemorySink, MemoryViewer,
    NativeFailure,
};

fn manager(session: &str) -> (ErrorManager, MemorySink) {
    let sink = MemorySink::new();
    let errors = ErrorManager::new(session, ErrorsConfig::default()).with_sink(sink.clone());
    (errors, sink)
}

#[test]
fn test_dump_lists_records_in_call_order() {
    let (errors, _) = manager("post-17");

    errors.report(ErrorRecord::new("first", "A"));
    errors.silent(NativeFailure::new("ignored"), "second", vec![]);
    errors.unhandled(NativeFailure::new("third"));
    errors.warn("not logged", "W");
    errors.report(ErrorRecord::new("fourth", ErrorSymbol::new("D")));

    let records = errors.records();
    let messages: Vec<_> = records.iter().map(|r| r.message()).collect();
    assert_eq!(messages, vec!["first", "second", "third", "fourth"]);

    insta::assert_snapshot!(errors.dump(), @r###"
    Error Dump for instance post-17:

     1. A
        first

     2. Error
        second

     3. Unhandled Error
        third
        | third

     4. D
        fourth
    "###);
}

#[test]
fn test_silent_type_error_example() {
    let (errors, _) = manager("s");
    errors.silent(
        NativeFailure::new("x.foo is not a function").with_name("TypeError"),
        "bad input",
        vec![],
    );

    let dump = errors.dump();
    assert!(dump.contains(" 1. TypeError\n    bad input"));
}

#[test]
fn test_symbol_id_in_dump_has_no_wrapper() {
    let (errors, _) = manager("s");
    let symbol = ErrorSymbol::new("LanguageError");
    errors.report(ErrorRecord::new("unknown language", &symbol));

    let dump = errors.dump();
    assert!(dump.contains(" 1. LanguageError\n"));
    assert!(!dump.contains("Symbol("));
}

#[test]
fn test_warn_leaves_log_length_unchanged() {
    let (errors, sink) = manager("s");
    errors.warn("x", "Y");
    assert_eq!(errors.len(), 0);
    assert_eq!(sink.lines()[0].level, Level::Warn);

    errors.report(ErrorRecord::new("x", "Y"));
    assert_eq!(errors.len(), 1);
}

#[test]
fn test_raised_record_propagates_with_question_mark() {
    fn detect(errors: &ErrorManager, lang: &str) -> Result<&'static str, ErrorRecord> {
        if lang.is_empty() {
            return errors.raise("You must provide a language", "FormError");
        }
        Ok("ok")
    }

    fn submit(errors: &ErrorManager) -> Result<(), ErrorRecord> {
        detect(errors, "")?;
        unreachable!("raise interrupts the caller");
    }

    let (errors, _) = manager("s");
    let record = submit(&errors).unwrap_err();
    assert!(errors.is_empty());

    errors.report(record);
    assert_eq!(errors.records()[0].to_string(), "FormError: You must provide a language");
}

#[test]
fn test_shared_manager_keeps_single_log() {
    let (errors, _) = manager("s");
    let errors = Rc::new(errors);
    let form = Rc::clone(&errors);
    let editor = Rc::clone(&errors);

    form.report(ErrorRecord::new("from form", "Form"));
    editor.silent(ErrorRecord::new("from editor", "Editor"), "recovered", vec![]);

    assert_eq!(errors.len(), 2);
    assert_eq!(errors.records()[1].message(), "from editor; recovered");
}

#[test]
fn test_context_is_rendered_in_report_line() {
    let (errors, sink) = manager("s");
    errors.silent(
        NativeFailure::new("boom").with_name("RangeError"),
        "chart failed",
        vec![ContextValue::from("series: 3")],
    );

    let lines = sink.plain_lines();
    let (level, text) = &lines[0];
    assert_eq!(*level, Level::Error);
    assert_eq!(text, "RangeError: chart failed RangeError: boom series: 3");
}

#[test]
fn test_dump_text_and_console_share_content() {
    let viewer = MemoryViewer::new();
    let sink = MemorySink::new();
    let errors = ErrorManager::new("abc", ErrorsConfig::default())
        .with_sink(sink.clone())
        .with_viewer(viewer.clone());
    errors.report(ErrorRecord::new("one", "A"));
    errors.report(ErrorRecord::new("two", "B"));
    sink.clear();

    errors.dump_console();
    let url = errors.dump_text();

    let encoded = url.strip_prefix("data:text/plain,").unwrap();
    let decoded = urlencoding::decode(encoded).unwrap();
    assert_eq!(decoded, errors.dump());
    assert_eq!(sink.lines()[0].plain_text(), errors.dump());
    assert_eq!(viewer.opened().len(), 1);
}
