use super::*;

#[test]
fn severity_display() {
    insta::assert_snapshot!(format!("{}", Severity::Error), @"error");
    insta::assert_snapshot!(format!("{}", Severity::Warning), @"warning");
}

#[test]
fn default_severities() {
    assert_eq!(
        DiagnosticKind::GlobalReferencedByName.default_severity(),
        Severity::Warning
    );
    assert_eq!(
        DiagnosticKind::UnsupportedImmediate.default_severity(),
        Severity::Error
    );
    assert_eq!(
        DiagnosticKind::MissingFunctionOffset.default_severity(),
        Severity::Error
    );
}

#[test]
fn report_with_default_message() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::GlobalReferencedByName)
        .emit();

    assert_eq!(diagnostics.len(), 1);
    assert!(!diagnostics.has_errors());
    assert!(diagnostics.has_warnings());
    assert_eq!(
        diagnostics.iter().next().unwrap().message(),
        "referring to global symbol by name from HSA code won't work"
    );
}

#[test]
fn report_with_detail_and_function() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnsupportedImmediate)
        .message("f16")
        .in_function("kern")
        .emit();

    let message = diagnostics.iter().next().unwrap();
    assert_eq!(message.kind(), DiagnosticKind::UnsupportedImmediate);
    assert_eq!(message.function(), Some("kern"));
    assert_eq!(diagnostics.error_count(), 1);
    assert_eq!(diagnostics.warning_count(), 0);
}

#[test]
fn render_lists_in_report_order() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::GlobalReferencedByName)
        .message("&table")
        .in_function("main")
        .emit();
    diagnostics
        .report(DiagnosticKind::MissingFunctionOffset)
        .message("&helper")
        .emit();

    insta::assert_snapshot!(diagnostics.render(), @r"
    warning in `main`: referring to global symbol `&table` by name from HSA code won't work
    error: call target `&helper` was never emitted in this unit
    ");
}

#[test]
fn extend_merges() {
    let mut a = Diagnostics::new();
    a.report(DiagnosticKind::UnsupportedImmediate).emit();
    let mut b = Diagnostics::new();
    b.report(DiagnosticKind::GlobalReferencedByName).emit();

    a.extend(b);

    assert_eq!(a.len(), 2);
    assert_eq!(a.error_count(), 1);
    assert_eq!(a.warning_count(), 1);
}
