use super::*;
use crate::graph::Span;

#[test]
fn severity_display() {
    insta::assert_snapshot!(format!("{}", Severity::Error), @"error");
    insta::assert_snapshot!(format!("{}", Severity::Warning), @"warning");
}

#[test]
fn report_with_default_message() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnrecognizedEncoding, None)
        .emit();

    assert_eq!(diagnostics.len(), 1);
    assert!(diagnostics.has_errors());
    assert!(!diagnostics.has_warnings());
}

#[test]
fn report_with_custom_message() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnrecognizedScalar, Some(Span::new(4, 9)))
        .message("Lib.money")
        .emit();

    insta::assert_snapshot!(diagnostics.printer().render(), @"error[unrecognized-scalar] at 4..9: unrecognized scalar type `Lib.money` (hint: extend a standard scalar, e.g. `scalar petId extends string`)");
}

#[test]
fn warnings_are_counted_separately() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::DuplicateRoute, None)
        .message("GET /pets")
        .emit();
    diagnostics
        .report(DiagnosticKind::UnsupportedAuthentication, None)
        .message("OAuth2")
        .hint("only API keys in headers are supported")
        .emit();

    assert_eq!(diagnostics.warning_count(), 1);
    assert_eq!(diagnostics.error_count(), 1);
    assert!(diagnostics.contains(DiagnosticKind::DuplicateRoute));
    assert!(!diagnostics.contains(DiagnosticKind::UnknownOperation));

    insta::assert_snapshot!(diagnostics.printer().render(), @r"
    warning[duplicate-route]: route `GET /pets` is declared more than once (hint: the operation declared first wins)
    error[unsupported-authentication]: unsupported authentication scheme: OAuth2 (hint: only API keys in headers are supported)
    ");
}

#[test]
fn render_with_source_points_at_span() {
    let source = "model Pet { tag: money }";
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnrecognizedScalar, Some(Span::new(17, 22)))
        .message("money")
        .emit();

    let rendered = diagnostics.printer().source(source).path("pets.tsp").render();
    assert!(rendered.contains("unrecognized scalar type `money`"));
    assert!(rendered.contains("pets.tsp"));
    assert!(rendered.contains("^^^^^"));
}

#[test]
fn render_with_source_falls_back_for_spanless() {
    let mut diagnostics = Diagnostics::new();
    diagnostics
        .report(DiagnosticKind::UnknownOperation, None)
        .message("Pets.list")
        .emit();

    let rendered = diagnostics.printer().source("").render();
    insta::assert_snapshot!(rendered, @"error[unknown-operation]: endpoint refers to unknown operation `Pets.list`");
}

#[test]
fn extend_merges() {
    let mut a = Diagnostics::new();
    a.report(DiagnosticKind::UnrecognizedEncoding, None).emit();
    let mut b = Diagnostics::new();
    b.report(DiagnosticKind::MultipleResponseShapes, None).emit();

    a.extend(b);
    assert_eq!(a.len(), 2);
}
