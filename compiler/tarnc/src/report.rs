//! Terminal rendering of diagnostics.

use ariadne::{Color, Label, Report, ReportKind, Source};
use tarn_diagnostic::Diagnostic;

/// Render one diagnostic against the source text.
pub(crate) fn render(source: &str, diagnostic: &Diagnostic) {
    let offset = diagnostic.primary_span().to_range().start;
    let mut report = Report::build(ReportKind::Error, (), offset)
        .with_message(format!("{} [{}]", diagnostic.message, diagnostic.code));
    for label in &diagnostic.labels {
        report = report.with_label(
            Label::new(label.span.to_range())
                .with_message(&label.message)
                .with_color(Color::Red),
        );
    }
    if let Err(error) = report.finish().eprint(Source::from(source)) {
        eprintln!("error: failed to render diagnostic: {error}");
    }
}
