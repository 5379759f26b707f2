use serde::Serialize;

/// Severity of a diagnostic record.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Severity {
    Error,
    Warning,
    Info,
}

/// A structured diagnostic record, shared by the scanner, parser, and AST
/// builder so every stage of the pipeline produces the same shape.
///
/// Fields mirror spec's `(severity, code, line, column, message, hint,
/// suggestion, caused_by, source_context)` tuple. Each record is
/// self-describing enough to render without consulting the original source
/// again, aside from `source_context`, which is a pre-extracted snippet.
#[derive(Debug, Clone, Serialize)]
pub struct Diagnostic {
    pub severity: Severity,
    /// Stable error code, e.g. `"E0001"`, `"W0002"`.
    pub code: String,
    pub line: u32,
    pub column: u32,
    pub message: String,
    pub hint: Option<String>,
    pub suggestion: Option<String>,
    /// A related context message, e.g. `"unclosed `{` on line 1"`.
    pub caused_by: Option<String>,
    /// A short reconstructed source snippet around the diagnostic's span.
    pub source_context: Option<String>,
}

impl Diagnostic {
    pub fn error(code: impl Into<String>, line: u32, column: u32, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            code: code.into(),
            line,
            column,
            message: message.into(),
            hint: None,
            suggestion: None,
            caused_by: None,
            source_context: None,
        }
    }

    pub fn warning(code: impl Into<String>, line: u32, column: u32, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            code: code.into(),
            line,
            column,
            message: message.into(),
            hint: None,
            suggestion: None,
            caused_by: None,
            source_context: None,
        }
    }

    pub fn with_hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn with_caused_by(mut self, caused_by: impl Into<String>) -> Self {
        self.caused_by = Some(caused_by.into());
        self
    }

    pub fn with_source_context(mut self, context: impl Into<String>) -> Self {
        self.source_context = Some(context.into());
        self
    }

    /// Render using the text format:
    /// ```text
    /// <code> <severity> at <file>:<line>:<column>: <message>
    ///   context: <snippet>
    ///   hint: <hint>
    ///   suggestion: <suggestion>
    ///   caused by: <enclosing-context>
    /// ```
    pub fn render_text(&self, file: &str) -> String {
        let severity = match self.severity {
            Severity::Error => "error",
            Severity::Warning => "warning",
            Severity::Info => "info",
        };
        let mut out = format!(
            "{} {} at {}:{}:{}: {}",
            self.code, severity, file, self.line, self.column, self.message
        );
        if let Some(ctx) = &self.source_context {
            out.push_str(&format!("\n  context: {ctx}"));
        }
        if let Some(hint) = &self.hint {
            out.push_str(&format!("\n  hint: {hint}"));
        }
        if let Some(suggestion) = &self.suggestion {
            out.push_str(&format!("\n  suggestion: {suggestion}"));
        }
        if let Some(caused_by) = &self.caused_by {
            out.push_str(&format!("\n  caused by: {caused_by}"));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_text_includes_all_present_fields() {
        let d = Diagnostic::error("E0001", 3, 7, "unexpected token")
            .with_hint("did you mean a semicolon?")
            .with_suggestion("insert `;`")
            .with_caused_by("unclosed `{` on line 1")
            .with_source_context("var x = 5\nvar y = 10;");
        let rendered = d.render_text("main.lang");
        assert!(rendered.starts_with("E0001 error at main.lang:3:7: unexpected token"));
        assert!(rendered.contains("hint: did you mean a semicolon?"));
        assert!(rendered.contains("suggestion: insert `;`"));
        assert!(rendered.contains("caused by: unclosed `{` on line 1"));
    }
}
