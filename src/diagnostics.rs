/// Accumulating sink for rendered diagnostics
#[derive(Debug, Default)]
pub struct ErrorReporter {
    errors: Vec<String>,
}

impl ErrorReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn report_error(&mut self, message: String) {
        tracing::debug!(%message, "diagnostic reported");
        self.errors.push(message);
    }

    pub fn errors(&self) -> &[String] {
        &self.errors
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }

    pub fn into_errors(self) -> Vec<String> {
        self.errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reports_accumulate_in_order() {
        let mut reporter = ErrorReporter::new();
        assert!(!reporter.has_errors());

        reporter.report_error("first\n".to_string());
        reporter.report_error("second\n".to_string());

        assert!(reporter.has_errors());
        assert_eq!(reporter.errors(), ["first\n", "second\n"]);
        assert_eq!(reporter.into_errors().len(), 2);
    }
}
