use console::style;

use crate::ingest::IngestReport;

/// Human-facing status lines
///
/// Everything goes to stderr so stdout carries only the rendered document.
pub struct Output {
    quiet: bool,
}

impl Output {
    pub fn new(quiet: bool) -> Self {
        Self { quiet }
    }

    pub fn success(&self, message: &str) {
        if !self.quiet {
            eprintln!("{} {}", style("✓").green(), message);
        }
    }

    pub fn error(&self, message: &str) {
        eprintln!("{} {}", style("✗").red(), message);
    }

    pub fn warning(&self, message: &str) {
        if !self.quiet {
            eprintln!("{} {}", style("⚠").yellow(), message);
        }
    }

    pub fn info(&self, message: &str) {
        if !self.quiet {
            eprintln!("{} {}", style("ℹ").blue(), message);
        }
    }

    pub fn report(&self, report: &IngestReport) {
        let graph = &report.graph;
        self.success(&format!(
            "Documented {} files ({} chars) in {:.1}s",
            report.files_selected,
            report.total_chars,
            report.elapsed.as_secs_f64()
        ));
        self.info(&format!(
            "{} sections, {} relations, {} diagrams",
            graph.sections.len(),
            graph.relations.len(),
            graph.diagrams.len()
        ));

        let dangling = graph.unresolved_relations().len();
        if dangling > 0 {
            self.warning(&format!(
                "{} relations reference unknown sections",
                dangling
            ));
        }
    }
}

impl Default for Output {
    fn default() -> Self {
        Self::new(false)
    }
}
