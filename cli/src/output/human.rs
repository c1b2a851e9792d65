//! Human-readable terminal renderer.

use crate::domain::VerifyReport;
use crate::output::OutputContext;

/// Renders domain types as human-readable terminal output using `OutputContext`.
pub struct HumanRenderer<'a> {
    ctx: &'a OutputContext,
}

impl<'a> HumanRenderer<'a> {
    /// Create a new `HumanRenderer` wrapping the given output context.
    #[must_use]
    pub fn new(ctx: &'a OutputContext) -> Self {
        Self { ctx }
    }

    /// Render the CLI version.
    pub fn render_version(&self, version: &str) {
        if self.ctx.quiet {
            return;
        }
        println!("infracheck {version}");
    }

    /// Render the verdict of a verification run.
    ///
    /// Failures go to stderr and are never suppressed.
    pub fn render_report(&self, report: &VerifyReport) {
        if !self.ctx.quiet {
            println!();
        }
        self.ctx.header("Verification:");
        self.ctx.kv("Output:", &report.output_name);
        if let Some(value) = &report.output_value {
            self.ctx.kv("Value:", &display_value(value));
        }
        let elapsed = report.finished_at - report.started_at;
        self.ctx.kv("Duration:", &format_duration(elapsed.num_seconds()));

        if report.passed() {
            self.ctx.success("PASS");
        }
        for failure in report.failures() {
            self.ctx.error(&failure);
        }
        if !report.teardown_ok() {
            self.ctx.info("Resources may have leaked. Run: infracheck destroy");
        }
    }
}

fn display_value(value: &str) -> String {
    if value.is_empty() {
        "(empty)".to_string()
    } else {
        value.to_string()
    }
}

/// Format seconds as `"1h 2m 3s"`, dropping leading zero units.
#[must_use]
pub fn format_duration(secs: i64) -> String {
    let secs = secs.max(0);
    let (h, m, s) = (secs / 3600, (secs % 3600) / 60, secs % 60);
    if h > 0 {
        format!("{h}h {m}m {s}s")
    } else if m > 0 {
        format!("{m}m {s}s")
    } else {
        format!("{s}s")
    }
}
