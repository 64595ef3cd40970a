//! Output formatters for console and JSON

use crate::config::OutputFormat;
use crate::error::{Result, SkillMatchError};
use crate::output::report::*;
use colored::{Color, Colorize};

/// Trait for formatting reports
pub trait OutputFormatter {
    fn format_report(&self, report: &Report) -> Result<String>;
    fn supports_format(&self) -> OutputFormat;
}

/// Console formatter with optional colors
pub struct ConsoleFormatter {
    use_colors: bool,
}

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    pretty: bool,
}

/// Picks the formatter for the requested format
pub struct ReportGenerator {
    formatters: Vec<Box<dyn OutputFormatter>>,
}

impl ConsoleFormatter {
    pub fn new(use_colors: bool) -> Self {
        Self { use_colors }
    }

    fn colorize(&self, text: &str, color: Color) -> String {
        if self.use_colors {
            text.color(color).to_string()
        } else {
            text.to_string()
        }
    }

    fn format_header(&self, title: &str) -> String {
        if self.use_colors {
            format!("\n{} {}\n", "█".color(Color::Blue).bold(), title.color(Color::Blue).bold())
        } else {
            format!("\n█ {}\n", title)
        }
    }

    fn format_score_badge(&self, percentage: u8) -> String {
        let color = match percentage {
            80..=100 => Color::Green,
            60..=79 => Color::BrightGreen,
            40..=59 => Color::Yellow,
            1..=39 => Color::BrightRed,
            _ => Color::Red,
        };
        let badge = format!("{}% [{}]", percentage, verdict(percentage));

        if self.use_colors {
            badge.color(color).bold().to_string()
        } else {
            badge
        }
    }

    fn format_list(&self, title: &str, items: &[String], color: Color) -> String {
        let mut output = format!("{} ({}):\n", title, items.len());
        if items.is_empty() {
            output.push_str("  (none)\n");
        }
        for item in items {
            output.push_str(&format!("  • {}\n", self.colorize(item, color)));
        }
        output
    }

    fn format_footer(&self, metadata: &ReportMetadata) -> String {
        let footer = format!(
            "\nGenerated {} | strategy: {} | vocabulary: {} skills | v{}\n",
            metadata.generated_at.format("%Y-%m-%d %H:%M:%S UTC"),
            metadata.strategy,
            metadata.vocabulary_size,
            metadata.version
        );
        self.colorize(&footer, Color::BrightBlack)
    }

    fn format_match(&self, report: &MatchReport) -> String {
        let mut output = self.format_header("SKILL MATCH");
        output.push_str(&format!("Match: {}\n", self.format_score_badge(report.result.percentage)));
        output.push_str(&format!(
            "Exact matches: {} | Partial matches: {}\n\n",
            report.result.exact_count, report.result.partial_count
        ));
        output.push_str(&self.format_list("Candidate skills", &report.candidate_skills, Color::Cyan));
        output.push_str(&self.format_list("Matched requirements", &report.result.matched, Color::Green));
        output.push_str(&self.format_list("Missing requirements", &report.result.missing, Color::Red));
        output.push_str(&self.format_footer(&report.metadata));
        output
    }

    fn format_extraction(&self, report: &ExtractionReport) -> String {
        let mut output = self.format_header("EXTRACTED SKILLS");
        output.push_str(&format!("Document: {}\n\n", report.locator));
        output.push_str(&self.format_list("Skills", &report.skills, Color::Cyan));
        output.push_str(&self.format_footer(&report.metadata));
        output
    }

    fn format_recommendations(&self, report: &RecommendationReport) -> String {
        let mut output = self.format_header("RECOMMENDED JOBS");
        output.push_str(&format!(
            "Top {} of {} jobs for {} skills\n\n",
            report.recommendations.len(),
            report.jobs_considered,
            report.candidate_skills.len()
        ));

        if report.recommendations.is_empty() {
            output.push_str("  (no jobs)\n");
        }
        for (i, ranked) in report.recommendations.iter().enumerate() {
            let company = ranked
                .job
                .company
                .as_deref()
                .map(|c| format!(" @ {}", c))
                .unwrap_or_default();
            output.push_str(&format!(
                "  {}. {}{} ({}) {}\n",
                i + 1,
                ranked.job.title,
                company,
                ranked.job.id,
                self.format_score_badge(ranked.match_percentage)
            ));
        }
        output.push_str(&self.format_footer(&report.metadata));
        output
    }

    fn format_vocabulary(&self, report: &VocabularyReport) -> String {
        let mut output = self.format_header("SKILL VOCABULARY");
        output.push_str(&self.format_list("Recognised skills", &report.skills, Color::Cyan));
        output.push_str(&self.format_footer(&report.metadata));
        output
    }
}

impl OutputFormatter for ConsoleFormatter {
    fn format_report(&self, report: &Report) -> Result<String> {
        Ok(match report {
            Report::Match(r) => self.format_match(r),
            Report::Extraction(r) => self.format_extraction(r),
            Report::Recommendations(r) => self.format_recommendations(r),
            Report::Vocabulary(r) => self.format_vocabulary(r),
        })
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Console
    }
}

impl JsonFormatter {
    pub fn new(pretty: bool) -> Self {
        Self { pretty }
    }
}

impl OutputFormatter for JsonFormatter {
    fn format_report(&self, report: &Report) -> Result<String> {
        if self.pretty {
            Ok(serde_json::to_string_pretty(report)?)
        } else {
            Ok(serde_json::to_string(report)?)
        }
    }

    fn supports_format(&self) -> OutputFormat {
        OutputFormat::Json
    }
}

impl ReportGenerator {
    pub fn new() -> Self {
        Self::with_options(true, true)
    }

    pub fn with_options(use_colors: bool, pretty_json: bool) -> Self {
        Self {
            formatters: vec![
                Box::new(ConsoleFormatter::new(use_colors)),
                Box::new(JsonFormatter::new(pretty_json)),
            ],
        }
    }

    pub fn generate_report(&self, report: &Report, format: &OutputFormat) -> Result<String> {
        let formatter = self
            .formatters
            .iter()
            .find(|f| f.supports_format() == *format)
            .ok_or_else(|| SkillMatchError::OutputFormatting(format!("No formatter for {:?}", format)))?;

        formatter.format_report(report)
    }
}

impl Default for ReportGenerator {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::processing::matcher::MatchResult;
    use crate::processing::ranker::{JobListing, RankedJob};
    use chrono::Utc;

    fn metadata() -> ReportMetadata {
        ReportMetadata {
            generated_at: Utc::now(),
            strategy: "substring".to_string(),
            vocabulary_size: 3,
            version: "0.1.0".to_string(),
        }
    }

    fn match_report() -> Report {
        Report::Match(MatchReport {
            candidate_skills: vec!["javascript".to_string(), "react".to_string()],
            job_requirements: vec!["javascript".to_string(), "python".to_string()],
            result: MatchResult {
                percentage: 50,
                matched: vec!["javascript".to_string()],
                missing: vec!["python".to_string()],
                exact_count: 1,
                partial_count: 0,
            },
            metadata: metadata(),
        })
    }

    #[test]
    fn test_console_match_report() {
        let output = ReportGenerator::with_options(false, true)
            .generate_report(&match_report(), &OutputFormat::Console)
            .unwrap();

        assert!(output.contains("50% [Partial match]"));
        assert!(output.contains("Missing requirements (1):\n  • python"));
        assert!(output.contains("strategy: substring"));
    }

    #[test]
    fn test_json_report_is_tagged() {
        let output = JsonFormatter::new(false).format_report(&match_report()).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["kind"], "match");
        assert_eq!(value["result"]["percentage"], 50);
        assert_eq!(value["result"]["missing"][0], "python");
    }

    #[test]
    fn test_console_recommendations() {
        let report = Report::Recommendations(RecommendationReport {
            candidate_skills: vec!["rust".to_string()],
            jobs_considered: 4,
            recommendations: vec![RankedJob {
                job: JobListing {
                    id: "j1".to_string(),
                    title: "Systems Engineer".to_string(),
                    company: Some("Acme".to_string()),
                    requirements: vec!["rust".to_string()],
                },
                match_percentage: 100,
            }],
            metadata: metadata(),
        });

        let output = ConsoleFormatter::new(false).format_report(&report).unwrap();
        assert!(output.contains("Top 1 of 4 jobs"));
        assert!(output.contains("1. Systems Engineer @ Acme (j1) 100% [Strong match]"));
    }

    #[test]
    fn test_generator_dispatches_on_supported_format() {
        let generator = ReportGenerator::with_options(false, false);

        let json = generator.generate_report(&match_report(), &OutputFormat::Json).unwrap();
        assert!(json.starts_with('{'));
        assert!(!json.contains('\n'));

        let console = generator.generate_report(&match_report(), &OutputFormat::Console).unwrap();
        assert!(console.contains("█ SKILL MATCH"));
    }

    #[test]
    fn test_verdict_bands() {
        assert_eq!(verdict(0), "No match");
        assert_eq!(verdict(39), "Weak match");
        assert_eq!(verdict(100), "Strong match");
    }
}
