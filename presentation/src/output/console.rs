//! Console output formatter for relay results

use colored::Colorize;
use relay_domain::{RelayResult, Role};

/// Formats relay results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format the complete result: transcripts, outputs, and verdict
    pub fn format(result: &RelayResult) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Circle Relay Results"));
        output.push('\n');

        output.push_str(&format!(
            "{} {}\n",
            "Prompt:".cyan().bold(),
            result.prompt
        ));
        output.push_str(&format!("{} {}\n\n", "Rounds:".cyan().bold(), result.rounds));

        for circle in &result.circles {
            output.push_str(&Self::section_header(&circle.name));

            for message in &circle.messages {
                if message.is_turn_notice() {
                    continue;
                }
                let speaker = message.agent_name.as_deref().unwrap_or(match message.role {
                    Role::User => "User",
                    Role::System => "System",
                    Role::Assistant => "Agent",
                });
                let line = match message.role {
                    Role::Assistant => format!("{}: {}", speaker.yellow().bold(), message.body),
                    Role::User => format!("{}: {}", speaker.green().bold(), message.body),
                    Role::System => format!("{}", message.body.dimmed()),
                };
                output.push_str(&format!("{line}\n"));
            }

            match (&circle.final_output, &circle.error) {
                (Some(final_output), _) => {
                    output.push_str(&format!(
                        "\n{}\n{}\n",
                        "Final output:".green().bold(),
                        final_output
                    ));
                }
                (None, Some(error)) => {
                    output.push_str(&format!("\n{} {}\n", "Failed:".red().bold(), error));
                }
                (None, None) => {
                    output.push_str(&format!("\n{}\n", "No output.".dimmed()));
                }
            }
            output.push('\n');
        }

        output.push_str(&Self::section_header("Verdict"));
        match &result.verdict {
            Some(verdict) => {
                output.push_str(&format!(
                    "\n{}\n\n{}\n",
                    format!("Judge: {} ({})", verdict.judge, verdict.model)
                        .yellow()
                        .bold(),
                    verdict.text
                ));
            }
            None => {
                output.push_str(&format!("\n{}\n", "Judging was skipped.".dimmed()));
            }
        }

        output.push_str(&Self::footer());
        output
    }

    /// Format only the verdict (concise output)
    pub fn format_verdict_only(result: &RelayResult) -> String {
        let mut output = String::new();
        output.push_str(&format!("{}\n\n", "=== Verdict ===".cyan().bold()));
        match &result.verdict {
            Some(verdict) => {
                output.push_str(&format!("{} {}\n\n", "Judge:".bold(), verdict.judge));
                output.push_str(&verdict.text);
                output.push('\n');
            }
            None => {
                let completed = result.completed_circles().count();
                let failed = result.failed_circles().count();
                output.push_str(&format!(
                    "Judging was skipped ({completed} circles completed, {failed} failed).\n"
                ));
            }
        }
        output
    }

    /// Format as JSON
    pub fn format_json(result: &RelayResult) -> String {
        serde_json::to_string_pretty(result).unwrap_or_else(|_| "{}".to_string())
    }

    fn header(title: &str) -> String {
        format!(
            "{}\n{}\n{}\n",
            "=".repeat(60).cyan(),
            format!("  {title}").cyan().bold(),
            "=".repeat(60).cyan()
        )
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n", format!("--- {title} ---").cyan().bold())
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use relay_domain::{AgentConfig, AgentId, Circle, Message, Provider, Verdict};

    fn sample_result() -> RelayResult {
        let mut circle = Circle::new(
            "c1",
            "Story Circle",
            vec![AgentConfig::new(
                "a1",
                "Writer",
                "You write.",
                "gpt-4o",
                Provider::OpenAi,
            )],
        );
        circle.reset_for_run(1);
        circle.push_message(Message::user("msg-c1-0", "Write something."));
        circle.push_message(
            Message::assistant("msg-c1-1", "Writer", AgentId::new("a1"), "A story.")
                .with_round(1)
                .with_source("gpt-4o", Provider::OpenAi),
        );
        circle.record_final_output("A story.");

        RelayResult {
            prompt: "Write something.".to_string(),
            rounds: 1,
            circles: vec![circle],
            verdict: Some(Verdict::new(
                "The Judge",
                "gpt-4o",
                Provider::OpenAi,
                "Story Circle wins.",
            )),
        }
    }

    #[test]
    fn test_full_format_mentions_circles_and_verdict() {
        colored::control::set_override(false);
        let output = ConsoleFormatter::format(&sample_result());
        assert!(output.contains("Story Circle"));
        assert!(output.contains("A story."));
        assert!(output.contains("Story Circle wins."));
        assert!(output.contains("Writer"));
    }

    #[test]
    fn test_verdict_only_format() {
        colored::control::set_override(false);
        let output = ConsoleFormatter::format_verdict_only(&sample_result());
        assert!(output.contains("Story Circle wins."));
        assert!(!output.contains("Write something."));
    }

    #[test]
    fn test_skipped_verdict_is_reported() {
        colored::control::set_override(false);
        let mut result = sample_result();
        result.verdict = None;
        let output = ConsoleFormatter::format_verdict_only(&result);
        assert!(output.contains("skipped"));
        assert!(output.contains("1 circles completed"));
    }

    #[test]
    fn test_json_format_roundtrips() {
        let output = ConsoleFormatter::format_json(&sample_result());
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();
        assert_eq!(value["prompt"], "Write something.");
        assert_eq!(value["circles"][0]["name"], "Story Circle");
    }
}
