//! Console observers for a relay run

use colored::Colorize;
use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use relay_application::ports::observer::{RunObserver, RunTarget};
use relay_domain::{AgentId, CircleId, Message, Role};
use std::collections::HashMap;
use std::sync::Mutex;

/// Reports run progress with one bar per circle
pub struct ProgressReporter {
    multi: MultiProgress,
    bars: Mutex<HashMap<CircleId, ProgressBar>>,
    thinking: ProgressBar,
}

impl ProgressReporter {
    pub fn new() -> Self {
        let multi = MultiProgress::new();
        let thinking = multi.add(ProgressBar::new_spinner());
        thinking.set_style(Self::spinner_style());
        Self {
            multi,
            bars: Mutex::new(HashMap::new()),
            thinking,
        }
    }

    fn bar_style() -> ProgressStyle {
        ProgressStyle::default_bar()
            .template("{spinner:.green} {prefix:.bold.cyan} [{bar:40.cyan/blue}] {pos}/{len}")
            .unwrap()
            .progress_chars("=>-")
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {msg}")
            .unwrap()
    }

    /// Finish all bars; call once the run has settled
    pub fn finish(&self) {
        self.thinking.finish_and_clear();
        if let Ok(bars) = self.bars.lock() {
            for bar in bars.values() {
                bar.finish();
            }
        }
    }
}

impl Default for ProgressReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl RunObserver for ProgressReporter {
    fn on_message_appended(&self, _target: &RunTarget, _message: &Message) {}

    fn on_thinking_changed(&self, agent: Option<&AgentId>) {
        match agent {
            Some(agent) => self.thinking.set_message(format!("{agent} is thinking...")),
            None => self.thinking.set_message(String::new()),
        }
        self.thinking.tick();
    }

    fn on_progress_changed(&self, circle: &CircleId, sent: u32, total: u32) {
        let mut bars = self.bars.lock().unwrap();
        let bar = bars.entry(circle.clone()).or_insert_with(|| {
            let bar = self.multi.add(ProgressBar::new(total as u64));
            bar.set_style(Self::bar_style());
            bar.set_prefix(circle.to_string());
            bar
        });
        bar.set_length(total as u64);
        bar.set_position(sent as u64);
    }
}

/// Streams every message to the console as it is produced
pub struct ConsoleObserver;

impl RunObserver for ConsoleObserver {
    fn on_message_appended(&self, target: &RunTarget, message: &Message) {
        if message.is_turn_notice() {
            return;
        }
        let target_label = match target {
            RunTarget::Circle(id) => id.to_string(),
            RunTarget::Judge => "judge".to_string(),
        };
        let speaker = message.agent_name.as_deref().unwrap_or(match message.role {
            Role::User => "User",
            Role::System => "System",
            Role::Assistant => "Agent",
        });
        match message.role {
            Role::Assistant => println!(
                "[{}] {}: {}",
                target_label.cyan(),
                speaker.yellow().bold(),
                message.body
            ),
            Role::User => println!(
                "[{}] {}: {}",
                target_label.cyan(),
                speaker.green().bold(),
                message.body
            ),
            Role::System => println!("[{}] {}", target_label.cyan(), message.body.dimmed()),
        }
    }

    fn on_thinking_changed(&self, _agent: Option<&AgentId>) {}

    fn on_progress_changed(&self, circle: &CircleId, sent: u32, total: u32) {
        println!("[{}] {}", circle.to_string().cyan(), format!("{sent}/{total}").dimmed());
    }
}
