use colored::Colorize;

use crate::features::focus::{
    format_duration, render_progress_bar, Configuration, Phase, StatusReport,
};

/// Format timer settings as a labelled block
pub fn format_configuration_pretty(config: &Configuration, title: &str) -> String {
    let mut output = format!("{}\n", title.bold());
    output.push_str(&"─".repeat(40));
    output.push('\n');

    for phase in Phase::ALL {
        output.push_str(&format!(
            "  {:<12} {}\n",
            phase.display_name().dimmed(),
            format_duration(u64::from(phase.duration(config))).cyan()
        ));
    }

    output.push_str(&format!(
        "  {:<12} {}",
        "Cycle".dimmed(),
        format!(
            "{} work session{} before a long break",
            config.sessions_before_long,
            if config.sessions_before_long == 1 { "" } else { "s" }
        )
        .cyan()
    ));

    output
}

/// Format a cycle status report
pub fn format_status_pretty(report: &StatusReport) -> String {
    let cycle = report.configuration.sessions_before_long;
    let mut output = format_configuration_pretty(&report.configuration, "Pomodoro");
    output.push_str("\n\n");

    output.push_str(&format!(
        "  {:<12} {}\n",
        "Completed".dimmed(),
        report.completed_work_sessions.to_string().green().bold()
    ));

    let done = f64::from(report.cycle_position - 1) / f64::from(cycle.max(1));
    output.push_str(&format!(
        "  {:<12} {} session {} of {}\n",
        "Cycle".dimmed(),
        render_progress_bar(done, 20),
        report.cycle_position,
        cycle
    ));

    let next = match report.next_break {
        Phase::LongBreak => report.next_break.display_name().yellow(),
        _ => report.next_break.display_name().normal(),
    };
    output.push_str(&format!("  {:<12} {}", "Next break".dimmed(), next));

    output
}
