use colored::*;
use minutes_core::{ActionItem, MeetingAnalysis, Priority, TaskResult};
use minutes_records::StoredRecord;

/// Colored label for an action item's priority
pub fn priority_badge(priority: Priority) -> ColoredString {
    let label = format!("[{}]", priority.as_str().to_uppercase());
    match priority {
        Priority::High => label.red().bold(),
        Priority::Medium => label.yellow().bold(),
        Priority::Low => label.green().bold(),
    }
}

/// One line per action item plus an indented detail line when assignee or due date exist
pub fn format_action_item(item: &ActionItem) -> String {
    let mut line = format!("{} {}", priority_badge(item.priority), item.task);

    let mut details = Vec::new();
    if let Some(assignee) = &item.assignee {
        details.push(format!("担当: {}", assignee));
    }
    if let Some(due_date) = &item.due_date {
        details.push(format!("期限: {}", due_date));
    }
    if !details.is_empty() {
        line.push_str(&format!("\n      {}", details.join("  ").dimmed()));
    }
    line
}

/// Render a full analysis the way the results view lays it out
pub fn format_analysis(analysis: &MeetingAnalysis) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n\n", analysis.title.bold()));

    out.push_str(&format!("{}\n", "要約".cyan().bold()));
    out.push_str(&format!("  \"{}\"\n\n", analysis.summary.italic()));

    out.push_str(&format!("{}\n", "キーポイント".cyan().bold()));
    for (i, point) in analysis.key_points.iter().enumerate() {
        out.push_str(&format!("  {}. {}\n", i + 1, point));
    }
    out.push('\n');

    out.push_str(&format!(
        "{} ({} 件)\n",
        "タスク".cyan().bold(),
        analysis.action_items.len()
    ));
    for item in &analysis.action_items {
        out.push_str(&format!("  - {}\n", format_action_item(item)));
    }
    out
}

pub fn format_task_result(result: &TaskResult) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n  {}\n\n", "要約".cyan().bold(), result.summary));
    out.push_str(&format!("{}\n", "タスク".cyan().bold()));
    for task in &result.tasks {
        out.push_str(&format!("  [ ] {}\n", task));
    }
    out
}

pub fn format_record_list(records: &[StoredRecord]) -> String {
    if records.is_empty() {
        return format!("{}\n", "No saved records.".dimmed());
    }
    let mut out = String::new();
    for (i, record) in records.iter().enumerate() {
        out.push_str(&format!(
            "{:>3}  {}  {} ({} tasks)\n",
            i,
            record.saved_at.dimmed(),
            record.analysis.title.bold(),
            record.analysis.action_items.len()
        ));
    }
    out
}

pub fn print_error(message: &str) {
    eprintln!("{} {}", "Error:".red().bold(), message);
}

#[cfg(test)]
mod tests {
    use super::*;
    use minutes_core::demo_analysis;

    fn plain<T>(f: impl FnOnce() -> T) -> T {
        colored::control::set_override(false);
        f()
    }

    #[test]
    fn analysis_lists_points_in_order_with_count() {
        let text = plain(|| format_analysis(&demo_analysis()));
        assert!(text.starts_with("デモ会議タイトル"));
        assert!(text.contains(
            "  1. ダミーキーポイント1\n  2. ダミーキーポイント2\n  3. ダミーキーポイント3"
        ));
        assert!(text.contains("タスク (3 件)"));
        assert!(text.contains("[HIGH] ダミータスク1"));
        assert!(text.contains("[LOW] ダミータスク3"));
    }

    #[test]
    fn action_item_details_only_when_present() {
        let mut item = ActionItem::new("Book the room", Priority::Medium);
        let bare = plain(|| format_action_item(&item));
        assert_eq!(bare, "[MEDIUM] Book the room");

        item.assignee = Some("Sora".to_string());
        item.due_date = Some("Monday".to_string());
        let detailed = plain(|| format_action_item(&item));
        assert!(detailed.contains("担当: Sora"));
        assert!(detailed.contains("期限: Monday"));
    }

    #[test]
    fn empty_record_list_says_so() {
        let text = plain(|| format_record_list(&[]));
        assert_eq!(text, "No saved records.\n");
    }

    #[test]
    fn task_result_renders_checkboxes() {
        let result = TaskResult {
            summary: "要約".to_string(),
            tasks: vec!["a".to_string(), "b".to_string()],
        };
        let text = plain(|| format_task_result(&result));
        assert!(text.contains("  [ ] a\n  [ ] b\n"));
    }
}
