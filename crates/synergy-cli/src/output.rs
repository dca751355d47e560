//! Terminal output formatting.

use colored::{ColoredString, Colorize};
use synergy_core::analytics::model::{AnalyticsReport, DistributionEntry};
use synergy_core::common::Priority;
use synergy_core::dashboard::DashboardStats;
use synergy_core::discussion::model::Discussion;
use synergy_core::notification::{self, model::Notification};
use synergy_core::project::model::{Project, ProjectStatus, ProjectSummary};
use synergy_core::swot::{SwotReport, EMPTY_CATEGORY};
use synergy_core::task::{self, model::{Task, TaskStatus}};
use synergy_core::user::model::{User, UserStats};
use synergy_core::Workspace;
use chrono::NaiveDate;
use unicode_width::UnicodeWidthStr;

/// Get terminal width, defaulting to 80.
fn term_width() -> usize {
    terminal_size::terminal_size()
        .map(|(w, _)| w.0 as usize)
        .unwrap_or(80)
}

/// Pad a plain string to a given visual width (right-padded).
fn pad_right(s: &str, width: usize) -> String {
    let visual = UnicodeWidthStr::width(s);
    if visual >= width {
        s.to_string()
    } else {
        format!("{}{}", s, " ".repeat(width - visual))
    }
}

/// Truncate a string respecting visual width.
pub fn truncate_visual(s: &str, max_width: usize) -> String {
    if UnicodeWidthStr::width(s) <= max_width {
        return s.to_string();
    }
    if max_width <= 3 {
        return ".".repeat(max_width);
    }
    let mut result = String::new();
    let mut current_width = 0;
    for ch in s.chars() {
        let ch_width = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if current_width + ch_width > max_width - 2 {
            break;
        }
        result.push(ch);
        current_width += ch_width;
    }
    result.push_str("..");
    result
}

/// Shorten ids for tables. Seed ids are already short.
fn short_id(id: &str) -> &str {
    match id.char_indices().nth(8) {
        Some((cut, _)) => &id[..cut],
        None => id,
    }
}

fn status_colored(status: TaskStatus) -> ColoredString {
    match status {
        TaskStatus::Todo => "todo".normal(),
        TaskStatus::InProgress => "in-progress".yellow(),
        TaskStatus::Done => "done".green(),
    }
}

fn priority_colored(priority: Priority) -> ColoredString {
    match priority {
        Priority::High => "high".red(),
        Priority::Medium => "medium".yellow(),
        Priority::Low => "low".green(),
    }
}

fn project_status_colored(status: ProjectStatus) -> ColoredString {
    match status {
        ProjectStatus::Active => "active".green(),
        ProjectStatus::Completed => "completed".blue(),
        ProjectStatus::Paused => "paused".yellow(),
    }
}

/// Text bar for a 0-100 value.
fn progress_bar(percent: f64, width: usize) -> String {
    let filled = ((percent.clamp(0.0, 100.0) / 100.0) * width as f64).round() as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(width - filled))
}

// ------------------------------------------------------------------
// Dashboard
// ------------------------------------------------------------------

pub fn print_dashboard(user: &User, stats: &DashboardStats, workspace: &Workspace) {
    println!(
        "{} {}",
        "Dashboard".cyan().bold(),
        format!("· {} ({})", user.name, user.role.as_str()).dimmed()
    );
    println!();
    println!(
        "  {:<18} {}  ({} done, {} in progress, {} to do)",
        "Tasks".bold(),
        stats.total_tasks,
        stats.completed_tasks.to_string().green(),
        stats.in_progress_tasks.to_string().yellow(),
        stats.todo_tasks
    );
    println!(
        "  {:<18} {}",
        "Overdue".bold(),
        if stats.overdue_tasks > 0 {
            stats.overdue_tasks.to_string().red().bold()
        } else {
            "0".normal()
        }
    );
    println!(
        "  {:<18} {}  (avg progress {:.0}%)",
        "Active projects".bold(),
        stats.active_projects,
        stats.average_progress
    );
    if let Some(team) = &stats.team {
        println!(
            "  {:<18} {}  ({} admin(s))",
            "Team members".bold(),
            team.active_members,
            team.admins
        );
    }

    println!();
    println!("{}", "Recent Tasks".bold());
    if stats.recent_tasks.is_empty() {
        println!("  {}", "No recent tasks".dimmed());
    }
    for t in &stats.recent_tasks {
        let assignee = workspace
            .user(&t.assignee_id)
            .map(|u| u.name.as_str())
            .unwrap_or("Unassigned");
        println!(
            "  {} {} {}",
            pad_right(&truncate_visual(&t.title, 36), 36),
            status_colored(t.status),
            assignee.dimmed()
        );
    }

    println!();
    println!("{}", "Upcoming Deadlines".bold());
    if stats.upcoming_deadlines.is_empty() {
        println!("  {}", "No upcoming deadlines".dimmed());
    }
    for d in &stats.upcoming_deadlines {
        let label = match d.due {
            task::model::DueState::Overdue(_) => d.label.red(),
            task::model::DueState::DueToday | task::model::DueState::DueTomorrow => d.label.yellow(),
            task::model::DueState::DaysLeft(_) => d.label.normal(),
        };
        println!(
            "  {} {} {}",
            pad_right(&truncate_visual(&d.task.title, 36), 36),
            d.task.due_date.format("%Y-%m-%d").to_string().dimmed(),
            label
        );
    }
}

// ------------------------------------------------------------------
// Projects and tasks
// ------------------------------------------------------------------

pub fn print_projects_table(projects: &[(&Project, ProjectSummary)]) {
    if projects.is_empty() {
        println!("{}", "No projects found.".dimmed());
        return;
    }

    let title_w = term_width().saturating_sub(50).clamp(16, 40);
    println!(
        "{:<10} {} {:<10} {:<8} {:<9} {}",
        "ID",
        pad_right("Name", title_w),
        "Status",
        "Priority",
        "Progress",
        "Tasks"
    );
    println!("{}", "─".repeat(title_w + 50));

    for (project, summary) in projects {
        println!(
            "{:<10} {} {:<10} {:<8} {:>3}% {} {}/{}",
            short_id(&project.id),
            pad_right(&truncate_visual(&project.name, title_w), title_w),
            project_status_colored(project.status),
            priority_colored(project.priority),
            project.progress,
            progress_bar(f64::from(project.progress), 4).cyan(),
            summary.completed_tasks,
            summary.total_tasks
        );
    }

    println!();
    println!("{} project(s)", projects.len());
}

pub fn print_tasks_table(tasks: &[&Task], today: NaiveDate) {
    if tasks.is_empty() {
        println!("{}", "No tasks found.".dimmed());
        return;
    }

    let title_w = term_width().saturating_sub(52).clamp(16, 40);
    println!(
        "{:<10} {} {:<12} {:<8} {}",
        "ID",
        pad_right("Title", title_w),
        "Status",
        "Priority",
        "Due"
    );
    println!("{}", "─".repeat(title_w + 52));

    for t in tasks {
        let due = task::due_label(t, today);
        let due = if task::is_overdue(t, today) {
            due.red()
        } else {
            due.dimmed()
        };
        println!(
            "{:<10} {} {:<12} {:<8} {}",
            short_id(&t.id),
            pad_right(&truncate_visual(&t.title, title_w), title_w),
            status_colored(t.status),
            priority_colored(t.priority),
            due
        );
    }

    println!();
    println!("{} task(s) total", tasks.len());
}

// ------------------------------------------------------------------
// Users
// ------------------------------------------------------------------

pub fn print_users_table(users: &[&User]) {
    if users.is_empty() {
        println!("{}", "No users found.".dimmed());
        return;
    }

    println!(
        "{:<10} {:<20} {:<34} {:<9} {}",
        "ID", "Name", "Email", "Role", "Status"
    );
    println!("{}", "─".repeat(84));
    for u in users {
        let status = if u.banned { "banned".red() } else { "active".green() };
        println!(
            "{:<10} {} {} {:<9} {}",
            short_id(&u.id),
            pad_right(&truncate_visual(&u.name, 20), 20),
            pad_right(&truncate_visual(&u.email, 34), 34),
            u.role.as_str(),
            status
        );
    }
}

pub fn print_user(user: &User, stats: &UserStats) {
    println!("{} {}", user.name.cyan().bold(), format!("({})", user.id).dimmed());
    println!("{} · {}", user.title, user.department.dimmed());
    println!();
    println!("{}: {}", "Email".bold(), user.email);
    println!("{}: {}", "Phone".bold(), user.phone);
    println!("{}: {}", "Location".bold(), user.location);
    println!("{}: {}", "Role".bold(), user.role.as_str());
    println!("{}: {}", "Joined".bold(), user.join_date.format("%B %-d, %Y"));
    if user.banned {
        println!("{}", "Banned".red().bold());
    }
    if !user.about.is_empty() {
        println!();
        println!("{}", user.about);
    }
    if !user.skills.is_empty() {
        println!();
        println!("{}: {}", "Skills".bold(), user.skills.join(", "));
    }

    println!();
    println!("{}", "Tasks".bold());
    println!(
        "  {} total · {} done · {} in progress · {} overdue · {:.0}% complete",
        stats.total_tasks,
        stats.completed_tasks.to_string().green(),
        stats.in_progress_tasks.to_string().yellow(),
        stats.overdue_tasks.to_string().red(),
        stats.completion_rate
    );
    println!("  {} active project(s)", stats.active_projects);

    let perf = &user.performance;
    println!();
    println!("{}", "Performance".bold());
    println!(
        "  {}% success · {:.1} days avg completion",
        perf.success_rate, perf.average_completion_time
    );
}

// ------------------------------------------------------------------
// Notifications and discussions
// ------------------------------------------------------------------

pub fn print_notifications(notifications: &[&Notification], unread: usize) {
    println!("{} {}", "Notifications".bold(), format!("({} unread)", unread).dimmed());
    println!();
    if notifications.is_empty() {
        println!("{}", "No notifications.".dimmed());
        return;
    }

    let now = chrono::Utc::now();
    for n in notifications {
        let marker = if n.read { "  ".normal() } else { "● ".blue() };
        println!(
            "{}{} {} {}",
            marker,
            n.title.bold(),
            format!("[{}]", n.kind.as_str()).dimmed(),
            notification::format_time_ago(n.timestamp, now).dimmed()
        );
        println!("    {}", n.message);
        println!("    {}", short_id(&n.id).dimmed());
    }
}

pub fn print_discussion(thread: &Discussion, workspace: &Workspace, depth: usize) {
    let author = workspace
        .user(&thread.user_id)
        .map(|u| u.name.as_str())
        .unwrap_or("Unknown");
    let indent = "  ".repeat(depth);
    println!(
        "{}{} {} {}",
        indent,
        author.cyan().bold(),
        thread.timestamp.format("%Y-%m-%d %H:%M").to_string().dimmed(),
        format!("({})", short_id(&thread.id)).dimmed()
    );
    println!("{}  {}", indent, thread.message);
    for reply in &thread.replies {
        print_discussion(reply, workspace, depth + 1);
    }
}

// ------------------------------------------------------------------
// Analytics and SWOT
// ------------------------------------------------------------------

fn print_distribution(title: &str, entries: &[DistributionEntry]) {
    println!("{}", title.bold());
    for e in entries {
        println!(
            "  {} {} {:>3} {:>3}%",
            pad_right(&e.label, 12),
            progress_bar(f64::from(e.percentage), 20).cyan(),
            e.count,
            e.percentage
        );
    }
}

pub fn print_analytics(report: &AnalyticsReport) {
    let t = &report.totals;
    println!("{}", "Analytics & KPIs".cyan().bold());
    println!();
    println!("  {:<18} {} ({} active)", "Projects".bold(), t.projects, t.active_projects);
    println!("  {:<18} {} ({} completed)", "Tasks".bold(), t.tasks, t.completed_tasks);
    println!("  {:<18} {} ({} admin(s))", "Team members".bold(), t.active_users, t.admins);
    println!("  {:<18} {}%", "Completion rate".bold(), t.completion_rate);
    println!();

    print_distribution("Task Status", &report.status_distribution);
    println!();
    print_distribution("Task Priority", &report.priority_distribution);
    println!();

    println!("{}", "Team Performance".bold());
    println!(
        "  {} {:>5} {:>5} {:>8} {:>10} {:>7}",
        pad_right("Member", 20),
        "Tasks",
        "Done",
        "Overdue",
        "Complete",
        "Effic."
    );
    for m in &report.team_performance {
        println!(
            "  {} {:>5} {:>5} {:>8} {:>9.0}% {:>6.0}%",
            pad_right(&truncate_visual(&m.user.name, 20), 20),
            m.total_tasks,
            m.completed_tasks,
            m.overdue_tasks,
            m.completion_rate,
            m.efficiency
        );
    }
    println!();

    println!("{}", "Projects".bold());
    for p in &report.projects {
        println!(
            "  {} {} {:>4.0}% · {}/{} tasks · {} overdue · team of {}",
            pad_right(&truncate_visual(&p.project.name, 30), 30),
            project_status_colored(p.project.status),
            p.completion_rate,
            p.completed_tasks,
            p.total_tasks,
            p.overdue_tasks,
            p.team_size
        );
    }
}

pub fn print_swot(report: &SwotReport) {
    println!(
        "{} {}",
        format!("SWOT Analysis · {}", report.name).cyan().bold(),
        format!("({}, {})", report.title, report.department).dimmed()
    );
    for category in &report.categories {
        println!();
        let title = match category.title.as_str() {
            "Strengths" => category.title.green().bold(),
            "Weaknesses" => category.title.red().bold(),
            "Opportunities" => category.title.blue().bold(),
            _ => category.title.yellow().bold(),
        };
        println!("{}", title);
        if category.is_empty() {
            println!("  {}", EMPTY_CATEGORY.dimmed().italic());
        }
        for item in &category.items {
            println!("  • {}", item);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_visual() {
        assert_eq!(truncate_visual("short", 10), "short");
        assert_eq!(truncate_visual("Implement payment gateway", 10), "Implemen..");
        assert_eq!(truncate_visual("abc", 2), "..");
    }

    #[test]
    fn test_progress_bar_bounds() {
        assert_eq!(progress_bar(0.0, 4), "░░░░");
        assert_eq!(progress_bar(100.0, 4), "████");
        assert_eq!(progress_bar(250.0, 4), "████");
    }

    #[test]
    fn test_short_id() {
        assert_eq!(short_id("3"), "3");
        assert_eq!(short_id("0b6f5a1e-8f7c-4b9e-9d3a-2f4c6e8a1b2c"), "0b6f5a1e");
        assert_eq!(short_id("prójéct-ñúmero-uno"), "prójéct-");
    }
}
