//! Plan tab: post outline and one card per task
//!
//! Produces lines rather than a widget so the result pane can wrap and
//! scroll every tab the same way.

use blogsmith_core::{sanitize_inline, GenerationResult, Plan, Task};
use ratatui::{
    style::{Color, Modifier, Style},
    text::{Line, Span},
};

use crate::theme::{palette, styles};

/// Title shown when the result carries no plan
pub const NO_PLAN_TITLE: &str = "Loaded from file";

/// Replaces the task list when the result carries no plan
pub const NO_PLAN_MESSAGE: &str = "No plan available for this blog.";

/// Lines of the plan tab for `result`
pub fn plan_lines(result: &GenerationResult) -> Vec<Line<'static>> {
    match &result.plan {
        Some(plan) => with_plan(plan, &result.mode),
        None => vec![
            Line::styled(NO_PLAN_TITLE, title_style()),
            Line::default(),
            Line::styled(NO_PLAN_MESSAGE, styles::text_muted()),
        ],
    }
}

fn title_style() -> Style {
    styles::accent_bold().add_modifier(Modifier::UNDERLINED)
}

fn with_plan(plan: &Plan, mode: &str) -> Vec<Line<'static>> {
    let mut lines = vec![
        Line::styled(sanitize_inline(&plan.blog_title), title_style()),
        Line::default(),
    ];

    lines.push(field_row(&[
        ("Audience", plan.audience.as_str()),
        ("Tone", plan.tone.as_str()),
    ]));
    let mut kind_row = vec![("Kind", plan.blog_kind.as_str())];
    if !mode.is_empty() {
        kind_row.push(("Mode", mode));
    }
    lines.push(field_row(&kind_row));

    if !plan.tasks.is_empty() {
        lines.push(Line::styled(
            format!(
                "{} sections · ~{} words",
                plan.tasks.len(),
                plan.total_target_words()
            ),
            styles::text_secondary(),
        ));
    }

    if !plan.constraints.is_empty() {
        lines.push(Line::default());
        lines.push(Line::styled("Constraints", styles::text_bright_bold()));
        for constraint in &plan.constraints {
            lines.push(bullet(constraint, 1));
        }
    }

    for task in &plan.tasks {
        lines.push(Line::default());
        lines.extend(task_card(task));
    }

    lines
}

/// `Label: value   Label: value`
fn field_row(fields: &[(&str, &str)]) -> Line<'static> {
    let mut spans = Vec::new();
    for (i, (label, value)) in fields.iter().enumerate() {
        if i > 0 {
            spans.push(Span::raw("   "));
        }
        spans.push(Span::styled(format!("{}: ", label), styles::text_muted()));
        spans.push(Span::styled(sanitize_inline(value), styles::text_primary()));
    }
    Line::from(spans)
}

fn bullet(text: &str, depth: usize) -> Line<'static> {
    Line::from(vec![
        Span::styled(format!("{}• ", "  ".repeat(depth)), styles::accent()),
        Span::styled(sanitize_inline(text), styles::text_primary()),
    ])
}

fn badge(text: String, color: Color) -> [Span<'static>; 2] {
    [
        Span::raw(" "),
        Span::styled(format!(" {} ", text), styles::badge(color)),
    ]
}

fn task_card(task: &Task) -> Vec<Line<'static>> {
    let mut header = vec![
        Span::styled(format!("#{} ", task.id), styles::keybinding()),
        Span::styled(sanitize_inline(&task.title), styles::text_bright_bold()),
    ];
    header.extend(badge(format!("~{} words", task.target_words), palette::STATUS_BLUE));
    if task.requires_research {
        header.extend(badge("research".to_string(), palette::STATUS_GREEN));
    }
    if task.requires_citations {
        header.extend(badge("citations".to_string(), palette::STATUS_YELLOW));
    }
    if task.requires_code {
        header.extend(badge("code".to_string(), palette::STATUS_INDIGO));
    }
    for tag in &task.tags {
        header.push(Span::raw(" "));
        header.push(Span::styled(
            format!("#{}", sanitize_inline(tag)),
            styles::text_muted(),
        ));
    }

    let mut lines = vec![Line::from(header)];
    if !task.goal.is_empty() {
        lines.push(Line::from(vec![
            Span::raw("  "),
            Span::styled(
                sanitize_inline(&task.goal),
                styles::text_secondary().add_modifier(Modifier::ITALIC),
            ),
        ]));
    }
    lines.extend(task.bullets.iter().map(|b| bullet(b, 1)));
    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use blogsmith_client::test_utils::{sample_generation_result, sample_task};

    fn text(lines: &[Line]) -> String {
        lines
            .iter()
            .map(|l| l.spans.iter().map(|s| s.content.as_ref()).collect::<String>())
            .collect::<Vec<_>>()
            .join("\n")
    }

    #[test]
    fn test_plan_header_fields() {
        let result = sample_generation_result("Async Rust", 0);
        let out = text(&plan_lines(&result));

        assert!(out.starts_with("Async Rust"));
        assert!(out.contains("Audience: Rust developers"));
        assert!(out.contains("Tone: practical"));
        assert!(out.contains("Kind: explainer"));
        assert!(out.contains("Mode: hybrid"));
        assert!(out.contains("• Keep examples short"));
    }

    #[test]
    fn test_one_card_per_task_in_order() {
        let result = sample_generation_result("T", 0);
        let out = text(&plan_lines(&result));

        let first = out.find("#1 Section 1").expect("task 1");
        let second = out.find("#2 Section 2").expect("task 2");
        let third = out.find("#3 Section 3").expect("task 3");
        assert!(first < second && second < third);
        assert!(out.contains("3 sections · ~750 words"));
    }

    #[test]
    fn test_badges_follow_flags() {
        let mut task = sample_task(1, "Intro");
        task.requires_research = true;
        task.requires_citations = false;
        task.requires_code = true;
        let card = text(&task_card(&task));

        assert!(card.contains("~250 words"));
        assert!(card.contains(" research "));
        assert!(!card.contains("citations"));
        assert!(card.contains(" code "));
        assert!(card.contains("#core"));
    }

    #[test]
    fn test_goal_and_bullets() {
        let card = text(&task_card(&sample_task(2, "Setup")));

        assert!(card.contains("Explain setup"));
        assert!(card.contains("• Setup basics"));
        assert!(card.contains("• Setup pitfalls"));
    }

    #[test]
    fn test_missing_plan_placeholder() {
        let result = GenerationResult::from_saved_blog("no heading here");
        let out = text(&plan_lines(&result));

        assert!(out.contains(NO_PLAN_TITLE));
        assert!(out.contains(NO_PLAN_MESSAGE));
    }

    #[test]
    fn test_loaded_plan_shows_title_without_tasks() {
        let result = GenerationResult::from_saved_blog("# Saved Post\n\nBody");
        let out = text(&plan_lines(&result));

        assert!(out.starts_with("Saved Post"));
        assert!(out.contains("Audience: N/A"));
        assert!(out.contains("Kind: loaded"));
        assert!(!out.contains("Mode:"));
        assert!(!out.contains("sections"));
    }

    #[test]
    fn test_plan_text_is_sanitized() {
        let mut result = sample_generation_result("Title\x1b[31m red", 0);
        if let Some(plan) = result.plan.as_mut() {
            plan.tasks[0].title = "Evil\x07 task".to_string();
        }
        let lines = plan_lines(&result);

        for line in &lines {
            for span in &line.spans {
                assert!(!blogsmith_core::contains_control_sequences(&span.content));
            }
        }
        assert!(text(&lines).contains("Evil task"));
    }
}
