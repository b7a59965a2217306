//! Plain-text rendering for terminals

use crate::summary::LegSummaryView;
use crate::view::TableSnapshot;
use rust_decimal::Decimal;
use team_hierarchy::VisibleRow;

const COLUMN_GAP: &str = "  ";

/// Status column text
#[inline]
#[must_use]
pub fn status_label(active: bool) -> &'static str {
    if active {
        "Active"
    } else {
        "Inactive"
    }
}

/// Amount with two decimal places
#[must_use]
pub fn format_amount(amount: Decimal) -> String {
    format!("{:.2}", amount.round_dp(2))
}

/// Indented tree, one visible row per line
///
/// `▾` marks an expanded parent, `▸` a collapsed one, `•` a leaf.
#[must_use]
pub fn render_tree(rows: &[VisibleRow<'_>]) -> String {
    rows.iter()
        .map(|row| {
            let marker = match (row.node.has_children(), row.expanded) {
                (false, _) => '•',
                (true, true) => '▾',
                (true, false) => '▸',
            };
            let you = if row.node.is_root { " (you)" } else { "" };
            format!(
                "{indent}{marker} {name}{you} [{status}]",
                indent = COLUMN_GAP.repeat(row.depth as usize),
                name = row.node.display_name(),
                status = status_label(row.node.plan_subscription),
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Member table page with a pager footer
#[must_use]
pub fn render_table(page: &TableSnapshot<'_>) -> String {
    if page.total_rows == 0 {
        return "no members match".to_string();
    }
    let body: Vec<Vec<String>> = page
        .rows
        .iter()
        .map(|row| {
            vec![
                row.level.to_string(),
                row.display_name().to_string(),
                row.node.full_name.clone().unwrap_or_else(|| "-".to_string()),
                status_label(row.node.plan_subscription).to_string(),
                format_amount(row.node.plan_price),
            ]
        })
        .collect();

    let mut out = columns(&["LEVEL", "NAME", "FULL NAME", "STATUS", "PLAN"], &body);
    out.push_str(&format!(
        "\npage {}/{} ({} members)",
        page.page,
        page.total_pages(),
        page.total_rows
    ));
    out
}

/// Leg business table; `*` marks top performers
#[must_use]
pub fn render_legs(legs: &LegSummaryView) -> String {
    if legs.is_empty() {
        return "no leg business in range".to_string();
    }
    let mut body: Vec<Vec<String>> = legs
        .rows()
        .map(|(entry, top)| {
            vec![
                if top { "*" } else { "" }.to_string(),
                entry.display_name().unwrap_or("-").to_string(),
                format_amount(entry.pro_amount),
                format_amount(entry.express_amount),
                format_amount(entry.total_team_business),
                format_amount(entry.self_business),
                format_amount(entry.combined_business()),
            ]
        })
        .collect();

    let totals = legs.totals();
    body.push(vec![
        String::new(),
        format!("TOTAL ({})", totals.members),
        format_amount(totals.pro_amount),
        format_amount(totals.express_amount),
        format_amount(totals.total_team_business),
        format_amount(totals.self_business),
        format_amount(
            totals
                .pro_amount
                .saturating_add(totals.express_amount)
                .saturating_add(totals.total_team_business),
        ),
    ]);

    columns(
        &["", "NAME", "PRO", "EXPRESS", "TEAM", "SELF", "COMBINED"],
        &body,
    )
}

/// Left-aligned columns sized to their widest cell
fn columns(header: &[&str], body: &[Vec<String>]) -> String {
    let mut widths: Vec<usize> = header.iter().map(|h| h.chars().count()).collect();
    for row in body {
        for (width, cell) in widths.iter_mut().zip(row) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let line = |cells: Vec<&str>| {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, &width)| format!("{cell:<width$}"))
            .collect::<Vec<_>>()
            .join(COLUMN_GAP)
            .trim_end()
            .to_string()
    };

    std::iter::once(line(header.to_vec()))
        .chain(body.iter().map(|row| line(row.iter().map(String::as_str).collect())))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::view::TeamView;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;
    use team_client::FetchOutcome;
    use team_hierarchy::{visible_rows, ExpansionState};
    use team_test_utils::{john_jane_tree, sample_viewer, summary};

    #[test]
    fn tree_markers_and_indent() {
        let tree = john_jane_tree();
        let rows = visible_rows(std::slice::from_ref(&tree), &ExpansionState::new());
        assert_eq!(
            render_tree(&rows),
            "▾ me (you) [Active]\n  • john [Active]\n  ▸ jane [Inactive]"
        );
    }

    #[test]
    fn table_has_header_and_pager() {
        let mut view = TeamView::new(sample_viewer(), 2);
        let ticket = view.begin_fetch();
        view.apply_fetch(ticket, Ok(FetchOutcome::Fetched(Arc::new(john_jane_tree()))));

        let text = render_table(&view.table_page());
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].starts_with("LEVEL  NAME"));
        assert!(lines[1].starts_with("0      me"));
        assert!(lines[1].ends_with("1000.00"));
        assert_eq!(lines.last().copied(), Some("page 1/2 (4 members)"));
    }

    #[test]
    fn empty_table_message() {
        let view = TeamView::new(sample_viewer(), 10);
        assert_eq!(render_table(&view.table_page()), "no members match");
    }

    #[test]
    fn legs_mark_and_total() {
        let legs = LegSummaryView::new(vec![summary("a", 5, 5, 0), summary("bob", 1, 0, 0)]);
        let text = render_legs(&legs);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines[1].starts_with("*  a "));
        assert!(lines[2].starts_with("   bob"));
        assert!(lines[3].contains("TOTAL (2)"));
        assert!(lines[3].ends_with("11.00"));
    }

    #[test]
    fn amounts_round_to_cents() {
        assert_eq!(format_amount(Decimal::new(12_346, 3)), "12.35");
        assert_eq!(format_amount(Decimal::ZERO), "0.00");
    }
}
