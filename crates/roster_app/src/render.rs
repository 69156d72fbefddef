use std::fmt::Display;

use roster_core::ListViewModel;

/// Text rendering of a list snapshot: one numbered line per item, then any
/// error, then a status line.
pub fn render<T: Display>(view: &ListViewModel<T>) -> String {
    let mut lines: Vec<String> = view
        .items
        .iter()
        .enumerate()
        .map(|(index, item)| format!("{:>3}. {}", index + 1, item))
        .collect();

    if view.items.is_empty() && !view.loading {
        lines.push("  (no results)".to_string());
    }

    if let Some(error) = &view.error {
        lines.push(format!("! {error}"));
    }

    let search_label = if view.query.is_empty() {
        "all".to_string()
    } else {
        format!("{:?}", view.query)
    };
    let progress_label = if view.loading {
        "Loading..."
    } else if view.has_more {
        "More available (type `more`)"
    } else {
        "End of list"
    };
    lines.push(format!(
        "Search: {} | Items: {} | Page: {} | {}",
        search_label,
        view.items.len(),
        view.page,
        progress_label
    ));

    lines.join("\n")
}
