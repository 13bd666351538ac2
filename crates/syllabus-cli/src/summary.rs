//! Terminal renderings of catalog, topic and progress state.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use syllabus_engine::{InteractionStore, Progress, Session};
use syllabus_model::{Category, Difficulty, Topic};

const BAR_WIDTH: usize = 30;

pub fn categories_table(session: &Session, width: u16) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell(""),
        header_cell("Category"),
        header_cell("Title"),
        header_cell("Topics"),
        header_cell("Done"),
    ]);
    apply_table_style(&mut table, width);
    align_column(&mut table, 3, CellAlignment::Right);
    align_column(&mut table, 4, CellAlignment::Right);
    let active = session.selection().category.as_str();
    let store = session.store();
    for category in session.catalog().categories() {
        let done = completed_in(category, store);
        let marker = if category.key == active { "▸" } else { "" };
        table.add_row(vec![
            Cell::new(marker).fg(Color::Cyan),
            key_cell(&category.key),
            Cell::new(category_label(category)),
            Cell::new(category.len()),
            done_cell(done, category.len()),
        ]);
    }
    table
}

pub fn topics_table(topics: &[&Topic], store: &InteractionStore, width: u16) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Topic"),
        header_cell("Title"),
        header_cell("Difficulty"),
        header_cell("Done"),
        header_cell("★"),
        header_cell("Note"),
    ]);
    apply_table_style(&mut table, width);
    align_column(&mut table, 3, CellAlignment::Center);
    align_column(&mut table, 4, CellAlignment::Center);
    align_column(&mut table, 5, CellAlignment::Center);
    for topic in topics {
        table.add_row(vec![
            key_cell(&topic.key),
            Cell::new(&topic.title),
            difficulty_cell(topic.difficulty),
            flag_cell(store.is_completed(&topic.key), "✓", Color::Green),
            flag_cell(store.is_bookmarked(&topic.key), "★", Color::Yellow),
            flag_cell(store.note(&topic.key).is_some(), "✎", Color::Blue),
        ]);
    }
    table
}

pub fn bookmarks_table(session: &Session, width: u16) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Topic"),
        header_cell("Title"),
        header_cell("Category"),
        header_cell("Done"),
    ]);
    apply_table_style(&mut table, width);
    align_column(&mut table, 3, CellAlignment::Center);
    let catalog = session.catalog();
    let store = session.store();
    for key in store.bookmarked_keys() {
        // Bookmarks of topics the catalog no longer has are kept but dimmed.
        let Some(topic) = catalog.topic(key) else {
            table.add_row(vec![
                dim_cell(key),
                dim_cell("(not in catalog)"),
                dim_cell("-"),
                dim_cell("-"),
            ]);
            continue;
        };
        let category = catalog
            .category_of(key)
            .map_or("-", |category| category.key.as_str());
        table.add_row(vec![
            key_cell(key),
            Cell::new(&topic.title),
            Cell::new(category),
            flag_cell(store.is_completed(key), "✓", Color::Green),
        ]);
    }
    table
}

/// Multi-line detail view of a topic and the user's state for it.
pub fn topic_detail(topic: &Topic, category: Option<&Category>, store: &InteractionStore) -> String {
    let mut out = String::new();
    out.push_str(&format!("{} ({})\n", topic.title, topic.key));
    if let Some(category) = category {
        out.push_str(&format!("Category:   {}\n", category_label(category)));
    }
    out.push_str(&format!("Difficulty: {}\n", topic.difficulty.label()));
    out.push_str(&format!(
        "Status:     {}{}\n",
        if store.is_completed(&topic.key) { "completed" } else { "open" },
        if store.is_bookmarked(&topic.key) { ", bookmarked" } else { "" },
    ));
    if !topic.description.is_empty() {
        out.push('\n');
        out.push_str(&topic.description);
        out.push('\n');
    }
    let expanded = store.is_expanded(&topic.key);
    if !topic.examples.is_empty() {
        out.push_str(&format!("\nExamples ({}):\n", topic.examples.len()));
        for example in &topic.examples {
            out.push_str(&format!("\n  # {}\n", example.title));
            if expanded {
                for line in example.code.lines() {
                    out.push_str(&format!("    {line}\n"));
                }
                if let Some(note) = &example.note {
                    out.push_str(&format!("  note: {note}\n"));
                }
                if let Some(runnable) = &example.runnable {
                    out.push_str(&format!("  run: {runnable}\n"));
                }
            }
        }
        if !expanded {
            out.push_str(&format!(
                "\n  (collapsed; `syllabus expand {}` shows the code)\n",
                topic.key
            ));
        }
    }
    match store.note(&topic.key) {
        Some("") => out.push_str("\nNote: (empty)\n"),
        Some(note) => out.push_str(&format!("\nNote:\n{note}\n")),
        None => {}
    }
    out
}

/// `[#########---------]  12/40  30%`
pub fn progress_line(progress: &Progress) -> String {
    let filled = if progress.total == 0 {
        0
    } else {
        BAR_WIDTH * progress.completed.min(progress.total) / progress.total
    };
    format!(
        "[{}{}]  {}/{}  {}%",
        "#".repeat(filled),
        "-".repeat(BAR_WIDTH - filled),
        progress.completed,
        progress.total,
        progress.percent
    )
}

pub fn apply_table_style(table: &mut Table, width: u16) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(width);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn completed_in(category: &Category, store: &InteractionStore) -> usize {
    category
        .topics
        .iter()
        .filter(|topic| store.is_completed(&topic.key))
        .count()
}

fn category_label(category: &Category) -> String {
    if category.icon.is_empty() {
        category.title.clone()
    } else {
        format!("{} {}", category.icon, category.title)
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn key_cell(key: &str) -> Cell {
    Cell::new(key)
        .fg(Color::Blue)
        .add_attribute(Attribute::Bold)
}

fn difficulty_cell(difficulty: Difficulty) -> Cell {
    let color = match difficulty {
        Difficulty::Beginner => Color::Green,
        Difficulty::Intermediate => Color::Yellow,
        Difficulty::Advanced => Color::Red,
    };
    Cell::new(difficulty.label()).fg(color)
}

fn done_cell(done: usize, total: usize) -> Cell {
    let cell = Cell::new(format!("{done}/{total}"));
    if total > 0 && done == total {
        cell.fg(Color::Green).add_attribute(Attribute::Bold)
    } else {
        cell
    }
}

fn flag_cell(set: bool, symbol: &str, color: Color) -> Cell {
    if set {
        Cell::new(symbol).fg(color)
    } else {
        dim_cell("·")
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
