use anyhow::{Result, bail};
use tracing::{debug, info};

use syllabus_cli::summary::{
    bookmarks_table, categories_table, progress_line, topic_detail, topics_table,
};
use syllabus_cli::workspace::Workspace;

use crate::cli::{FilterArgs, NoteArgs, SelectArgs};

pub fn run_categories(workspace: &Workspace, width: u16) -> Result<()> {
    println!("{}", categories_table(workspace.session(), width));
    Ok(())
}

/// List the filtered topics. Filters given here apply to this listing only.
pub fn run_topics(workspace: &mut Workspace, args: &FilterArgs, width: u16) -> Result<()> {
    apply_filters(workspace, args)?;
    let session = workspace.session();
    let selection = session.selection();
    let category = session.catalog().category(&selection.category);
    let topics = session.filtered_topics();

    let mut heading = format!("{} · {}", category.title, selection.difficulty);
    if selection.has_query() {
        heading.push_str(&format!(" · \"{}\"", selection.query.trim()));
    }
    println!("{heading}");
    if topics.is_empty() {
        println!("No topics match.");
    } else {
        println!("{}", topics_table(&topics, session.store(), width));
    }
    println!("{}", progress_line(&session.progress()));
    Ok(())
}

pub fn run_show(workspace: &Workspace, key: &str) -> Result<()> {
    let topic = workspace.require_topic(key)?;
    let session = workspace.session();
    let category = session.catalog().category_of(key);
    print!("{}", topic_detail(topic, category, session.store()));
    Ok(())
}

pub fn run_progress(workspace: &Workspace) -> Result<()> {
    let session = workspace.session();
    let counts = session.counts();
    println!("{}", progress_line(&session.progress()));
    println!("Bookmarked: {}", counts.bookmarked);
    Ok(())
}

pub fn run_complete(workspace: &mut Workspace, key: &str) -> Result<()> {
    workspace.require_topic(key)?;
    let completed = workspace.session_mut().toggle_completed(key);
    workspace.save()?;
    let state = if completed { "completed" } else { "reopened" };
    println!("{key}: {state}");
    println!("{}", progress_line(&workspace.session().progress()));
    Ok(())
}

pub fn run_bookmark(workspace: &mut Workspace, key: &str) -> Result<()> {
    workspace.require_topic(key)?;
    let bookmarked = workspace.session_mut().toggle_bookmark(key);
    workspace.save()?;
    let state = if bookmarked { "bookmarked" } else { "bookmark removed" };
    println!("{key}: {state}");
    Ok(())
}

pub fn run_expand(workspace: &mut Workspace, key: &str) -> Result<()> {
    workspace.require_topic(key)?;
    let expanded = workspace.session_mut().toggle_expanded(key);
    workspace.save()?;
    let state = if expanded { "expanded" } else { "collapsed" };
    println!("{key}: {state}");
    Ok(())
}

pub fn run_note(workspace: &mut Workspace, args: &NoteArgs) -> Result<()> {
    let key = args.key.as_str();
    workspace.require_topic(key)?;
    if args.delete {
        if workspace.session_mut().delete_note(key) {
            workspace.save()?;
            println!("{key}: note deleted");
        } else {
            println!("{key}: no note");
        }
        return Ok(());
    }
    match &args.text {
        Some(text) => {
            workspace.session_mut().save_note(key, text.as_str());
            workspace.save()?;
            println!("{key}: note saved");
        }
        None => match workspace.session().store().note(key) {
            Some(note) => println!("{note}"),
            None => println!("{key}: no note"),
        },
    }
    Ok(())
}

pub fn run_bookmarks(workspace: &Workspace, width: u16) -> Result<()> {
    if workspace.session().counts().bookmarked == 0 {
        println!("No bookmarks.");
        return Ok(());
    }
    println!("{}", bookmarks_table(workspace.session(), width));
    Ok(())
}

/// Apply and save selection changes.
pub fn run_select(workspace: &mut Workspace, args: &SelectArgs) -> Result<()> {
    apply_filters(workspace, &args.filters)?;
    if args.clear_search {
        workspace.session_mut().clear_search_query();
    }
    workspace.save()?;
    let selection = workspace.session().selection();
    info!(
        category = %selection.category,
        difficulty = %selection.difficulty,
        "selection saved"
    );
    println!(
        "category: {}  difficulty: {}  search: {}",
        selection.category,
        selection.difficulty,
        if selection.has_query() {
            selection.query.trim()
        } else {
            "-"
        }
    );
    Ok(())
}

fn apply_filters(workspace: &mut Workspace, args: &FilterArgs) -> Result<()> {
    let session = workspace.session_mut();
    if let Some(category) = &args.category
        && !session.set_category(category)
    {
        bail!("unknown category `{category}`");
    }
    if let Some(level) = &args.difficulty
        && !session.set_difficulty_filter(level)
    {
        bail!("unknown difficulty `{level}`");
    }
    if let Some(text) = &args.search {
        session.set_search_query(text);
    }
    debug!(topics = session.filtered_keys().len(), "filters applied");
    Ok(())
}
