//! List command implementation

use anyhow::Result;
use serde::Serialize;

use lessons::config::Config;
use lessons::{CompletionStore, Item, MemoryStore, UnlockEngine};

use super::open_session;

#[derive(Serialize)]
struct CategoryEntry {
    id: String,
    title: String,
    complete: bool,
    new: bool,
    lessons: Vec<LessonEntry>,
}

#[derive(Serialize)]
struct LessonEntry {
    id: String,
    title: String,
    done: bool,
    new: bool,
    highlighted: bool,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    children: Vec<LessonEntry>,
}

/// Show unlocked categories with their visible lessons
pub fn list_command(config: &Config, json: bool) -> Result<()> {
    let Some(session) = open_session(config)? else {
        return Ok(());
    };
    let engine = session.engine();
    let progress = session.progress();

    let entries: Vec<CategoryEntry> = engine
        .visible_categories(progress)
        .into_iter()
        .map(|category| CategoryEntry {
            id: category.id.clone(),
            title: category.title.clone(),
            complete: engine.is_category_complete(category, progress),
            new: engine.category_needs_attention(category, progress),
            lessons: engine
                .visible_items(category, progress)
                .into_iter()
                .map(|item| lesson_entry(engine, progress, item))
                .collect(),
        })
        .collect();

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if engine.needs_attention(progress) {
        println!("(!) New lessons are waiting.\n");
    }

    for category in &entries {
        let marker = if category.complete {
            " (x)"
        } else if category.new {
            " (!)"
        } else {
            ""
        };
        println!("{}{}", category.title, marker);
        for lesson in &category.lessons {
            print_lesson(lesson, 1);
        }
        println!();
    }

    Ok(())
}

fn lesson_entry(engine: &UnlockEngine, progress: &MemoryStore, item: &Item) -> LessonEntry {
    LessonEntry {
        id: item.id.clone(),
        title: item.title.clone(),
        done: progress.is_done(&item.id),
        new: !progress.is_seen(&item.id),
        highlighted: item.highlighted,
        children: engine
            .visible_children(item, progress)
            .into_iter()
            .map(|child| lesson_entry(engine, progress, child))
            .collect(),
    }
}

fn print_lesson(lesson: &LessonEntry, depth: usize) {
    let status = if lesson.done {
        "(x)"
    } else if lesson.new {
        "(!)"
    } else {
        "( )"
    };
    let highlight = if lesson.highlighted { " *" } else { "" };
    println!(
        "{}{} {}{}  [{}]",
        "  ".repeat(depth),
        status,
        lesson.title,
        highlight,
        lesson.id
    );
    for child in &lesson.children {
        print_lesson(child, depth + 1);
    }
}
