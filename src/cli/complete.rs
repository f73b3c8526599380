//! Complete command implementation

use anyhow::Result;

use lessons::CompletionStore;
use lessons::config::Config;

use super::open_session;

/// Mark a lesson as done and report what it unlocked
pub fn complete_command(config: &Config, id: &str) -> Result<()> {
    let Some(mut session) = open_session(config)? else {
        return Ok(());
    };

    let title = session.lookup(id)?.title.clone();
    if session.progress().is_done(id) {
        println!("Already completed: {}", title);
        return Ok(());
    }

    let unlocked = session.complete(id)?;
    println!("Completed: {}", title);

    if !unlocked.is_empty() {
        println!("\nUnlocked:");
        for lesson_id in &unlocked {
            let lesson = session.lookup(lesson_id)?;
            println!("  (!) {}  [{}]", lesson.title, lesson.id);
        }
    }

    Ok(())
}
