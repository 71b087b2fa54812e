use anyhow::{Result, bail};
use ignore::WalkBuilder;
use std::path::{Path, PathBuf};
use std::sync::mpsc;

/// All `.java` files below `roots`, sorted and deduplicated.
///
/// A root that is itself a file is taken as is, whatever its extension.
pub fn java_sources(roots: &[PathBuf]) -> Result<Vec<PathBuf>> {
    let mut files = Vec::new();
    for root in roots {
        if root.is_file() {
            files.push(root.clone());
        } else if root.is_dir() {
            files.extend(walk_java_files(root));
        } else {
            bail!("Source path does not exist: {}", root.display());
        }
    }
    files.sort();
    files.dedup();
    Ok(files)
}

fn walk_java_files(base_path: &Path) -> Vec<PathBuf> {
    let (tx, rx) = mpsc::channel();

    let walker = WalkBuilder::new(base_path)
        .hidden(false)
        .git_ignore(false)
        .git_global(false)
        .git_exclude(false)
        .build_parallel();

    walker.run(|| {
        let tx = tx.clone();
        Box::new(move |entry| {
            if let Ok(entry) = entry {
                let path = entry.path();
                if path.is_file() && path.extension().is_some_and(|e| e == "java") {
                    let _ = tx.send(path.to_path_buf());
                }
            }
            ignore::WalkState::Continue
        })
    });

    drop(tx);
    rx.iter().collect()
}
