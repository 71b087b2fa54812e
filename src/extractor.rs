use rayon::prelude::*;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::Level;

use crate::documentation::{Insertion, SearchableDocumentation};
use crate::error::ExtractError;
use crate::javadoc::JavaDocData;
use crate::logging::Log;
use crate::scanner::{self, ScanOutcome};

/// Collects Java source files and turns them into a [`SearchableDocumentation`].
pub struct JavaDocExtractor<'a> {
    log: &'a dyn Log,
    sources: BTreeSet<PathBuf>,
}

impl<'a> JavaDocExtractor<'a> {
    pub fn new(log: &'a dyn Log) -> Self {
        Self {
            log,
            sources: BTreeSet::new(),
        }
    }

    /// Adds files to the working set. Duplicates are dropped.
    pub fn add_source_files<I, P>(&mut self, files: I) -> &mut Self
    where
        I: IntoIterator<Item = P>,
        P: Into<PathBuf>,
    {
        self.sources.extend(files.into_iter().map(Into::into));
        self
    }

    pub fn source_files(&self) -> impl Iterator<Item = &Path> {
        self.sources.iter().map(PathBuf::as_path)
    }

    /// Scans every added file and builds a fresh index.
    ///
    /// Files are read and scanned in parallel; entries are inserted in one
    /// pass over the files in path order, so the result does not depend on
    /// which scan finishes first.
    pub fn process(&self) -> SearchableDocumentation {
        self.log.info(&format!(
            "Processing [{}] java sources.",
            self.sources.len()
        ));

        let files: Vec<&PathBuf> = self.sources.iter().collect();
        let scanned: Vec<(&PathBuf, Result<ScanOutcome, ExtractError>)> = files
            .par_iter()
            .copied()
            .map(|path| (path, read_source(path).map(|text| scanner::scan(&text))))
            .collect();

        let mut index = SearchableDocumentation::default();
        for (path, result) in scanned {
            match result {
                Ok(outcome) => self.insert_file(&mut index, path, outcome),
                Err(e) => self.log.warn(&format!("Skipping [{}]: {e}", path.display())),
            }
        }
        index
    }

    fn insert_file(&self, index: &mut SearchableDocumentation, path: &Path, outcome: ScanOutcome) {
        for declaration in outcome.declarations {
            let documented = declaration.doc.is_some();
            let javadoc = declaration
                .doc
                .as_deref()
                .map(JavaDocData::parse)
                .unwrap_or_default();
            let label = declaration.location.kind().label();
            let doc_path = declaration.location.path();

            match index.insert(declaration.location, javadoc, documented) {
                Insertion::Added => {
                    if self.log.is_enabled(Level::DEBUG) {
                        self.log
                            .debug(&format!("Added {label}-level JavaDoc for [{doc_path}]"));
                    }
                }
                Insertion::Replaced if label == "package" => {
                    if self.log.is_enabled(Level::DEBUG) {
                        self.log.debug(&format!(
                            "Replaced package-level JavaDoc for [{doc_path}] from [{}]",
                            path.display()
                        ));
                    }
                }
                Insertion::Replaced => self.log.warn(&format!(
                    "Duplicate {label}-level JavaDoc for [{doc_path}] in [{}] (line {}); replacing earlier entry",
                    path.display(),
                    declaration.line
                )),
                Insertion::Ignored => {}
            }
        }

        if let Some(e) = outcome.abandoned {
            self.log.warn(&format!(
                "Stopped scanning [{}]: {e}; keeping declarations found before that point",
                path.display()
            ));
        }
    }
}

/// Reads a UTF-8 source file, dropping a leading byte order mark.
fn read_source(path: &Path) -> Result<String, ExtractError> {
    let bytes = std::fs::read(path).map_err(|source| ExtractError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let text = String::from_utf8(bytes).map_err(|e| ExtractError::Decode {
        path: path.to_path_buf(),
        offset: e.utf8_error().valid_up_to(),
    })?;
    Ok(match text.strip_prefix('\u{feff}') {
        Some(rest) => rest.to_string(),
        None => text,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logging::BufferingLog;
    use std::time::{SystemTime, UNIX_EPOCH};

    fn temp_dir(name: &str) -> PathBuf {
        let nanos = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap()
            .as_nanos();
        let dir = std::env::temp_dir().join(format!(
            "javadoc_index_test_{}_{}_{}",
            std::process::id(),
            nanos,
            name
        ));
        std::fs::create_dir_all(&dir).unwrap();
        dir
    }

    #[test]
    fn no_files_gives_empty_index() {
        let log = BufferingLog::new(Level::DEBUG);
        let result = JavaDocExtractor::new(&log).process();
        assert!(result.is_empty());
        assert_eq!(log.lines(), vec!["000: (INFO) Processing [0] java sources."]);
    }

    #[test]
    fn duplicates_are_deduplicated_and_sorted() {
        let log = BufferingLog::new(Level::DEBUG);
        let mut extractor = JavaDocExtractor::new(&log);
        extractor.add_source_files(["b/B.java", "a/A.java"]);
        extractor.add_source_files([PathBuf::from("a/A.java")]);
        let files: Vec<&Path> = extractor.source_files().collect();
        assert_eq!(files, vec![Path::new("a/A.java"), Path::new("b/B.java")]);
    }

    #[test]
    fn unreadable_and_undecodable_files_are_skipped() {
        let dir = temp_dir("skip");
        let good = dir.join("Good.java");
        std::fs::write(&good, "package p;\nclass Good {}\n").unwrap();
        let bad = dir.join("Bad.java");
        std::fs::write(&bad, [0xff, 0xfe, 0x00]).unwrap();
        let missing = dir.join("Missing.java");

        let log = BufferingLog::new(Level::DEBUG);
        let mut extractor = JavaDocExtractor::new(&log);
        extractor.add_source_files([&good, &bad, &missing]);
        let result = extractor.process();

        assert_eq!(result.paths(), vec!["p", "p.Good"]);
        let records = log.records();
        assert_eq!(records[0].message, "Processing [3] java sources.");
        let warnings: Vec<&str> = records
            .iter()
            .filter(|r| r.level == Level::WARN)
            .map(|r| r.message.as_str())
            .collect();
        assert_eq!(warnings.len(), 2);
        assert!(warnings[0].contains("Bad.java") && warnings[0].contains("UTF-8"));
        assert!(warnings[1].contains("Missing.java"));

        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn package_docs_survive_other_files_of_the_package() {
        let dir = temp_dir("package_info");
        std::fs::write(dir.join("A.java"), "package p;\n/** A. */\nclass A {}\n").unwrap();
        std::fs::write(
            dir.join("package-info.java"),
            "/** The p package. */\npackage p;\n",
        )
        .unwrap();
        std::fs::write(dir.join("Z.java"), "package p;\nclass Z {}\n").unwrap();

        let log = BufferingLog::new(Level::DEBUG);
        let mut extractor = JavaDocExtractor::new(&log);
        extractor.add_source_files([
            dir.join("Z.java"),
            dir.join("package-info.java"),
            dir.join("A.java"),
        ]);
        let result = extractor.process();

        assert_eq!(result.paths(), vec!["p", "p.A", "p.Z"]);
        assert_eq!(result.javadoc("p").unwrap().comment(), "The p package.");

        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn duplicate_method_paths_warn_and_keep_last() {
        let dir = temp_dir("dupes");
        let file = dir.join("A.java");
        std::fs::write(
            &file,
            "package p;\nclass A {\n  /** One. */\n  <T> void m(T t) {}\n  /** Two. */\n  <U> void m(T u) {}\n}\n",
        )
        .unwrap();

        let log = BufferingLog::new(Level::DEBUG);
        let mut extractor = JavaDocExtractor::new(&log);
        extractor.add_source_files([&file]);
        let result = extractor.process();

        assert_eq!(result.paths(), vec!["p", "p.A", "p.A#m(T)"]);
        assert_eq!(result.javadoc("p.A#m(T)").unwrap().comment(), "Two.");
        let last = log.records().pop().unwrap();
        assert_eq!(last.level, Level::WARN);
        assert!(last.message.starts_with("Duplicate method-level JavaDoc for [p.A#m(T)]"));

        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn abandoned_scan_keeps_earlier_entries_and_warns() {
        let dir = temp_dir("abandon");
        let file = dir.join("A.java");
        std::fs::write(&file, "package p;\nclass A {\n  void a() {}\n}\n}\nclass B {}\n").unwrap();

        let log = BufferingLog::new(Level::DEBUG);
        let mut extractor = JavaDocExtractor::new(&log);
        extractor.add_source_files([&file]);
        let result = extractor.process();

        assert_eq!(result.paths(), vec!["p", "p.A", "p.A#a()"]);
        let last = log.records().pop().unwrap();
        assert_eq!(last.level, Level::WARN);
        assert!(last.message.contains("unbalanced closing brace at line 5"));

        let _ = std::fs::remove_dir_all(dir);
    }

    #[test]
    fn byte_order_mark_is_ignored() {
        let dir = temp_dir("bom");
        let file = dir.join("A.java");
        std::fs::write(&file, "\u{feff}package p;\nclass A {}\n").unwrap();

        let log = BufferingLog::new(Level::INFO);
        let mut extractor = JavaDocExtractor::new(&log);
        extractor.add_source_files([&file]);
        assert_eq!(extractor.process().paths(), vec!["p", "p.A"]);

        let _ = std::fs::remove_dir_all(dir);
    }
}
