use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use orion::engine::WalkConfig;
use orion::{
    report, search, Console, Entry, EntryIter, EntryKind, Matcher, OrionError, SearchBuilder,
    SearchSession, Source,
};

// ---------------------------------------------------------------------------
// Test helpers
// ---------------------------------------------------------------------------

/// Create a temporary directory tree for testing.
///
/// Structure:
/// ```text
/// tmp/
///   a.txt
///   b.log
///   sub/
///     a2.txt
/// ```
fn setup_small_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    fs::write(root.join("a.txt"), "a").unwrap();
    fs::write(root.join("b.log"), "b").unwrap();
    fs::create_dir(root.join("sub")).unwrap();
    fs::write(root.join("sub").join("a2.txt"), "a2").unwrap();

    dir
}

/// A wider tree for set-equality checks.
///
/// ```text
/// tmp/
///   invoice_jan.txt
///   invoice_feb.TXT
///   Invoice_summary.md
///   report.txt
///   invoices/            (directory whose name matches "invoice")
///     invoice_mar.txt
///     deep/
///       old_invoice.txt
///       notes.rs
/// ```
fn setup_wide_dir() -> tempfile::TempDir {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();

    fs::write(root.join("invoice_jan.txt"), "").unwrap();
    fs::write(root.join("invoice_feb.TXT"), "").unwrap();
    fs::write(root.join("Invoice_summary.md"), "").unwrap();
    fs::write(root.join("report.txt"), "").unwrap();

    let deep = root.join("invoices").join("deep");
    fs::create_dir_all(&deep).unwrap();
    fs::write(root.join("invoices").join("invoice_mar.txt"), "").unwrap();
    fs::write(deep.join("old_invoice.txt"), "").unwrap();
    fs::write(deep.join("notes.rs"), "").unwrap();

    dir
}

/// Run `builder`, print the report, return the session and everything the
/// console received.
fn run_and_report(builder: SearchBuilder, verbose: bool) -> (SearchSession, String) {
    let console = Console::new(Vec::new(), verbose);
    let session = builder.run(&console).unwrap();
    report(&session, &console).unwrap();
    let out = String::from_utf8(console.into_inner()).unwrap();
    (session, out)
}

fn paths(session: &SearchSession) -> Vec<PathBuf> {
    session.results().into_iter().map(|r| r.path).collect()
}

fn sorted(mut v: Vec<PathBuf>) -> Vec<PathBuf> {
    v.sort();
    v
}

/// Every non-directory below `root` whose base name contains `query`.
fn expected_matches(root: &Path, query: &str) -> Vec<PathBuf> {
    let mut out = Vec::new();
    let mut stack = vec![root.to_path_buf()];
    while let Some(dir) = stack.pop() {
        for entry in fs::read_dir(&dir).unwrap() {
            let entry = entry.unwrap();
            let path = entry.path();
            if entry.file_type().unwrap().is_dir() {
                stack.push(path);
            } else if entry.file_name().to_string_lossy().contains(query) {
                out.push(path);
            }
        }
    }
    sorted(out)
}

fn count_prefixed(out: &str, prefix: &str) -> usize {
    out.lines().filter(|l| l.starts_with(prefix)).count()
}

// ---------------------------------------------------------------------------
// Traversal and matching
// ---------------------------------------------------------------------------

#[test]
fn finds_matches_in_lexical_order() {
    let dir = setup_small_dir();
    let root = dir.path();

    let (session, out) = run_and_report(search().root(root).matching("a"), false);

    assert_eq!(paths(&session), vec![root.join("a.txt"), root.join("sub").join("a2.txt")]);
    assert!(out.contains(&format!(
        "[Orion] Found 2 file(s) matching the query in {}:",
        root.display()
    )));
    assert!(out.contains(&format!("Orion found: {}", root.join("a.txt").display())));
    assert!(out.contains(&format!("Orion found: {}", root.join("sub").join("a2.txt").display())));
}

#[test]
fn result_set_equals_name_filter_for_many_queries() {
    let dir = setup_wide_dir();
    let root = dir.path();

    for query in ["invoice", "Invoice", ".txt", "TXT", "deep", "o", "zzz", ""] {
        let console = Console::new(io::sink(), false);
        let session = search().root(root).matching(query).run(&console).unwrap();
        assert_eq!(
            sorted(paths(&session)),
            expected_matches(root, query),
            "query {query:?}"
        );
    }
}

#[test]
fn empty_query_matches_every_file() {
    let dir = setup_wide_dir();
    let console = Console::new(io::sink(), false);
    let session = search().root(dir.path()).matching("").run(&console).unwrap();

    assert_eq!(session.match_count(), 7);
    assert_eq!(session.stats().files, 7);
    // root, invoices/, invoices/deep/
    assert_eq!(session.stats().dirs, 3);
}

#[test]
fn matching_is_case_sensitive_by_default() {
    let dir = setup_small_dir();
    let (session, out) = run_and_report(search().root(dir.path()).matching("A"), false);

    assert_eq!(session.match_count(), 0);
    assert!(out.contains("[Orion] No files found matching the query."));
}

#[test]
fn directories_never_match() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir_all(dir.path().join("target").join("target_dir")).unwrap();

    let console = Console::new(io::sink(), false);
    let session = search().root(dir.path()).matching("target").run(&console).unwrap();

    assert_eq!(session.match_count(), 0);
}

#[cfg(unix)]
#[test]
fn symlinks_are_matchable_entries() {
    let dir = setup_small_dir();
    let root = dir.path();
    std::os::unix::fs::symlink(root.join("a.txt"), root.join("link_to_a")).unwrap();

    let console = Console::new(io::sink(), false);
    let session = search().root(root).matching("link").run(&console).unwrap();

    assert_eq!(paths(&session), vec![root.join("link_to_a")]);
    assert_eq!(session.stats().others, 1);
}

#[test]
fn ignore_case_and_extension_filters() {
    let dir = setup_wide_dir();
    let root = dir.path();
    let console = Console::new(io::sink(), false);

    let session = search()
        .root(root)
        .matching("INVOICE")
        .ignore_case(true)
        .run(&console)
        .unwrap();
    assert_eq!(session.match_count(), 5);

    let session = search()
        .root(root)
        .matching("invoice")
        .extension(".txt")
        .run(&console)
        .unwrap();
    assert_eq!(
        sorted(paths(&session)),
        sorted(vec![
            root.join("invoice_jan.txt"),
            root.join("invoice_feb.TXT"),
            root.join("invoices").join("invoice_mar.txt"),
            root.join("invoices").join("deep").join("old_invoice.txt"),
        ])
    );
}

#[test]
fn respects_max_depth() {
    let dir = setup_small_dir();
    let root = dir.path();
    let console = Console::new(io::sink(), false);

    let session = search().root(root).matching("a").max_depth(1).run(&console).unwrap();
    assert_eq!(paths(&session), vec![root.join("a.txt")]);

    let session = search().root(root).matching("").max_depth(0).run(&console).unwrap();
    assert_eq!(session.match_count(), 0);
    assert_eq!(session.stats().dirs, 1);
}

#[test]
fn parallel_walk_finds_the_same_set() {
    let dir = setup_wide_dir();
    let root = dir.path();

    for query in ["invoice", "", ".rs"] {
        let console = Console::new(io::sink(), false);
        let sequential = search().root(root).matching(query).run(&console).unwrap();
        let parallel = search().root(root).matching(query).threads(4).run(&console).unwrap();

        assert_eq!(sorted(paths(&parallel)), sorted(paths(&sequential)), "query {query:?}");
        assert_eq!(parallel.stats().entries(), sequential.stats().entries());
    }
}

#[test]
fn custom_matcher_works() {
    struct RustMatcher;
    impl Matcher for RustMatcher {
        fn is_match(&self, entry: &Entry) -> bool {
            entry.path.extension().is_some_and(|e| e == "rs")
        }
    }

    let dir = setup_wide_dir();
    let console = Console::new(io::sink(), false);
    let session = search()
        .root(dir.path())
        .with_matcher(RustMatcher)
        .run(&console)
        .unwrap();

    assert_eq!(session.match_count(), 1);
    assert!(paths(&session)[0].to_string_lossy().ends_with("notes.rs"));
}

// ---------------------------------------------------------------------------
// Failure handling
// ---------------------------------------------------------------------------

#[test]
fn empty_directory_reports_no_matches() {
    let dir = tempfile::tempdir().unwrap();
    let (session, out) = run_and_report(search().root(dir.path()).matching("x"), false);

    assert_eq!(session.match_count(), 0);
    assert!(out.contains("[Orion] No files found matching the query."));
    assert_eq!(count_prefixed(&out, "Orion found:"), 0);
    assert!(!out.contains("Elapsed time"));
}

#[test]
fn missing_root_is_one_top_level_error() {
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nonexistent_directory");

    for threads in [1, 4] {
        let (session, out) =
            run_and_report(search().root(&missing).matching("anything").threads(threads), false);

        assert_eq!(session.match_count(), 0);
        assert_eq!(count_prefixed(&out, "[Orion] Error walking the path: "), 1);
        assert_eq!(count_prefixed(&out, "[Orion] Error: "), 0);
        assert!(out.ends_with("[Orion] No files found matching the query.\n"));
    }
}

/// Yields a good entry, a broken one, then another good one.
struct FlakySource;

impl Source for FlakySource {
    fn walk(&self, _config: &WalkConfig) -> Result<EntryIter<'_>, OrionError> {
        let items = vec![
            Ok(Entry {
                path: "mem/first.txt".into(),
                name: "first.txt".into(),
                kind: EntryKind::File,
                depth: 1,
            }),
            Err(OrionError::PermissionDenied("mem/locked".into())),
            Ok(Entry {
                path: "mem/second.txt".into(),
                name: "second.txt".into(),
                kind: EntryKind::File,
                depth: 1,
            }),
        ];
        Ok(Box::new(items.into_iter()))
    }
}

#[test]
fn entry_errors_are_skipped_not_fatal() {
    let (session, out) = run_and_report(search().root("mem").source(FlakySource).matching(".txt"), false);

    assert_eq!(session.match_count(), 2);
    assert_eq!(session.stats().errors, 1);
    assert!(out.contains("[Orion] Error: permission denied: mem/locked | Continuing..."));
    assert!(out.contains("[Orion] Found 2 file(s) matching the query in mem:"));
}

struct UnreachableSource;

impl Source for UnreachableSource {
    fn walk(&self, _config: &WalkConfig) -> Result<EntryIter<'_>, OrionError> {
        Err(OrionError::NotFound("gone".into()))
    }
}

#[test]
fn source_root_failure_reports_empty() {
    let (session, out) = run_and_report(search().root("gone").source(UnreachableSource), false);

    assert_eq!(session.match_count(), 0);
    assert!(out.contains("[Orion] Error walking the path: path not found: gone"));
    assert!(out.contains("[Orion] No files found matching the query."));
}

#[test]
fn rejects_bad_configuration() {
    let console = Console::new(io::sink(), false);

    assert!(matches!(
        search().root(".").threads(0).run(&console),
        Err(OrionError::InvalidThreadCount(0))
    ));
    assert!(matches!(search().matching("x").run(&console), Err(OrionError::MissingRoot)));
}

// ---------------------------------------------------------------------------
// Output contract
// ---------------------------------------------------------------------------

#[test]
fn report_layout() {
    let dir = setup_small_dir();
    let (_, out) = run_and_report(search().root(dir.path()).matching("a"), false);
    let lines: Vec<&str> = out.lines().collect();

    assert_eq!(lines[0], "");
    assert_eq!(lines[1], "[Orion] Searching for files...");
    assert_eq!(lines[2], "[Orion] Done!");
    assert!(lines[3].starts_with("[Orion] Found 2 file(s)"));
    assert!(lines[4].starts_with("Orion found: "));
    assert!(lines[5].starts_with("Orion found: "));
    assert_eq!(lines[6], "[Orion] Search completed.");
    assert!(lines[7].starts_with("[Orion] Elapsed time: "));
    assert_eq!(lines.len(), 8);
}

#[test]
fn verbose_traces_every_entry_and_match() {
    let dir = setup_small_dir();
    let root = dir.path();

    let (_, quiet) = run_and_report(search().root(root).matching("a"), false);
    let (_, verbose) = run_and_report(search().root(root).matching("a"), true);

    // root, a.txt, b.log, sub/, sub/a2.txt
    assert_eq!(count_prefixed(&verbose, "[VM] Orion Currently processing: "), 5);
    assert_eq!(count_prefixed(&verbose, "[Orion] Found match: "), 2);
    assert_eq!(count_prefixed(&quiet, "[VM] "), 0);
    assert_eq!(count_prefixed(&quiet, "[Orion] Found match: "), 0);
    assert_eq!(verbose.lines().count(), quiet.lines().count() + 7);

    let first_trace = verbose
        .lines()
        .find(|l| l.starts_with("[VM]"))
        .unwrap();
    assert_eq!(first_trace, format!("[VM] Orion Currently processing: {}", root.display()));
}

#[test]
fn elapsed_time_grows_with_session_age() {
    let dir = setup_small_dir();
    let console = Console::new(io::sink(), false);
    let session = search().root(dir.path()).matching("a").run(&console).unwrap();

    let first = session.elapsed();
    let second = session.elapsed();
    assert!(second >= first);
    assert!(first >= session.stats().duration);
}

/// Nest 24 directories with 200-character names under `root`, so the bottom
/// of the tree lies beyond PATH_MAX, then drop `deep_match.txt` down there.
///
/// Built with relative `cd`/`mkdir` in a shell so no single path handed to
/// the kernel is too long, and so the test process's own cwd is untouched.
#[cfg(unix)]
fn nest_past_path_max(root: &Path) {
    let status = std::process::Command::new("sh")
        .arg("-c")
        .arg(
            r#"cd -P "$ROOT" || exit 1
               i=0
               while [ "$i" -lt 24 ]; do
                   mkdir "$SEG" && cd -P "$SEG" || exit 1
                   i=$((i + 1))
               done
               : > deep_match.txt"#,
        )
        .env("ROOT", root)
        .env("SEG", "d".repeat(200))
        .status()
        .unwrap();
    assert!(status.success(), "could not build the deep tree");
}

#[cfg(unix)]
#[test]
fn overlong_path_is_skipped_by_real_walks() {
    let dir = tempfile::tempdir().unwrap();
    let root = dir.path();
    fs::write(root.join("shallow_match.txt"), "").unwrap();
    nest_past_path_max(root);

    for threads in [1, 4] {
        let (session, out) = run_and_report(search().root(root).matching("match").threads(threads), false);

        assert_eq!(
            count_prefixed(&out, "[Orion] Error: I/O error at "),
            1,
            "threads {threads}: {out}"
        );
        assert!(out.lines().any(|l| l.starts_with("[Orion] Error: ") && l.ends_with(" | Continuing...")));
        assert_eq!(count_prefixed(&out, "[Orion] Error walking the path: "), 0);
        assert!(session.stats().errors > 0, "threads {threads}");
        assert_eq!(paths(&session), vec![root.join("shallow_match.txt")], "threads {threads}");
        assert!(out.contains("[Orion] Found 1 file(s)"));
    }
}

#[test]
fn session_and_source_expose_their_inputs() {
    let dir = setup_small_dir();
    let root = dir.path();

    let source = orion::DirSource::new(root);
    assert_eq!(source.root(), root);

    let console = Console::new(io::sink(), true);
    assert!(console.is_verbose());
    assert!(!Console::new(io::sink(), false).is_verbose());

    let session = search().root(root).matching("a2").run(&console).unwrap();
    assert_eq!(session.request().query(), "a2");
    assert_eq!(session.request().root_dir(), root);
    assert_eq!(paths(&session), vec![root.join("sub").join("a2.txt")]);
}
