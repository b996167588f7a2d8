use std::path::PathBuf;
use std::sync::Arc;

use outline_code_engine::io::{mode_for_path, read_file};
use outline_code_engine::{
    BufferId, Cmd, FoldRange, LanguageRegistry, LanguageSupport, Session, build_outline,
    fold_ranges, render_outline,
};
use pretty_assertions::assert_eq;

fn fixture(name: &str) -> PathBuf {
    PathBuf::from(format!(
        "{}/tests/fixtures/{name}",
        env!("CARGO_MANIFEST_DIR")
    ))
}

fn open_fixture(session: &mut Session, name: &str) -> BufferId {
    let path = fixture(name);
    let text = read_file(&path).unwrap();
    session.open_buffer(name, mode_for_path(&path), &text)
}

fn session_with_language_support() -> Session {
    let mut session = Session::new().unwrap();
    session.add_activation_hook(Arc::new(LanguageSupport::default()));
    session
}

#[test]
fn python_outline_mixes_headlines_and_definitions() {
    let mut session = session_with_language_support();
    let id = open_fixture(&mut session, "greeter.py");

    let buffer = session.buffer(id).unwrap();
    let outline = build_outline(buffer.headlines());

    insta::assert_snapshot!(render_outline(&outline), @r"
    [1] * Module notes (level 1)
    [4]   class Greeter: (level 10)
    [5]     def __init__(self, name): (level 14)
    [8]     def greet(self): (level 14)
    [11]   ** Helpers (level 2)
    [12]     def main(): (level 10)
    ");
}

#[test]
fn python_fold_ranges_follow_definitions() {
    let mut session = session_with_language_support();
    let id = open_fixture(&mut session, "greeter.py");

    let buffer = session.buffer(id).unwrap();
    let folds = fold_ranges(&buffer.headlines(), buffer.line_count());

    assert_eq!(
        folds,
        vec![
            FoldRange { line: 0, end_line: 12 },
            FoldRange { line: 3, end_line: 9 },
            FoldRange { line: 4, end_line: 6 },
            FoldRange { line: 7, end_line: 9 },
            FoldRange { line: 10, end_line: 12 },
            FoldRange { line: 11, end_line: 12 },
        ]
    );
}

#[test]
fn demote_only_touches_standard_headlines() {
    let mut session = session_with_language_support();
    let id = open_fixture(&mut session, "greeter.py");
    let buffer = session.buffer_mut(id).unwrap();

    buffer.apply(Cmd::DemoteSubtree { line: 0 }).unwrap();

    let text = buffer.text();
    assert!(text.starts_with("** Module notes\n"));
    assert!(text.contains("\n*** Helpers\ndef main():\n"));
    assert!(text.contains("\nclass Greeter:\n    def __init__(self, name):\n"));

    let levels: Vec<_> = buffer
        .headlines()
        .iter()
        .map(|h| (h.line, h.level))
        .collect();
    assert_eq!(
        levels,
        vec![(0, 2), (3, 10), (4, 14), (7, 14), (10, 3), (11, 10)]
    );
}

#[test]
fn unsupported_language_keeps_host_outline() {
    let mut session = session_with_language_support();
    let id = open_fixture(&mut session, "greeter.rb");

    let buffer = session.buffer(id).unwrap();
    let outline = build_outline(buffer.headlines());

    assert!(!buffer.language_state().is_active());
    insta::assert_snapshot!(render_outline(&outline), @"[1] * Module notes (level 1)");
}

#[test]
fn overrides_enable_additional_languages() {
    let registry = LanguageRegistry::with_overrides([("ruby", r"(?:def|class)[ \t]+\w+")]);
    let mut session = Session::new().unwrap();
    session.add_activation_hook(Arc::new(LanguageSupport::new(Arc::new(registry), 10)));
    let id = open_fixture(&mut session, "greeter.rb");

    let levels: Vec<_> = session
        .buffer(id)
        .unwrap()
        .headlines()
        .iter()
        .map(|h| (h.line, h.level))
        .collect();

    assert_eq!(levels, vec![(0, 1), (1, 10), (2, 12)]);
}

#[test]
fn session_scope_sees_original_outline() {
    let mut session = session_with_language_support();
    let id = open_fixture(&mut session, "greeter.py");

    let inside = session.with_original_definitions(id, |s| {
        s.buffer(id)
            .unwrap()
            .headlines()
            .iter()
            .map(|h| h.level)
            .collect::<Vec<_>>()
    });

    assert_eq!(inside, vec![1, 2]);
    assert_eq!(session.buffer(id).unwrap().headlines().len(), 6);
}
