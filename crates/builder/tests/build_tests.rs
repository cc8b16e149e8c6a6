#![allow(clippy::unwrap_used, clippy::expect_used)]
use std::{fs, path::Path};

use skillets_builder::{
    DiagnosticKind, MANIFEST_FILE, PathBuilder, Severity, SkilletCollection,
};

fn write_snippet_dir(dir: &Path, manifest: &str, files: &[(&str, &str)]) {
    fs::create_dir_all(dir).unwrap();
    fs::write(dir.join(MANIFEST_FILE), manifest).unwrap();
    for (name, content) in files {
        fs::write(dir.join(name), content).unwrap();
    }
}

fn build(root: &Path) -> SkilletCollection {
    PathBuilder::new(root).unwrap().build("test").unwrap().collection
}

#[test]
fn templates_dir_with_typed_layout() {
    let tmp = tempfile::tempdir().unwrap();
    write_snippet_dir(
        &tmp.path().join("templates/panos/widgetA"),
        "type: panos\nsnippets:\n  - name: widget\n    file: widget.xml\n    xpath: /config/devices\n",
        &[("widget.xml", "<widget/>")],
    );

    let sc = build(tmp.path());
    assert_eq!(sc.name, "test");
    assert_eq!(sc.len(), 1);

    let panos = sc.skillet("panos").unwrap();
    assert_eq!(panos.name, "panos");
    assert_eq!(panos.stacks.len(), 1);
    assert_eq!(panos.stacks[0].name, "widgetA");
    assert_eq!(panos.stacks[0].snippets.len(), 1);

    let snippet = &panos.stacks[0].snippets[0];
    assert_eq!(snippet.name, "widget");
    assert_eq!(snippet.xpath, "/config/devices");
    assert_eq!(snippet.content, "<widget/>");
}

#[test]
fn templates_dir_takes_priority_over_tree_root() {
    let tmp = tempfile::tempdir().unwrap();
    write_snippet_dir(
        &tmp.path().join("templates/panos/inside"),
        "type: panos\nsnippets:\n  - {name: in, file: in.xml, xpath: /in}\n",
        &[("in.xml", "<in/>")],
    );
    write_snippet_dir(
        &tmp.path().join("outside"),
        "type: panorama\nsnippets:\n  - {name: out, file: out.xml, xpath: /out}\n",
        &[("out.xml", "<out/>")],
    );

    let sc = build(tmp.path());
    assert_eq!(sc.types().collect::<Vec<_>>(), vec!["panos"]);
}

// Flat layouts register the template root once under the default type key;
// scanning that root still yields every flat snippet directory.
#[test]
fn flat_layout_collapses_to_default_type() {
    let tmp = tempfile::tempdir().unwrap();
    write_snippet_dir(
        &tmp.path().join("first"),
        "snippets:\n  - {name: one, file: one.xml, xpath: /one}\n",
        &[("one.xml", "<one/>")],
    );
    write_snippet_dir(
        &tmp.path().join("second"),
        "snippets:\n  - {name: two, file: two.xml, xpath: /two}\n",
        &[("two.xml", "<two/>")],
    );

    let sc = build(tmp.path());
    assert_eq!(sc.len(), 1);
    let panos = sc.skillet("panos").unwrap();
    let stacks: Vec<_> = panos.stacks.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(stacks, vec!["first", "second"]);
}

#[test]
fn manifest_without_snippets_does_not_abort_build() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    write_snippet_dir(
        &root.join("panos/broken"),
        "type: panos\nname: broken\n",
        &[],
    );
    write_snippet_dir(
        &root.join("panos/healthy"),
        "type: panos\nsnippets:\n  - {name: h, file: h.xml, xpath: /h}\n",
        &[("h.xml", "<h/>")],
    );
    write_snippet_dir(
        &root.join("panorama/other"),
        "type: panorama\nsnippets:\n  - {name: o, file: o.xml, xpath: /o}\n",
        &[("o.xml", "<o/>")],
    );

    let report = PathBuilder::new(root).unwrap().build("test").unwrap();
    let sc = &report.collection;
    assert_eq!(sc.len(), 2);
    let panos: Vec<_> = sc.skillet("panos").unwrap().stacks.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(panos, vec!["healthy"]);
    assert_eq!(sc.skillet("panorama").unwrap().stacks.len(), 1);

    assert_eq!(report.diagnostics.len(), 1);
    let diag = &report.diagnostics[0];
    assert_eq!(diag.kind, DiagnosticKind::StructuralError);
    assert_eq!(diag.severity, Severity::Error);
    assert_eq!(diag.path, root.join("panos/broken").join(MANIFEST_FILE));
}

#[test]
fn grouping_uses_manifest_type_not_directory() {
    let tmp = tempfile::tempdir().unwrap();
    write_snippet_dir(
        &tmp.path().join("panos/misplaced"),
        "type: panorama\nsnippets:\n  - {name: m, file: m.xml, xpath: /m}\n",
        &[("m.xml", "<m/>")],
    );

    let sc = build(tmp.path());
    assert!(sc.skillet("panos").is_none());
    let panorama = sc.skillet("panorama").unwrap();
    assert_eq!(panorama.stacks[0].name, "misplaced");
}

#[test]
fn unrecognised_manifest_types_get_their_own_skillet() {
    let tmp = tempfile::tempdir().unwrap();
    write_snippet_dir(
        &tmp.path().join("panos/validation"),
        "type: pan_validation\nsnippets:\n  - {name: v, file: v.xml, xpath: /v}\n",
        &[("v.xml", "<v/>")],
    );

    let sc = build(tmp.path());
    assert_eq!(sc.types().collect::<Vec<_>>(), vec!["pan_validation"]);
}

#[test]
fn invalid_declarations_drop_only_themselves() {
    let tmp = tempfile::tempdir().unwrap();
    write_snippet_dir(
        &tmp.path().join("panos/mixed"),
        r#"
type: panos
snippets:
  - name: ok
    file: ok.xml
    xpath: /ok
  - name: no-xpath
    file: ok.xml
  - name: gone
    file: gone.xml
    xpath: /gone
  - name: empty
    file: empty.xml
    xpath: /empty
"#,
        &[("ok.xml", "<ok/>"), ("empty.xml", "")],
    );

    let report = PathBuilder::new(tmp.path()).unwrap().build("test").unwrap();
    let stack = &report.collection.skillet("panos").unwrap().stacks[0];
    let names: Vec<_> = stack.snippets.iter().map(|s| s.name.as_str()).collect();
    assert_eq!(names, vec!["ok", "empty"]);
    assert_eq!(stack.snippets[1].content, "");

    assert_eq!(report.count(Severity::Warning), 2);
    assert!(!report.has_errors());
}

#[test]
fn directories_without_manifest_are_ignored() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    fs::create_dir_all(root.join("panos/notes")).unwrap();
    fs::write(root.join("panos/notes/README.md"), "not a skillet").unwrap();
    fs::create_dir_all(root.join("docs")).unwrap();

    let report = PathBuilder::new(root).unwrap().build("test").unwrap();
    assert!(report.collection.is_empty());
    assert!(report.diagnostics.is_empty());
}

#[test]
fn rebuilding_an_unchanged_tree_is_identical() {
    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    write_snippet_dir(
        &root.join("panos/b"),
        "type: panos\nsnippets:\n  - {name: b, file: b.xml, xpath: /b}\n",
        &[("b.xml", "<b/>")],
    );
    write_snippet_dir(
        &root.join("panos/a"),
        "type: panos\nsnippets:\n  - {name: a, file: a.xml, xpath: /a}\n",
        &[("a.xml", "<a/>")],
    );
    write_snippet_dir(
        &root.join("panorama/c"),
        "type: panorama\nsnippets:\n  - {name: c, file: c.xml, xpath: /c}\n",
        &[("c.xml", "<c/>")],
    );

    let builder = PathBuilder::new(root).unwrap();
    let first = builder.build("test").unwrap();
    let second = builder.build("test").unwrap();

    assert_eq!(
        serde_json::to_value(&first).unwrap(),
        serde_json::to_value(&second).unwrap()
    );
    assert_eq!(first.collection.stack_count(), 3);
}

#[test]
fn numeric_snippet_name_is_kept() {
    let tmp = tempfile::tempdir().unwrap();
    write_snippet_dir(
        &tmp.path().join("panos/w"),
        "type: panos\nsnippets:\n  - name: 2024\n    file: a.xml\n    xpath: /config\n",
        &[("a.xml", "<a/>")],
    );

    let report = PathBuilder::new(tmp.path()).unwrap().build("test").unwrap();
    assert!(report.diagnostics.is_empty(), "{:?}", report.diagnostics);
    assert_eq!(report.collection.snippet_count(), 1);
    assert_eq!(report.collection.skillet("panos").unwrap().stacks[0].snippets[0].name, "2024");
}

#[cfg(unix)]
#[test]
fn unreadable_type_directory_is_reported_and_siblings_still_build() {
    use std::os::unix::fs::PermissionsExt;

    let tmp = tempfile::tempdir().unwrap();
    let root = tmp.path();
    write_snippet_dir(
        &root.join("panos/hidden"),
        "type: panos\nsnippets:\n  - {name: h, file: h.xml, xpath: /h}\n",
        &[("h.xml", "<h/>")],
    );
    write_snippet_dir(
        &root.join("panorama/visible"),
        "type: panorama\nsnippets:\n  - {name: v, file: v.xml, xpath: /v}\n",
        &[("v.xml", "<v/>")],
    );

    let locked = root.join("panos");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o000)).unwrap();
    // Privileged users can list the directory regardless of its mode.
    if fs::read_dir(&locked).is_ok() {
        fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
        return;
    }

    let report = PathBuilder::new(root).unwrap().build("test");
    fs::set_permissions(&locked, fs::Permissions::from_mode(0o755)).unwrap();
    let report = report.unwrap();

    assert_eq!(report.diagnostics.len(), 1);
    let diag = &report.diagnostics[0];
    assert_eq!(diag.kind, DiagnosticKind::UnreadableDirectory);
    assert_eq!(diag.severity, Severity::Error);
    assert_eq!(diag.path, locked);

    assert!(report.collection.skillet("panos").is_none());
    assert_eq!(report.collection.skillet("panorama").unwrap().stacks[0].name, "visible");
}
