use crate::{Displayed, TrustViolation, Uncoercible, VirtualPath, VirtualPathError};
use std::collections::HashSet;

/// (untrusted input, canonical form, segments)
type Case = (String, &'static str, Vec<&'static str>);

fn case(input: &str, canonical: &'static str, segments: &[&'static str]) -> Case {
    (input.to_string(), canonical, segments.to_vec())
}

/// Checks a case both as a plain string and through a `Display` wrapper.
fn check_case(
    (input, canonical, segments): &Case,
    expect_trusted: bool,
    check: impl Fn(&VirtualPath),
) {
    for path in [
        VirtualPath::new(input.as_str()),
        VirtualPath::new(&Displayed(input)),
    ] {
        assert_eq!(path.as_str(), *canonical, "input={input:?}");
        assert_eq!(path.to_string(), *canonical, "input={input:?}");
        assert_eq!(path.segments(), segments.as_slice(), "input={input:?}");
        assert_eq!(path.untrusted_path(), input, "input={input:?}");
        assert_eq!(path.is_trusted(), expect_trusted, "input={input:?}");
        check(&path);
    }
}

fn trusted_cases() -> Vec<Case> {
    vec![
        case("", "/", &[]),
        case("/", "/", &[]),
        case("\\", "/", &[]),
        case("hello", "/hello", &["hello"]),
        case("/hello", "/hello", &["hello"]),
        case("\\hello", "/hello", &["hello"]),
        // A perfectly valid file inside the virtual root.
        case("etc/passwd", "/etc/passwd", &["etc", "passwd"]),
        case("/etc/passwd", "/etc/passwd", &["etc", "passwd"]),
        case("etc\\passwd", "/etc/passwd", &["etc", "passwd"]),
        case("\\etc\\passwd", "/etc/passwd", &["etc", "passwd"]),
        case("/hello\\world", "/hello/world", &["hello", "world"]),
        case("\\hello/world", "/hello/world", &["hello", "world"]),
        // Traversal that stays inside the virtual root.
        case("/hello/../world", "/world", &["world"]),
        case("/hello/../world/..", "/", &[]),
        case("/hello/../world/../again", "/again", &["again"]),
        case("\\hello\\..\\world", "/world", &["world"]),
        case("\\hello\\..\\world\\..", "/", &[]),
        case("\\hello\\..\\world\\..\\again", "/again", &["again"]),
        case("/hello\\../world", "/world", &["world"]),
        // Drive letters are ordinary segments.
        case(
            "C:\\\\hello\\world",
            "/C:/hello/world",
            &["C:", "hello", "world"],
        ),
        // Control characters pass through untouched.
        case(
            "/hello/\rlorem/\nipsum/..",
            "/hello/\rlorem",
            &["hello", "\rlorem"],
        ),
        // Whitespace is never trimmed.
        case("  ", "/  ", &["  "]),
        case("/Hello World/☺", "/Hello World/☺", &["Hello World", "☺"]),
    ]
}

fn jailbreak_cases() -> Vec<Case> {
    let mut cases = vec![
        case("..", "/", &[]),
        case("../", "/", &[]),
        case("../..", "/", &[]),
        case("..\\", "/", &[]),
        case("..\\..", "/", &[]),
        case("/..", "/", &[]),
        case("/../", "/", &[]),
        case("/../..", "/", &[]),
        case("\\..", "/", &[]),
        case("\\..\\", "/", &[]),
        case("\\..\\..", "/", &[]),
        case("/hello/../world/../..", "/", &[]),
        case("/hello/../../world", "/world", &["world"]),
        case("\\hello\\..\\world\\..\\..", "/", &[]),
        case("\\hello\\..\\..\\world", "/world", &["world"]),
        case("hello/../world/../../test", "/test", &["test"]),
        case("Hello/../../\rLorem", "/\rLorem", &["\rLorem"]),
        case("../  ", "/  ", &["  "]),
    ];

    for (prefix, suffix) in [("../", ""), ("..\\", ""), ("/..", "/"), ("\\..", "\\")] {
        let deep = prefix.repeat(32);
        cases.push(case(&format!("{deep}{suffix}etc"), "/etc", &["etc"]));
    }
    cases.push(case(
        &format!("{}etc/passwd", "../".repeat(32)),
        "/etc/passwd",
        &["etc", "passwd"],
    ));
    cases.push(case(
        &format!("{}\\etc\\passwd", "\\..".repeat(32)),
        "/etc/passwd",
        &["etc", "passwd"],
    ));

    cases
}

#[test]
fn test_trusted_paths() {
    for c in trusted_cases() {
        check_case(&c, true, |path| {
            assert_eq!(path.violation(), None);
        });
    }
}

#[test]
fn test_jailbreak_attempts() {
    for c in jailbreak_cases() {
        check_case(&c, false, |path| {
            assert_eq!(path.violation(), Some(TrustViolation::Traversal));
        });
    }
}

#[test]
fn test_uncoercible_inputs_are_untrusted_roots() {
    let none: Option<&str> = None;
    let invalid_utf8: &[u8] = &[0x2f, 0xff, 0xfe];

    for path in [
        VirtualPath::new(&Uncoercible),
        VirtualPath::new(&none),
        VirtualPath::new(invalid_utf8),
    ] {
        assert!(!path.is_trusted());
        assert_eq!(path.violation(), Some(TrustViolation::Uncoercible));
        assert_eq!(path.untrusted_path(), "");
        assert_eq!(path.as_str(), "/");
        assert!(path.segments().is_empty());
        assert!(path.is_root());
    }
}

#[test]
fn test_idempotent_on_canonical_form() {
    for c in trusted_cases().into_iter().chain(jailbreak_cases()) {
        let first = VirtualPath::new(c.0.as_str());
        let second = VirtualPath::new(first.as_str());
        assert_eq!(second.as_str(), first.as_str());
        assert_eq!(second.segments(), first.segments());
        assert!(second.is_trusted(), "input={:?}", c.0);
    }
}

#[test]
fn test_repeated_escapes_flip_a_single_flag() {
    let once = VirtualPath::new("../a");
    let many = VirtualPath::new(&"../".repeat(10_000));
    assert_eq!(once.violation(), many.violation());
    assert!(many.is_root());
}

#[test]
fn test_parents() {
    let cases = vec![
        // The parent of the root is the root itself.
        case("/", "/", &[]),
        case("/..", "/", &[]),
        case("/../..", "/", &[]),
        case("/Hello World/☺/../..", "/", &[]),
        case("\\", "/", &[]),
        case("\\..", "/", &[]),
        case("\\..\\..", "/", &[]),
        case("\\Hello World\\☺\\..\\..", "/", &[]),
        case("", "/", &[]),
        case("..", "/", &[]),
        case("../..", "/", &[]),
        case("Hello World/☺/../..", "/", &[]),
        case("..\\..", "/", &[]),
        case("Hello World\\☺\\..\\..", "/", &[]),
        // Non-root parents.
        case(
            "/Hello World/☺/Lorem Ipsum",
            "/Hello World/☺",
            &["Hello World", "☺"],
        ),
        case(
            "/Hello World\\☺/Lorem Ipsum\\",
            "/Hello World/☺",
            &["Hello World", "☺"],
        ),
        case("/Hello World/☺", "/Hello World", &["Hello World"]),
        case("/Hello World/☺/", "/Hello World", &["Hello World"]),
        case("/Hello World/☺\\", "/Hello World", &["Hello World"]),
        case("/Hello World/☺/..", "/", &[]),
        case("Hello/\rLorem\nIpsum", "/Hello", &["Hello"]),
        case(
            "Hello/\rLorem\nIpsum\\backslash",
            "/Hello/\rLorem\nIpsum",
            &["Hello", "\rLorem\nIpsum"],
        ),
        case("  /    ", "/  ", &["  "]),
    ];

    for (input, canonical, segments) in cases {
        for child in [
            VirtualPath::new(input.as_str()),
            VirtualPath::new(&Displayed(&input)),
        ] {
            let parent = child.parent();
            assert!(parent.is_trusted(), "input={input:?}");
            assert_eq!(parent.untrusted_path(), canonical, "input={input:?}");
            assert_eq!(parent.as_str(), canonical, "input={input:?}");
            assert_eq!(parent.segments(), segments.as_slice(), "input={input:?}");
        }
    }
}

#[test]
fn test_parent_of_untrusted_root_is_trusted() {
    let root = VirtualPath::new(&Uncoercible);
    assert!(!root.is_trusted());

    let parent = root.parent();
    assert!(parent.is_trusted());
    assert_eq!(parent, root);
}

#[test]
fn test_file_name_and_root() {
    let path = VirtualPath::new("docs/guide/intro.md");
    assert_eq!(path.file_name(), Some("intro.md"));
    assert!(!path.is_root());

    let root = VirtualPath::new("docs/..");
    assert_eq!(root.file_name(), None);
    assert!(root.is_root());
}

#[test]
fn test_into_segments() {
    let segments = VirtualPath::new("a/./b/../c").into_segments();
    assert_eq!(segments, vec!["a".to_string(), "c".to_string()]);
}

#[test]
fn test_equality_ignores_raw_input_and_trust() {
    let a = VirtualPath::new("/etc/passwd");
    let b = VirtualPath::new("../etc\\passwd");
    assert_ne!(a.is_trusted(), b.is_trusted());
    assert_eq!(a, b);

    let set: HashSet<VirtualPath> = [a, b, VirtualPath::new("etc")].into_iter().collect();
    assert_eq!(set.len(), 2);
}

#[test]
fn test_ordering_follows_canonical_form() {
    let mut paths = vec![
        VirtualPath::new("b"),
        VirtualPath::new("a/z"),
        VirtualPath::new(""),
        VirtualPath::new("a"),
    ];
    paths.sort();
    let rendered: Vec<&str> = paths.iter().map(VirtualPath::as_str).collect();
    assert_eq!(rendered, ["/", "/a", "/a/z", "/b"]);
}

#[test]
fn test_conversions() {
    let from_str: VirtualPath = "a/../b".parse().unwrap();
    let from_ref = VirtualPath::from("a/../b");
    let from_owned = VirtualPath::from(String::from("a/../b"));

    assert_eq!(from_str.as_str(), "/b");
    assert_eq!(from_ref, from_str);
    assert_eq!(from_owned, from_str);
    assert_eq!(from_owned.untrusted_path(), "a/../b");
    assert_eq!(AsRef::<str>::as_ref(&from_owned), "/b");

    let reparsed = VirtualPath::new(&from_owned);
    assert_eq!(reparsed.untrusted_path(), "/b");
    assert!(reparsed.is_trusted());
}

#[test]
fn test_into_trusted() {
    let ok = VirtualPath::new("a/b").into_trusted().unwrap();
    assert_eq!(ok.as_str(), "/a/b");

    match VirtualPath::new("a/../../b").into_trusted() {
        Err(VirtualPathError::JailbreakAttempt { untrusted }) => assert_eq!(untrusted, "a/../../b"),
        other => panic!("Expected JailbreakAttempt, got {other:?}"),
    }

    let err = VirtualPath::new(&Uncoercible).into_trusted().unwrap_err();
    assert!(matches!(err, VirtualPathError::UncoercibleInput));
}

#[test]
fn test_virtual_path_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<VirtualPath>();

    let path = std::sync::Arc::new(VirtualPath::new("shared/../data"));
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let path = std::sync::Arc::clone(&path);
            std::thread::spawn(move || path.as_str().to_owned())
        })
        .collect();
    for handle in handles {
        assert_eq!(handle.join().unwrap(), "/data");
    }
}
