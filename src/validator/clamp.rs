/// Result of resolving `.` and `..` in virtual space.
///
/// `segments` borrow from the input text; `escaped` records whether any `..`
/// tried to climb above the virtual root.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Clamped<'a> {
    pub(crate) segments: Vec<&'a str>,
    pub(crate) escaped: bool,
}

/// Tokenizes untrusted path text and clamps traversal to the virtual root.
///
/// Backslashes are separators on every platform. Empty and `.` tokens are
/// dropped, `..` pops one segment, and a `..` with nothing left to pop is
/// absorbed while `escaped` is set. Every other token is kept verbatim.
pub(crate) fn clamp(text: &str) -> Clamped<'_> {
    let mut segments: Vec<&str> = Vec::new();
    let mut escaped = false;

    for token in text.split(['/', '\\']) {
        match token {
            "" | "." => {}
            ".." => {
                if segments.pop().is_none() {
                    escaped = true;
                }
            }
            segment => segments.push(segment),
        }
    }

    Clamped { segments, escaped }
}
