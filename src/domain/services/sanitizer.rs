#[cfg(test)]
#[path = "sanitizer_test.rs"]
mod tests;

use once_cell::sync::Lazy;
use regex::Regex;

static LEADING_FENCE: Lazy<Regex> =
    Lazy::new(|| return Regex::new(r"(?i)^```[ \t]*[a-z0-9_+#.\-]*[ \t]*\r?\n").unwrap());

static TRAILING_FENCE: Lazy<Regex> =
    Lazy::new(|| return Regex::new(r"(?:^|\r?\n)[ \t]*```$").unwrap());

static FENCE_LINE: Lazy<Regex> = Lazy::new(|| return Regex::new(r"(?m)^[ \t]*```").unwrap());

fn strip_boundary_fences(code: &str) -> String {
    let without_leading = LEADING_FENCE.replace(code, "");
    let without_trailing = TRAILING_FENCE.replace(&without_leading, "");

    return without_trailing.trim().to_string();
}

/// Removes markdown code fences wrapped around a model reply, leaving the
/// code itself. Only fences at the very start and end of the text count;
/// fences in the middle of a reply are passed through untouched.
///
/// Stripping repeats until nothing changes, so `sanitize` is idempotent even
/// for replies wrapped in more than one fence. When a fence line survives,
/// the fences were not a wrapping pair and the trimmed reply is returned
/// as is rather than with one half of a pair removed.
pub fn sanitize(raw: &str) -> String {
    let trimmed = raw.trim();
    let mut code = trimmed.to_string();

    loop {
        let stripped = strip_boundary_fences(&code);
        if stripped == code {
            break;
        }

        code = stripped;
    }

    if FENCE_LINE.is_match(&code) {
        return trimmed.to_string();
    }

    return code;
}
