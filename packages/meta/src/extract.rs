//! Devtools Block Extraction
//!
//! Locates the `extendDevtoolsMeta(...)` marker in a component source unit
//! and extracts the outermost object literal passed to it, using a
//! character-level balanced-brace scan.
//!
//! The scan does not understand strings or comments: an unbalanced `{` or
//! `}` inside a quoted string inside the block skews the count and ends the
//! span early. Authors are trusted to keep the block literal-shaped.

use once_cell::sync::Lazy;
use regex::Regex;

/// Marker invocation, optionally carrying a generic argument list.
static MARKER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"extendDevtoolsMeta(?:<.*?>)?\(").expect("valid marker pattern"));

/// Extract the raw text of the object literal passed to the devtools marker.
///
/// Returns `None` when the marker is absent, which is the common case.
/// When the marker is present but the braces never balance before end of
/// input, the degraded remainder of the source is returned rather than
/// failing the build.
pub fn extract_devtools_block(source: &str) -> Option<String> {
    let marker = MARKER.find(source)?;
    let start = marker.end();

    let mut open_braces = 0usize;
    let mut close_braces = 0usize;
    let mut end = source.len();

    for (i, ch) in source[start..].char_indices() {
        if ch == '{' {
            open_braces += 1;
        }
        if ch == '}' {
            close_braces += 1;
        }
        if open_braces > 0 && open_braces == close_braces {
            end = start + i + ch.len_utf8();
            break;
        }
    }

    Some(source[start..end].trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_marker_returns_none() {
        assert_eq!(extract_devtools_block("<template><div /></template>"), None);
        assert_eq!(extract_devtools_block(""), None);
    }

    #[test]
    fn test_extracts_simple_block() {
        let source = r#"
            <script setup>
            extendDevtoolsMeta({ example: 'ButtonExample' })
            </script>
        "#;
        assert_eq!(
            extract_devtools_block(source).as_deref(),
            Some("{ example: 'ButtonExample' }")
        );
    }

    #[test]
    fn test_extracts_with_generic_suffix() {
        let source = "extendDevtoolsMeta<ButtonProps>({ defaultVariant: 'solid' })";
        assert_eq!(
            extract_devtools_block(source).as_deref(),
            Some("{ defaultVariant: 'solid' }")
        );
    }

    #[test]
    fn test_extracts_nested_braces() {
        let source = "extendDevtoolsMeta({ matrix: { size: ['sm', 'md'], nested: { deep: true } } }) trailing";
        assert_eq!(
            extract_devtools_block(source).as_deref(),
            Some("{ matrix: { size: ['sm', 'md'], nested: { deep: true } } }")
        );
    }

    #[test]
    fn test_unbalanced_block_returns_remainder() {
        let source = "extendDevtoolsMeta({ example: 'x'";
        assert_eq!(
            extract_devtools_block(source).as_deref(),
            Some("{ example: 'x'")
        );
    }

    #[test]
    fn test_only_first_marker_is_used() {
        let source = "extendDevtoolsMeta({ a: 1 }) extendDevtoolsMeta({ b: 2 })";
        assert_eq!(extract_devtools_block(source).as_deref(), Some("{ a: 1 }"));
    }
}
