//! Slug Derivation
//!
//! Component identifiers in the catalog are lowercase hyphenated slugs
//! derived either from the unit's file name or from the introspected
//! component name with the library prefix stripped. Derivation is a pure
//! function of its input; two distinct names mapping to the same slug is a
//! naming conflict that is not detected here (last write wins downstream).

/// Convert a component name to its kebab-case form.
///
/// Word boundaries are case transitions (`InputMenu` -> `input-menu`,
/// `HTMLElement` -> `html-element`) and any non-alphanumeric separator
/// (`my_widget` -> `my-widget`).
pub fn kebab_case(name: &str) -> String {
    let mut words: Vec<String> = Vec::new();
    let mut current = String::new();
    let chars: Vec<char> = name.chars().collect();

    for (i, &ch) in chars.iter().enumerate() {
        if !ch.is_alphanumeric() {
            if !current.is_empty() {
                words.push(std::mem::take(&mut current));
            }
            continue;
        }

        if !current.is_empty() {
            let prev = chars[i - 1];
            let starts_word = (ch.is_uppercase() && !prev.is_uppercase())
                // End of an uppercase run followed by a lowercase tail,
                // e.g. the `E` in `HTMLElement`.
                || (ch.is_uppercase()
                    && prev.is_uppercase()
                    && chars.get(i + 1).is_some_and(|next| next.is_lowercase()));
            if starts_word {
                words.push(std::mem::take(&mut current));
            }
        }
        current.extend(ch.to_lowercase());
    }
    if !current.is_empty() {
        words.push(current);
    }

    words.join("-")
}

/// Derive the catalog slug from a source unit's file name.
///
/// Everything from the first `.` is dropped (`Button.vue` -> `button`),
/// and only the final path component is considered.
pub fn slug_from_file_name(file_name: &str) -> String {
    let base = file_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(file_name);
    let stem = base.split('.').next().unwrap_or(base);
    kebab_case(stem)
}

/// Derive the catalog slug from an introspected component name, stripping
/// the configured library prefix (`UButton` with prefix `U` -> `button`).
pub fn slug_from_component_name(name: &str, prefix: &str) -> String {
    let stripped = name.strip_prefix(prefix).unwrap_or(name);
    kebab_case(stripped)
}
