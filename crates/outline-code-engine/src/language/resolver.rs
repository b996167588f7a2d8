use super::LanguageId;

/// Marker separating the language name from the rest of a mode identifier.
pub const MODE_SUFFIX: &str = "-mode";

/// Derive the language from a mode identifier such as `python-mode`.
///
/// Everything from the first `-mode` onwards is dropped. A mode without the
/// marker is taken as the language name verbatim.
pub fn language_for_mode(mode: &str) -> LanguageId {
    match mode.find(MODE_SUFFIX) {
        Some(end) => LanguageId::new(&mode[..end]),
        None => LanguageId::new(mode),
    }
}
