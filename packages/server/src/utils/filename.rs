use std::path::Path;

/// Longest student-name fragment kept in an avatar file name, in characters.
const MAX_NAME_CHARS: usize = 64;

/// Longest extension kept in an avatar file name, in characters.
const MAX_EXTENSION_CHARS: usize = 16;

const FALLBACK_MEDIA_TYPE: &str = "application/octet-stream";

/// Extracts the extension of an uploaded file name: everything after the
/// last `.`, restricted to ASCII alphanumerics.
///
/// Returns `None` when the name has no `.`, ends with `.`, or the extension
/// has no usable characters.
pub fn file_extension(original: &str) -> Option<String> {
    let (_, ext) = original.rsplit_once('.')?;
    let ext: String = ext
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .take(MAX_EXTENSION_CHARS)
        .collect();

    if ext.is_empty() { None } else { Some(ext) }
}

/// Makes a student name safe to embed in a flat file name.
///
/// Alphanumerics, `-` and `_` are kept; everything else (path separators,
/// dots, whitespace, control characters) becomes `_`.
pub fn sanitize_name(name: &str) -> String {
    name.trim()
        .chars()
        .take(MAX_NAME_CHARS)
        .map(|c| {
            if c.is_alphanumeric() || matches!(c, '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect()
}

/// Builds the avatar file name `{student_id}_{student_name}.{extension}`.
///
/// The result is a single path component that always starts with the
/// student id, so it can neither be hidden nor escape the avatar directory.
pub fn avatar_file_name(student_id: i32, student_name: &str, original: &str) -> String {
    let stem = format!("{student_id}_{}", sanitize_name(student_name));
    match file_extension(original) {
        Some(ext) => format!("{stem}.{ext}"),
        None => stem,
    }
}

/// Returns the final component of a stored file path.
pub fn stored_file_name(path: &str) -> Option<&str> {
    Path::new(path).file_name()?.to_str()
}

/// Picks the media type recorded for an upload: the declared part type,
/// otherwise a guess from the file name, otherwise `application/octet-stream`.
pub fn resolve_media_type(declared: Option<&str>, file_name: &str) -> String {
    match declared.map(str::trim) {
        Some(declared) if !declared.is_empty() && declared != FALLBACK_MEDIA_TYPE => {
            declared.to_string()
        }
        _ => mime_guess::from_path(file_name)
            .first()
            .map(|m| m.to_string())
            .unwrap_or_else(|| FALLBACK_MEDIA_TYPE.to_string()),
    }
}
