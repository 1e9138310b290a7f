//! Mapping between uploaded names, stored filenames and tokens.
//!
//! Stored files are named `<token><ext>`. The token is recovered from a
//! stored filename by cutting at the first `.`, which works for every
//! extension length (tokens never contain dots).

use crate::utils::token::FileToken;

// Leaves room for the 36-byte token within a 255-byte filename.
const MAX_EXTENSION_BYTES: usize = 255 - 36;

/// Extension of the uploaded file, including the leading dot.
///
/// Only the basename is considered. A name without a dot, or whose only dot
/// is the leading one (`.bashrc`), has no extension.
pub fn extension_of(original_name: &str) -> String {
    let basename = original_name
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(original_name);

    let leading_dots = basename.len() - basename.trim_start_matches('.').len();
    let Some(dot) = basename[leading_dots..].rfind('.') else {
        return String::new();
    };

    let ext: String = basename[leading_dots + dot..]
        .chars()
        .map(|c| {
            if c.is_control()
                || c == ':'
                || c == '*'
                || c == '?'
                || c == '"'
                || c == '<'
                || c == '>'
                || c == '|'
                || c == ';'
            {
                '_'
            } else {
                c
            }
        })
        .collect();

    if ext.len() > MAX_EXTENSION_BYTES {
        let mut end = MAX_EXTENSION_BYTES;
        while !ext.is_char_boundary(end) {
            end -= 1;
        }
        ext[..end].to_string()
    } else {
        ext
    }
}

pub fn stored_file_name(token: &FileToken, extension: &str) -> String {
    format!("{}{}", token, extension)
}

/// Token part of a stored filename.
pub fn token_of(file_name: &str) -> &str {
    match file_name.find('.') {
        Some(dot) => &file_name[..dot],
        None => file_name,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extension_of_common_names() {
        assert_eq!(extension_of("report.pdf"), ".pdf");
        assert_eq!(extension_of("notes.txt"), ".txt");
        assert_eq!(extension_of("archive.tar.gz"), ".gz");
        assert_eq!(extension_of("README"), "");
        assert_eq!(extension_of("trailing."), ".");
    }

    #[test]
    fn test_extension_ignores_leading_dot_and_directories() {
        assert_eq!(extension_of(".bashrc"), "");
        assert_eq!(extension_of(".config.json"), ".json");
        assert_eq!(extension_of("dir.d/file"), "");
        assert_eq!(extension_of("C:\\docs\\scan.PNG"), ".PNG");
    }

    #[test]
    fn test_extension_replaces_unsafe_characters() {
        assert_eq!(extension_of("a.b|c"), ".b_c");
        assert_eq!(extension_of("x.t\u{0}xt"), ".t_xt");
    }

    #[test]
    fn test_token_of_stored_names() {
        let token = FileToken::generate();
        let pdf = stored_file_name(&token, ".pdf");
        assert_eq!(token_of(&pdf), token.to_string());

        let bare = stored_file_name(&token, "");
        assert_eq!(token_of(&bare), token.to_string());

        assert_eq!(token_of("a.txt"), "a");
        assert_eq!(token_of("b.tar.gz"), "b");
    }
}
