//! Filesystem-safe file names

/// Characters that are illegal in file names on at least one major platform.
pub const INVALID_FILENAME_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// Extension given to every downloaded voice sample.
pub const VOICE_EXTENSION: &str = "mp3";

/// Replace illegal characters with `_` and trim surrounding whitespace.
///
/// The result is not guaranteed to be unique or non-empty.
pub fn sanitize_filename(name: &str) -> String {
    let replaced: String = name
        .chars()
        .map(|c| if INVALID_FILENAME_CHARS.contains(&c) { '_' } else { c })
        .collect();
    replaced.trim().to_string()
}

/// File name for a voice entry: `{name}{voice_id}.mp3`, sanitized as a whole.
pub fn voice_filename(name: &str, voice_id: &str) -> String {
    sanitize_filename(&format!("{}{}.{}", name, voice_id, VOICE_EXTENSION))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_replaces_every_invalid_char() {
        assert_eq!(sanitize_filename(r#"a<b>c:d"e/f\g|h?i*j"#), "a_b_c_d_e_f_g_h_i_j");
    }

    #[test]
    fn test_trims_whitespace() {
        assert_eq!(sanitize_filename("  Alice 1.mp3\t\n"), "Alice 1.mp3");
    }

    #[test]
    fn test_clean_name_unchanged() {
        let clean = "温柔女声-01.mp3";
        assert_eq!(sanitize_filename(clean), clean);
    }

    #[test]
    fn test_idempotent() {
        let inputs = [" <x> ", "a/b\\c", "  ", "", "?*?", "normal name", " ::tail:: "];
        for input in inputs {
            let once = sanitize_filename(input);
            assert_eq!(sanitize_filename(&once), once, "input {:?}", input);
            assert!(!once.contains(INVALID_FILENAME_CHARS));
            assert_eq!(once.trim(), once);
        }
    }

    #[test]
    fn test_path_separators_cannot_escape() {
        let name = voice_filename("../../etc/passwd", "7");
        assert!(!name.contains('/'));
        assert_eq!(name, ".._.._etc_passwd7.mp3");
    }

    #[test]
    fn test_voice_filename() {
        assert_eq!(voice_filename("Alice", "1"), "Alice1.mp3");
        assert_eq!(voice_filename(" Bob: narrator", "v2"), "Bob_ narratorv2.mp3");
        assert_eq!(voice_filename("", ""), ".mp3");
    }
}
