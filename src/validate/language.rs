//! Recognized language codes for multi-lingual string maps
//!
//! ISO 639-1 two-letter codes plus the region-tagged forms that show up in
//! practice. Keys of a language-tagged map must match one of these exactly.

/// Check if a map key is a recognized language code
pub fn is_language_code(code: &str) -> bool {
    LANGUAGE_CODES.binary_search(&code).is_ok()
}

/// Sorted, so membership is a binary search
static LANGUAGE_CODES: &[&str] = &[
    "aa", "ab", "ae", "af", "ak", "am", "an", "ar", "as", "av", "ay", "az", "ba", "be", "bg",
    "bh", "bi", "bm", "bn", "bo", "br", "bs", "ca", "ce", "ch", "co", "cr", "cs", "cu", "cv",
    "cy", "da", "de", "de-AT", "de-CH", "de-DE", "dv", "dz", "ee", "el", "en", "en-AU", "en-CA",
    "en-GB", "en-IE", "en-IN", "en-NZ", "en-US", "eo", "es", "es-ES", "es-MX", "et", "eu", "fa",
    "ff", "fi", "fj", "fo", "fr", "fr-CA", "fr-FR", "fy", "ga", "gd", "gl", "gn", "gu", "gv",
    "ha", "he", "hi", "ho", "hr", "ht", "hu", "hy", "hz", "ia", "id", "ie", "ig", "ii", "ik",
    "io", "is", "it", "it-IT", "iu", "ja", "ja-JP", "jv", "ka", "kg", "ki", "kj", "kk", "kl",
    "km", "kn", "ko", "ko-KR", "kr", "ks", "ku", "kv", "kw", "ky", "la", "lb", "lg", "li", "ln",
    "lo", "lt", "lu", "lv", "mg", "mh", "mi", "mk", "ml", "mn", "mr", "ms", "mt", "my", "na",
    "nb", "nd", "ne", "ng", "nl", "nn", "no", "nr", "nv", "ny", "oc", "oj", "om", "or", "os",
    "pa", "pi", "pl", "ps", "pt", "pt-BR", "pt-PT", "qu", "rm", "rn", "ro", "ru", "ru-RU", "rw",
    "sa", "sc", "sd", "se", "sg", "si", "sk", "sl", "sm", "sn", "so", "sq", "sr", "ss", "st",
    "su", "sv", "sw", "ta", "te", "tg", "th", "ti", "tk", "tl", "tn", "to", "tr", "ts", "tt",
    "tw", "ty", "ug", "uk", "ur", "uz", "ve", "vi", "vo", "wa", "wo", "xh", "yi", "yo", "za",
    "zh", "zh-CN", "zh-HK", "zh-Hans", "zh-Hant", "zh-TW", "zu",
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn table_is_sorted() {
        for window in LANGUAGE_CODES.windows(2) {
            assert!(window[0] < window[1], "{} >= {}", window[0], window[1]);
        }
    }

    #[test]
    fn membership() {
        assert!(is_language_code("en"));
        assert!(is_language_code("zh-Hans"));
        assert!(is_language_code("de-DE"));
        assert!(!is_language_code("english"));
        assert!(!is_language_code("EN"));
        assert!(!is_language_code(""));
    }
}
