/*!
 * Tests for language code utilities
 */

use cinema_family::language_utils;

#[test]
fn test_normalize_to_part2t_withPart1Code_shouldReturnThreeLetters() {
    assert_eq!(language_utils::normalize_to_part2t("en").unwrap(), "eng");
    assert_eq!(language_utils::normalize_to_part2t("ES").unwrap(), "spa");
}

#[test]
fn test_normalize_to_part2t_withBibliographicCode_shouldReturnTerminological() {
    assert_eq!(language_utils::normalize_to_part2t("fre").unwrap(), "fra");
    assert_eq!(language_utils::normalize_to_part2t("ger").unwrap(), "deu");
}

#[test]
fn test_normalize_to_part2t_withInvalidCode_shouldFail() {
    assert!(language_utils::normalize_to_part2t("xx").is_err());
    assert!(language_utils::normalize_to_part2t("english").is_err());
    assert!(language_utils::normalize_to_part2t("").is_err());
}

#[test]
fn test_is_language_code_withSubtitleSuffixes_shouldClassify() {
    assert!(language_utils::is_language_code("fr"));
    assert!(language_utils::is_language_code("spa"));
    assert!(!language_utils::is_language_code("forced"));
    assert!(!language_utils::is_language_code("1080p"));
}

#[test]
fn test_get_language_name_withKnownCodes_shouldReturnEnglishName() {
    assert_eq!(language_utils::get_language_name("en").unwrap(), "English");
    assert_eq!(language_utils::get_language_name("fre").unwrap(), "French");
    assert!(language_utils::get_language_name("zz").is_err());
}
