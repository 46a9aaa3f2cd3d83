/*!
 * Tests for the code-likeness classifier
 */

use muilate::translation::{is_code_like, CodeClassifier, Extractor, HeuristicClassifier};

#[test]
fn test_isCodeLike_withEachBuiltinRule_shouldBeTrue() {
    for text in ["LASER_TYPE", "ID_123", "42", "config.xml", "v1.2.3", "#00FF7A", "$power", "$_x", "A"] {
        assert!(is_code_like(text), "expected code-like: {}", text);
    }
}

#[test]
fn test_isCodeLike_withHumanLabels_shouldBeFalse() {
    for text in ["Pierce Method", "Laser Type", "Speed", "Cutting speed (mm/s)", "Ok", "Łączenie"] {
        assert!(!is_code_like(text), "expected translatable: {}", text);
    }
}

#[test]
fn test_isCodeLike_withUppercaseWord_shouldBeTrue() {
    // all-caps words are indistinguishable from constants
    assert!(is_code_like("OK"));
    assert!(is_code_like("STOP"));
}

#[test]
fn test_isCodeLike_withVariableInsideSentence_shouldBeFalse() {
    // Only a leading reference marks text as code
    assert!(!is_code_like("Cost in $"));
    assert!(is_code_like("$total price"));
}

#[test]
fn test_heuristicClassifier_withLongerMinimum_shouldRejectShortWords() {
    let classifier = HeuristicClassifier::new().with_min_text_length(4);
    assert!(classifier.is_code_like("Gas"));
    assert!(!classifier.is_code_like("Gas flow"));
}

#[test]
fn test_heuristicClassifier_minimumCountsCharactersNotBytes() {
    let classifier = HeuristicClassifier::new().with_min_text_length(3);
    // two characters, four bytes
    assert!(classifier.is_code_like("Łó"));
}

#[test]
fn test_heuristicClassifier_withInvalidPattern_shouldFail() {
    assert!(HeuristicClassifier::new().with_patterns(&["(oops"]).is_err());
}

#[test]
fn test_closureClassifier_shouldDriveExtraction() {
    let nothing_is_code = |_: &str| false;
    let extraction = Extractor::new(&nothing_is_code)
        .extract("<MUI><A>ID_1</A><B>7</B></MUI>")
        .unwrap();

    let texts: Vec<&str> = extraction.nodes.iter().map(|n| n.original_text.as_str()).collect();
    assert_eq!(texts, vec!["ID_1", "7"]);
}
