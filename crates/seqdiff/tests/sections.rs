//! Section splitting over characters, lines and nullable lines.

use seqdiff::{calculate_sections, DiffOptions, DiffSection, NaturalComparer, NullAware};

fn section(is_match: bool, len1: usize, len2: usize) -> DiffSection {
    DiffSection::new(is_match, len1, len2).unwrap()
}

fn char_sections(text1: &str, text2: &str, options: &DiffOptions) -> Vec<DiffSection> {
    let c1: Vec<char> = text1.chars().collect();
    let c2: Vec<char> = text2.chars().collect();
    calculate_sections(&c1, &c2, options, NaturalComparer).collect()
}

#[test]
fn test_single_character_edits() {
    let expected = vec![
        section(true, 3, 3),
        section(false, 0, 1),
        section(true, 1, 1),
        section(false, 1, 0),
        section(true, 2, 2),
    ];

    let patience = DiffOptions::default();
    let plain = DiffOptions::default().with_patience_optimization(false);
    assert_eq!(char_sections("  123  ", "  1x2  ", &patience), expected);
    assert_eq!(char_sections("  123  ", "  1x2  ", &plain), expected);
}

#[test]
fn test_sentence_edits() {
    let sections = char_sections(
        "This is a test of the diff implementation, with some text that is deleted.",
        "This is another test of the same implementation, with some more text.",
        &DiffOptions::default(),
    );

    assert_eq!(
        sections,
        vec![
            section(true, 9, 9),
            section(false, 0, 6),
            section(true, 13, 13),
            section(false, 4, 4),
            section(true, 27, 27),
            section(false, 0, 5),
            section(true, 4, 4),
            section(false, 16, 0),
            section(true, 1, 1),
        ]
    );
}

#[test]
fn test_null_lines_match_each_other() {
    let lines1 = [Some("Line 1"), Some("Line 2"), None, Some("Line 3"), Some("Line 4")];
    let lines2 = [Some("Line 1"), None, Some("Line 2"), Some("Line 4")];

    let sections: Vec<DiffSection> =
        calculate_sections(&lines1, &lines2, &DiffOptions::default(), NullAware(NaturalComparer)).collect();

    assert_eq!(
        sections,
        vec![
            section(true, 1, 1),
            section(false, 0, 1),
            section(true, 1, 1),
            section(false, 2, 0),
            section(true, 1, 1),
        ]
    );
}

#[test]
fn test_identical_and_empty_inputs() {
    let options = DiffOptions::default();
    assert_eq!(char_sections("abc", "abc", &options), vec![section(true, 3, 3)]);
    assert_eq!(char_sections("", "abc", &options), vec![section(false, 0, 3)]);
    assert_eq!(char_sections("abc", "", &options), vec![section(false, 3, 0)]);
    assert!(char_sections("", "", &options).is_empty());
}

#[test]
fn test_context_size_hides_short_runs() {
    // The lone shared 'b' is shorter than the required context.
    let options = DiffOptions::default()
        .with_patience_optimization(false)
        .with_context_size(2)
        .unwrap();
    assert_eq!(char_sections("abc", "xbz", &options), vec![section(false, 3, 3)]);
}

#[test]
fn test_section_display() {
    assert_eq!(section(true, 3, 3).to_string(), "3 matched");
    assert_eq!(section(false, 2, 2).to_string(), "2 did not match");
    assert_eq!(
        section(false, 0, 4).to_string(),
        "4 was present in collection2, but not in collection1"
    );
    assert_eq!(
        section(false, 4, 0).to_string(),
        "4 was present in collection1, but not in collection2"
    );
    assert_eq!(section(false, 1, 2).to_string(), "1 did not match with 2");
}
