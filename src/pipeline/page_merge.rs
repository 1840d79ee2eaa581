//! Re-joining paragraphs that a page break cut in two.

use crate::model::ParagraphFeatures;

/// Characters that close a paragraph; a paragraph ending in one of them is
/// never continued on the next page.
const TERMINAL_PUNCTUATION: [char; 4] = ['.', '!', '?', ';'];

/// Merge each paragraph cut off at a page boundary with its continuation.
///
/// A pair is merged when the continuation starts on the page right after the
/// first paragraph's page, both share a type, the first does not end in
/// terminal punctuation and the continuation does not start with an
/// uppercase letter or a digit. Merging is greedy and pair-only: a paragraph
/// that already spans two pages is never extended, so running the merge again
/// changes nothing.
pub fn merge_page_spans(paragraphs: Vec<ParagraphFeatures>) -> Vec<ParagraphFeatures> {
    let before = paragraphs.len();
    let mut merged = Vec::with_capacity(before);
    let mut iter = paragraphs.into_iter().peekable();

    while let Some(current) = iter.next() {
        let continues = iter
            .peek()
            .map(|next| is_continuation(&current, next))
            .unwrap_or(false);

        match iter.next_if(|_| continues) {
            Some(next) => merged.push(merge_pair(current, next)),
            None => merged.push(current),
        }
    }

    if merged.len() != before {
        log::debug!(
            "PageSpanMerger: merged {} page-spanning pairs",
            before - merged.len()
        );
    }
    merged
}

/// Check if `next` continues `current` across a page break.
pub fn is_continuation(current: &ParagraphFeatures, next: &ParagraphFeatures) -> bool {
    if current.last_page_number != current.page_number {
        return false;
    }

    let next_page = current.page_number.checked_add(1);
    if next_page != Some(next.page_number) {
        return false;
    }

    if current.paragraph_type != next.paragraph_type {
        return false;
    }

    if current.text.trim_end().ends_with(TERMINAL_PUNCTUATION) {
        return false;
    }

    // An empty continuation has nothing to contribute.
    match next.text.trim_start().chars().next() {
        Some(c) => !c.is_uppercase() && !c.is_numeric(),
        None => false,
    }
}

fn merge_pair(first: ParagraphFeatures, second: ParagraphFeatures) -> ParagraphFeatures {
    let text = format!("{} {}", first.text.trim_end(), second.text.trim_start());

    let mut merged = first;
    merged.bounding_box = merged.bounding_box.union(&second.bounding_box);
    merged.last_page_number = second.last_page_number;
    merged.set_text(&text);
    merged
}

#[cfg(test)]
mod tests {
    use super::*;

    fn paragraph(index: usize, page: u32, text: &str) -> ParagraphFeatures {
        ParagraphFeatures::with_text(text).on_page(page).at_index(index)
    }

    fn texts(paragraphs: &[ParagraphFeatures]) -> Vec<&str> {
        paragraphs.iter().map(|p| p.text.as_str()).collect()
    }

    #[test]
    fn test_merges_across_page_break() {
        let input = vec![
            paragraph(0, 1, "Text."),
            paragraph(1, 1, "Text to be continued"),
            paragraph(2, 2, "here"),
            paragraph(3, 2, "Text."),
        ];

        let output = merge_page_spans(input);
        assert_eq!(output.len(), 3);
        assert_eq!(texts(&output), vec!["Text.", "Text to be continued here", "Text."]);

        let joined = &output[1];
        assert_eq!(joined.index, 1);
        assert_eq!(joined.page_number, 1);
        assert_eq!(joined.last_page_number, 2);
        assert_eq!(joined.word_count(), 5);
    }

    #[test]
    fn test_same_page_not_merged() {
        let input = vec![
            paragraph(0, 1, "Text."),
            paragraph(1, 1, "Text to be continued"),
            paragraph(2, 1, "here"),
            paragraph(3, 1, "Text."),
        ];
        assert_eq!(merge_page_spans(input).len(), 4);
    }

    #[test]
    fn test_terminal_punctuation_not_merged() {
        let input = vec![
            paragraph(0, 1, "Text."),
            paragraph(1, 1, "Text to be continued."),
            paragraph(2, 2, "here"),
            paragraph(3, 2, "Text."),
        ];
        assert_eq!(merge_page_spans(input).len(), 4);

        for ending in ["!", "?", ";", "; "] {
            let input = vec![
                paragraph(0, 1, &format!("Sentence{}", ending)),
                paragraph(1, 2, "continued"),
            ];
            assert_eq!(merge_page_spans(input).len(), 2, "ending {:?}", ending);
        }
    }

    #[test]
    fn test_uppercase_or_digit_start_not_merged() {
        for start in ["Here", "2 more", "Élan"] {
            let input = vec![paragraph(0, 1, "Text to be continued"), paragraph(1, 2, start)];
            assert_eq!(merge_page_spans(input).len(), 2, "start {:?}", start);
        }
    }

    #[test]
    fn test_pages_must_be_adjacent() {
        let input = vec![paragraph(0, 1, "Text to be continued"), paragraph(1, 3, "here")];
        assert_eq!(merge_page_spans(input).len(), 2);
    }

    #[test]
    fn test_types_must_match() {
        use crate::model::SegmentType;
        let input = vec![
            paragraph(0, 1, "Text to be continued"),
            paragraph(1, 2, "here").with_type(SegmentType::ListItem),
        ];
        assert_eq!(merge_page_spans(input).len(), 2);
    }

    #[test]
    fn test_bounding_box_union() {
        use crate::model::BoundingBox;
        let input = vec![
            paragraph(0, 1, "continued").with_bounding_box(BoundingBox::new(72.0, 700.0, 450.0, 40.0)),
            paragraph(1, 2, "here").with_bounding_box(BoundingBox::new(70.0, 72.0, 200.0, 12.0)),
        ];
        let output = merge_page_spans(input);
        assert_eq!(output.len(), 1);
        let bbox = output[0].bounding_box;
        assert_eq!(bbox.left, 70.0);
        assert_eq!(bbox.top, 72.0);
        assert_eq!(bbox.right(), 522.0);
        assert_eq!(bbox.bottom(), 740.0);
    }

    #[test]
    fn test_pair_only_no_chaining() {
        let input = vec![
            paragraph(0, 1, "one"),
            paragraph(1, 2, "two"),
            paragraph(2, 3, "three"),
        ];
        let output = merge_page_spans(input);
        assert_eq!(texts(&output), vec!["one two", "three"]);

        let again = merge_page_spans(output.clone());
        assert_eq!(again, output);
    }

    #[test]
    fn test_merged_paragraph_not_extended() {
        let merged = merge_page_spans(vec![paragraph(0, 1, "one"), paragraph(1, 2, "two")]);
        assert_eq!(merged[0].last_page_number, 2);
        assert!(!is_continuation(&merged[0], &paragraph(1, 3, "three")));
    }

    #[test]
    fn test_second_pass_is_noop_after_merge() {
        let input = vec![
            paragraph(0, 1, "Text to be continued"),
            paragraph(1, 2, "here"),
            paragraph(2, 2, "and more on the same page"),
        ];
        let once = merge_page_spans(input);
        assert_eq!(once.len(), 2);
        let twice = merge_page_spans(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_continuation_not_merged() {
        let input = vec![paragraph(0, 1, "continued"), paragraph(1, 2, "   ")];
        assert_eq!(merge_page_spans(input).len(), 2);
    }
}
