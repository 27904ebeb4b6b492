use crate::models::{MrzLineTriple, ValidatorConfig, FILLER};

/// Picks the most plausible MRZ lines out of raw OCR output.
pub struct LineSelector;

impl LineSelector {
    /// Select the three MRZ lines from OCR text. Never fails: missing lines
    /// come back as all-filler lines and are rejected later by the grammar.
    pub fn select(text: &str, config: &ValidatorConfig) -> MrzLineTriple {
        Self::triple_from(&Self::candidates(text, config))
    }

    /// All plausible MRZ lines, longest first. Lines of equal length keep their
    /// order of appearance.
    pub fn candidates(text: &str, config: &ValidatorConfig) -> Vec<String> {
        let mut candidates: Vec<String> = text
            .split(|c: char| c == '\n' || c == '\r')
            .map(Self::strip_whitespace)
            .filter(|line| Self::is_candidate(line, config))
            .collect();

        // sort_by_key is stable, ties stay in scan order
        candidates.sort_by_key(|line| std::cmp::Reverse(line.chars().count()));

        log::debug!("Found {} MRZ candidate line(s)", candidates.len());
        candidates
    }

    /// Build a triple from the first three candidates.
    pub fn triple_from(candidates: &[String]) -> MrzLineTriple {
        let line = |i: usize| candidates.get(i).map(String::as_str).unwrap_or("");
        MrzLineTriple::new(line(0), line(1), line(2))
    }

    // OCR often inserts spaces inside MRZ lines
    fn strip_whitespace(line: &str) -> String {
        line.split_whitespace().collect()
    }

    fn is_candidate(line: &str, config: &ValidatorConfig) -> bool {
        line.chars().count() >= config.min_candidate_length
            && line.chars().filter(|&c| c == FILLER).count() >= config.min_filler_count
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LINE1: &str = "IESPAB12345671<<<<<<<<<<<<<<<<";
    const LINE2: &str = "8503150F3001019ESP<<<<<<<<<<<8";
    const LINE3: &str = "GARCIA<LOPEZ<<MARIA<JOSE<<<<<<";

    #[test]
    fn test_empty_text_yields_filler_lines() {
        let triple = LineSelector::select("", &ValidatorConfig::default());
        let filler = "<".repeat(30);
        assert_eq!(triple.lines(), [filler.as_str(), filler.as_str(), filler.as_str()]);
    }

    #[test]
    fn test_noise_lines_are_ignored() {
        let text = format!(
            "REPUBLICA DE EJEMPLO\nDOCUMENTO NACIONAL DE IDENTIDAD\n\n{}\nFIRMA DEL TITULAR  ........\r\n{}\n{}\nFecha de expedicion 01 01 2020\n",
            LINE1, LINE2, LINE3
        );
        let triple = LineSelector::select(&text, &ValidatorConfig::default());
        assert_eq!(triple.lines(), [LINE1, LINE2, LINE3]);
    }

    #[test]
    fn test_interior_spaces_are_removed() {
        let text = "  IESP AB1234567 1<<<< <<<<<<<<<<<<  \n";
        let candidates = LineSelector::candidates(text, &ValidatorConfig::default());
        assert_eq!(candidates, vec![LINE1.to_string()]);
    }

    #[test]
    fn test_short_or_sparse_lines_are_rejected() {
        // 27 characters, and a long line with only four fillers
        let text = "IESPAB12345671<<<<<<<<<<<<<\nTHIS LINE IS LONG ENOUGH BUT HAS <<<< ONLY";
        assert!(LineSelector::candidates(text, &ValidatorConfig::default()).is_empty());
    }

    #[test]
    fn test_longer_candidates_come_first() {
        let short = "AAAAAAAAAAAAAAAAAAAAAAA<<<<<";
        let long = "BBBBBBBBBBBBBBBBBBBBBBBBB<<<<<<<";
        let text = format!("{}\n{}", short, long);
        let candidates = LineSelector::candidates(&text, &ValidatorConfig::default());
        assert_eq!(candidates, vec![long.to_string(), short.to_string()]);

        let triple = LineSelector::triple_from(&candidates);
        assert_eq!(triple.line1(), "BBBBBBBBBBBBBBBBBBBBBBBBB<<<<<");
        assert_eq!(triple.line2(), "AAAAAAAAAAAAAAAAAAAAAAA<<<<<<<");
        assert_eq!(triple.line3(), "<".repeat(30));
    }

    #[test]
    fn test_equal_lengths_keep_scan_order() {
        let text = format!("{}\n{}\n{}", LINE3, LINE1, LINE2);
        let triple = LineSelector::select(&text, &ValidatorConfig::default());
        assert_eq!(triple.lines(), [LINE3, LINE1, LINE2]);
    }

    #[test]
    fn test_thresholds_come_from_config() {
        let config = ValidatorConfig {
            min_candidate_length: 10,
            min_filler_count: 2,
            ..ValidatorConfig::default()
        };
        let candidates = LineSelector::candidates("ABCDEFGH<<\nABC<<", &config);
        assert_eq!(candidates, vec!["ABCDEFGH<<".to_string()]);
    }
}
