//! Search-term folding for a Turkish-language catalog.
//!
//! Staff type search terms with or without Turkish diacritics; "Çalıkuşu"
//! must match "calikusu" and vice versa. Folding lowercases, maps the
//! dotted/dotless i pair explicitly (it survives Unicode decomposition) and
//! strips combining marks from everything else.

use unicode_normalization::UnicodeNormalization;
use unicode_normalization::char::is_combining_mark;

use crate::models::{Book, LoanInfo, StudentStat};

pub fn fold_for_search(text: &str) -> String {
    let lowered: String = text
        .chars()
        .map(|c| match c {
            'ı' | 'İ' => 'i',
            other => other,
        })
        .collect::<String>()
        .to_lowercase();

    lowered.nfkd().filter(|c| !is_combining_mark(*c)).collect()
}

pub fn search_includes(haystack: &str, term: &str) -> bool {
    if term.trim().is_empty() {
        return true;
    }
    fold_for_search(haystack).contains(&fold_for_search(term))
}

pub fn book_matches(book: &Book, term: &str) -> bool {
    search_includes(&book.title, term)
        || search_includes(&book.author, term)
        || search_includes(&book.category, term)
        || book
            .shelf
            .as_deref()
            .is_some_and(|shelf| search_includes(shelf, term))
        || book
            .book_number
            .is_some_and(|n| search_includes(&n.to_string(), term))
}

pub fn loan_matches(loan: &LoanInfo, term: &str) -> bool {
    search_includes(&loan.title, term)
        || search_includes(&loan.author, term)
        || search_includes(&loan.borrower, term)
        || search_includes(&loan.category, term)
}

pub fn student_matches(student: &StudentStat, term: &str) -> bool {
    search_includes(&student.full_name(), term)
        || student
            .student_number
            .is_some_and(|n| search_includes(&n.to_string(), term))
        || student
            .branch
            .as_deref()
            .is_some_and(|branch| search_includes(branch, term))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_turkish_letters_both_ways() {
        assert_eq!(fold_for_search("Çalıkuşu"), "calikusu");
        assert_eq!(fold_for_search("IŞIK"), "isik");
        assert_eq!(fold_for_search("öğretmen"), "ogretmen");
    }

    #[test]
    fn search_is_diacritic_insensitive() {
        assert!(search_includes("Çalıkuşu", "calik"));
        assert!(search_includes("calikusu", "ÇALI"));
        assert!(search_includes("Dönüşüm", "donusum"));
        assert!(!search_includes("Dönüşüm", "kusu"));
    }

    #[test]
    fn empty_term_matches_everything() {
        assert!(search_includes("anything", ""));
        assert!(search_includes("anything", "   "));
    }
}
