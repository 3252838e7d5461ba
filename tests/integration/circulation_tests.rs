//! Borrow and return workflows

use std::fs;

use shelfkeeper::{models::Book, AppConfig, AppError};

use crate::common::{dune, library_with, reopen};

fn descriptions(library: &shelfkeeper::Library) -> Vec<String> {
    library
        .services
        .history
        .entries()
        .map(|r| r.description.clone())
        .collect()
}

#[test]
fn test_borrow_then_return_dune() {
    let (dir, mut library) = library_with(&[dune()], "alice,password1\n");

    let book = library.services.circulation().borrow(0, "alice").unwrap();
    assert_eq!(book.available_copies, 1);
    assert_eq!(
        library.services.circulation().borrowed_books("alice").unwrap(),
        vec!["Dune (Herbert)".to_string()]
    );
    assert_eq!(descriptions(&library)[0], "Borrow book: Dune by alice");
    assert_eq!(descriptions(&library)[1], "Save all books");

    // Both stores reflect the loan
    let reopened = reopen(&dir);
    assert_eq!(reopened.services.catalog.get(0).unwrap().available_copies, 1);
    let raw = fs::read_to_string(AppConfig::in_dir(dir.path()).storage.accounts_path).unwrap();
    assert_eq!(raw, "alice,password1,Dune (Herbert)\n");

    let book = library
        .services
        .circulation()
        .return_book("alice", "Dune (Herbert)")
        .unwrap();
    assert_eq!(book.available_copies, 2);
    assert!(library
        .services
        .circulation()
        .borrowed_books("alice")
        .unwrap()
        .is_empty());
    assert_eq!(
        descriptions(&library)[0],
        "Return book: Dune (Herbert) by alice"
    );

    let reopened = reopen(&dir);
    assert_eq!(reopened.services.catalog.get(0).unwrap().available_copies, 2);
}

#[test]
fn test_last_copy_marks_borrowed() {
    let (dir, mut library) = library_with(
        &[Book::new("Emma", "Austen", 1815, 1)],
        "alice,password1\n",
    );

    let book = library.services.circulation().borrow(0, "alice").unwrap();
    assert_eq!(book.available_copies, 0);
    assert!(book.is_borrowed());

    let raw = fs::read_to_string(AppConfig::in_dir(dir.path()).storage.books_path).unwrap();
    let stored: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(stored[0]["borrowed"], true);

    // The flag follows the count back on return
    library
        .services
        .circulation()
        .return_book("alice", "Emma (Austen)")
        .unwrap();
    let raw = fs::read_to_string(AppConfig::in_dir(dir.path()).storage.books_path).unwrap();
    let stored: serde_json::Value = serde_json::from_str(&raw).unwrap();
    assert_eq!(stored[0]["borrowed"], false);
}

#[test]
fn test_no_copies_available_leaves_state() {
    let mut emma = Book::new("Emma", "Austen", 1815, 1);
    emma.available_copies = 0;
    let (_dir, mut library) = library_with(&[emma], "alice,password1\nbob,password2,Emma (Austen)\n");
    let history_before = library.services.history.len();

    let err = library.services.circulation().borrow(0, "alice").unwrap_err();
    assert!(matches!(err, AppError::NoCopiesAvailable(_)));
    assert!(err.is_refusal());

    assert_eq!(library.services.catalog.get(0).unwrap().available_copies, 0);
    assert!(library
        .services
        .circulation()
        .borrowed_books("alice")
        .unwrap()
        .is_empty());
    assert_eq!(library.services.history.len(), history_before);
}

#[test]
fn test_repeat_borrow_is_refused() {
    let (_dir, mut library) = library_with(&[dune()], "alice,password1\n");
    library.services.circulation().borrow(0, "alice").unwrap();
    let history_after_first = library.services.history.len();

    for _ in 0..3 {
        let err = library.services.circulation().borrow(0, "alice").unwrap_err();
        assert!(matches!(err, AppError::AlreadyBorrowed(ref label) if label == "Dune (Herbert)"));
    }

    assert_eq!(library.services.catalog.get(0).unwrap().available_copies, 1);
    assert_eq!(
        library.services.circulation().borrowed_books("alice").unwrap().len(),
        1
    );
    assert_eq!(library.services.history.len(), history_after_first);
}

#[test]
fn test_borrow_rejects_bad_index_and_unknown_user() {
    let (_dir, mut library) = library_with(&[dune()], "alice,password1\n");

    assert!(matches!(
        library.services.circulation().borrow(5, "alice"),
        Err(AppError::InvalidIndex { index: 5, len: 1 })
    ));
    assert!(matches!(
        library.services.circulation().borrow(0, "mallory"),
        Err(AppError::UnknownUser(_))
    ));
    assert_eq!(library.services.catalog.get(0).unwrap().available_copies, 2);
}

#[test]
fn test_return_refusals() {
    let (_dir, mut library) = library_with(
        &[dune()],
        "alice,password1\nbob,password2,Gone (Nobody)\n",
    );

    assert!(matches!(
        library.services.circulation().return_book("alice", "Dune (Herbert)"),
        Err(AppError::NoBorrowedBooks(_))
    ));
    assert!(matches!(
        library.services.circulation().return_book("bob", "Dune (Herbert)"),
        Err(AppError::NotBorrowed(_))
    ));
    assert!(matches!(
        library.services.circulation().return_book("bob", "Gone (Nobody)"),
        Err(AppError::BookNotFound(_))
    ));
    assert_eq!(
        library.services.circulation().borrowed_books("bob").unwrap(),
        vec!["Gone (Nobody)".to_string()]
    );
}

#[test]
fn test_return_never_exceeds_total() {
    let (_dir, mut library) = library_with(&[dune()], "bob,password2,Dune (Herbert)\n");

    let book = library
        .services
        .circulation()
        .return_book("bob", "Dune (Herbert)")
        .unwrap();
    assert_eq!(book.available_copies, 2);
    assert!(library
        .services
        .circulation()
        .borrowed_books("bob")
        .unwrap()
        .is_empty());
    assert_eq!(
        descriptions(&library)[0],
        "Return book: Dune (Herbert) by bob"
    );
}

#[test]
fn test_ledger_with_two_labels() {
    let (_dir, mut library) = library_with(
        &[dune(), Book::new("1984", "Orwell", 1949, 1)],
        "bob,pw123,Dune (Herbert), 1984 (Orwell)\n",
    );

    assert_eq!(
        library.services.circulation().borrowed_books("bob").unwrap(),
        vec!["Dune (Herbert)".to_string(), "1984 (Orwell)".to_string()]
    );
}

#[test]
fn test_lookup_marks_held_books() {
    let (_dir, mut library) = library_with(
        &[
            dune(),
            Book::new("Dune Messiah", "Herbert", 1969, 1),
            Book::new("Emma", "Austen", 1815, 1),
        ],
        "alice,password1,Dune (Herbert)\n",
    );
    let history_before = library.services.history.len();

    let candidates = library.services.circulation().lookup("HERBERT", "alice").unwrap();
    assert_eq!(candidates.len(), 2);
    assert_eq!(candidates[0].index, 0);
    assert!(candidates[0].already_borrowed);
    assert_eq!(candidates[1].label, "Dune Messiah (Herbert)");
    assert!(!candidates[1].already_borrowed);
    // The linked view answered, so no search was recorded
    assert_eq!(library.services.history.len(), history_before);

    assert!(matches!(
        library.services.circulation().check_borrow(candidates[0].index, "alice"),
        Err(AppError::AlreadyBorrowed(_))
    ));
    assert!(library
        .services
        .circulation()
        .check_borrow(candidates[1].index, "alice")
        .is_ok());
}

#[test]
fn test_lookup_miss_falls_back_to_recorded_search() {
    let (_dir, mut library) = library_with(&[dune()], "alice,password1\n");

    let candidates = library.services.circulation().lookup("Tolkien", "alice").unwrap();
    assert!(candidates.is_empty());
    assert_eq!(
        descriptions(&library)[0],
        "Search books with keyword: tolkien"
    );
}

#[test]
fn test_loans_match_ledger_after_mixed_traffic() {
    let (_dir, mut library) = library_with(
        &[dune(), Book::new("Emma", "Austen", 1815, 3)],
        "alice,password1\nbob,password2\ncarol,password3\n",
    );

    {
        let mut circulation = library.services.circulation();
        circulation.borrow(0, "alice").unwrap();
        circulation.borrow(0, "bob").unwrap();
        circulation.borrow(1, "bob").unwrap();
        circulation.borrow(1, "carol").unwrap();
        assert!(circulation.borrow(0, "carol").is_err());
        circulation.return_book("bob", "Dune (Herbert)").unwrap();
        circulation.borrow(0, "carol").unwrap();
    }

    let report = library.services.accounts.borrowed_report();
    for book in library.services.catalog.books() {
        let holders = report.iter().filter(|(_, label)| *label == book.label()).count();
        assert_eq!(book.on_loan() as usize, holders, "{}", book.label());
    }
}
