mod common;

use common::open_memory_book;
use purse::{CoreError, PurseError};

#[test]
fn food_budget_walkthrough_with_undo_and_redo() {
    let mut book = open_memory_book(50);
    assert_eq!(book.timeline().len(), 1, "history starts with the seed entry");

    let food = book.create_category("Food", 500.0).expect("create Food");
    assert_eq!(food.balance, 500.0);
    assert_eq!(book.ledger().deposits().len(), 1);
    assert_eq!(book.ledger().deposits()[0].amount, 500.0);

    book.add_expense(&food.id, "Lunch", 120.0).expect("add Lunch");
    assert_eq!(book.ledger().category(&food.id).unwrap().balance, 380.0);
    assert_eq!(book.ledger().expenses().len(), 1);
    assert_eq!(book.ledger().expenses()[0].amount, 120.0);

    let err = book
        .add_expense(&food.id, "Feast", 500.0)
        .expect_err("overdraft rejected");
    assert!(matches!(
        err,
        PurseError::Core(CoreError::InsufficientFunds { .. })
    ));
    assert_eq!(book.ledger().category(&food.id).unwrap().balance, 380.0);
    assert_eq!(book.timeline().len(), 3, "rejected edits are not recorded");

    let topped = book.top_up_category(&food.id, "Food", 200.0).expect("top up");
    assert_eq!(topped.deposit, 700.0);
    assert_eq!(topped.balance, 580.0);
    assert_eq!(book.timeline().len(), 4);

    assert!(book.undo().expect("undo top-up"));
    let category = book.ledger().category(&food.id).unwrap();
    assert_eq!(category.balance, 380.0);
    assert_eq!(category.deposit, 500.0);
    assert_eq!(book.ledger().expenses().len(), 1);

    assert!(book.undo().expect("undo expense"));
    assert_eq!(book.ledger().category(&food.id).unwrap().balance, 500.0);
    assert!(book.ledger().expenses().is_empty());

    assert!(book.redo().expect("redo expense"));
    assert!(book.redo().expect("redo top-up"));
    assert_eq!(book.ledger().category(&food.id).unwrap().balance, 580.0);
    assert!(!book.redo().expect("nothing left to redo"));
    assert_eq!(book.timeline().len(), 4, "undo/redo never record entries");
}

#[test]
fn undo_all_the_way_reaches_the_seed() {
    let mut book = open_memory_book(50);
    let rent = book.create_category("Rent", 900.0).unwrap();
    book.add_expense(&rent.id, "June", 850.0).unwrap();

    while book.undo().unwrap() {}
    assert!(book.ledger().state().is_empty());
    assert!(!book.can_undo());
    assert!(book.can_redo());
}

#[test]
fn edit_after_undo_discards_redo_branch() {
    let mut book = open_memory_book(50);
    let a = book.create_category("A", 10.0).unwrap();
    book.create_category("B", 10.0).unwrap();
    book.create_category("C", 10.0).unwrap();

    book.undo().unwrap();
    book.undo().unwrap();
    book.top_up_category(&a.id, "A", 5.0).unwrap();

    assert!(!book.can_redo());
    assert!(!book.redo().unwrap());
    let names: Vec<_> = book.ledger().categories().iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["A"]);
    assert_eq!(book.timeline().len(), 3, "seed, create A, top-up A");
}

#[test]
fn history_is_bounded_by_capacity() {
    let mut book = open_memory_book(5);
    let jar = book.create_category("Jar", 1000.0).unwrap();
    for idx in 0..10 {
        book.add_expense(&jar.id, &format!("Spend {idx}"), 1.0).unwrap();
    }

    assert_eq!(book.timeline().len(), 5);
    let mut undos = 0;
    while book.undo().unwrap() {
        undos += 1;
    }
    assert_eq!(undos, 4);
    assert_eq!(book.ledger().expenses().len(), 6);
    assert_eq!(book.ledger().category(&jar.id).unwrap().balance, 994.0);
}

#[test]
fn delete_keeps_records_and_is_undoable() {
    let mut book = open_memory_book(50);
    let food = book.create_category("Food", 200.0).unwrap();
    let fun = book.create_category("Fun", 50.0).unwrap();
    book.add_expense(&fun.id, "Arcade", 20.0).unwrap();

    book.delete_category(&fun.id).unwrap();
    assert_eq!(book.total_balance(), 200.0);
    assert_eq!(book.ledger().expenses()[0].category_name, "Fun");

    let err = book.delete_category(&fun.id).unwrap_err();
    assert!(matches!(err, PurseError::Core(CoreError::NotFound(_))));

    book.undo().unwrap();
    assert_eq!(book.total_balance(), 230.0);
    assert!(book.ledger().category(&food.id).is_some());
}

#[test]
fn total_balance_tracks_deposits_minus_live_expenses() {
    let mut book = open_memory_book(50);
    let food = book.create_category("Food", 300.0).unwrap();
    let travel = book.create_category("Travel", 700.0).unwrap();
    book.add_expense(&food.id, "Market", 45.5).unwrap();
    book.add_expense(&travel.id, "Train", 120.0).unwrap();
    book.top_up_category(&travel.id, "Trips", 80.0).unwrap();

    let deposits: f64 = book.ledger().deposits().iter().map(|d| d.amount).sum();
    let expenses: f64 = book.ledger().expenses().iter().map(|e| e.amount).sum();
    assert_eq!(book.total_balance(), deposits - expenses);

    let feed = book.ledger().activity();
    assert_eq!(feed.len(), 5);
}

#[test]
fn clear_all_empties_ledger_and_restarts_history() {
    let mut book = open_memory_book(50);
    let food = book.create_category("Food", 100.0).unwrap();
    book.add_expense(&food.id, "Lunch", 10.0).unwrap();

    book.clear_all().unwrap();
    assert!(book.ledger().state().is_empty());
    assert_eq!(book.timeline().len(), 1);
    assert!(!book.can_undo());

    book.create_category("Fresh", 10.0).unwrap();
    assert!(book.undo().unwrap());
    assert!(book.ledger().state().is_empty());
}
