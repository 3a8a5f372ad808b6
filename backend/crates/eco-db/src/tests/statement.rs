use crate::{Statement, StatementKind, StoreValue};

use googletest::prelude::*;

#[test]
fn given_insert_write_when_checked_then_is_insert() {
    let statement = Statement::write("  insert INTO users (username) VALUES (?)").bind("alice");

    assert!(statement.is_write());
    assert!(statement.is_insert());
    assert_that!(statement.placeholder_count(), eq(1));
}

#[test]
fn given_update_write_when_checked_then_not_insert() {
    let statement = Statement::write("UPDATE users SET role = ? WHERE id = ?");

    assert!(statement.is_write());
    assert!(!statement.is_insert());
}

#[test]
fn given_read_starting_with_insert_text_then_not_insert() {
    // Only writes can report a generated id
    let statement = Statement::read("INSERT INTO users (username) VALUES (?)");

    assert_that!(statement.kind(), eq(StatementKind::Read));
    assert!(!statement.is_insert());
}

#[test]
fn given_bound_values_then_kept_in_order() {
    let statement = Statement::read("SELECT id FROM users WHERE username = ? OR email = ? OR id = ?")
        .bind("alice")
        .bind(String::from("alice@x.com"))
        .bind(1_i64);

    assert_that!(
        statement.params(),
        elements_are![
            eq(&StoreValue::Text("alice".into())),
            eq(&StoreValue::Text("alice@x.com".into())),
            eq(&StoreValue::Int(1))
        ]
    );
}

#[test]
fn given_optional_values_when_bound_then_none_is_null() {
    let statement = Statement::write("UPDATE users SET role = ? WHERE id = ?")
        .bind(None::<String>)
        .bind(Some(3_i64));

    assert_that!(
        statement.params(),
        elements_are![eq(&StoreValue::Null), eq(&StoreValue::Int(3))]
    );
}

#[test]
fn given_statement_when_debug_formatted_then_values_are_hidden() {
    let statement = Statement::write("INSERT INTO users (password_hash) VALUES (?)")
        .bind("$argon2id$v=19$m=8,t=1,p=1$c2FsdA$aGFzaA");

    let debug = format!("{:?}", statement);

    assert_that!(debug, not(contains_substring("argon2id")));
    assert_that!(debug, contains_substring("params: 1"));
}
