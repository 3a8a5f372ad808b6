use crate::prompt::{prompt_new_password, validate_new_password};
use crate::tests::ScriptedPrompter;

use googletest::prelude::*;

#[test]
fn given_matching_long_enough_passwords_then_ok() {
    assert_that!(validate_new_password("secret1", "secret1", 6), ok(anything()));
}

#[test]
fn given_short_password_then_error_names_minimum() {
    let result = validate_new_password("abc", "abc", 6);

    assert_that!(
        result.unwrap_err().to_string(),
        contains_substring("at least 6 characters")
    );
}

#[test]
fn given_mismatched_passwords_then_error() {
    let result = validate_new_password("secret1", "secret2", 6);

    assert_that!(
        result.unwrap_err().to_string(),
        contains_substring("do not match")
    );
}

#[test]
fn given_multibyte_password_then_length_counts_characters() {
    assert_that!(validate_new_password("ñandú1", "ñandú1", 6), ok(anything()));
}

#[test]
fn given_scripted_answers_when_prompting_new_password_then_both_consumed() {
    let prompter = ScriptedPrompter::new(&["secret1", "secret1"]);

    let password = prompt_new_password(&prompter, 6).unwrap();

    assert_that!(password, eq("secret1"));
    assert_that!(prompter.remaining(), eq(0));
}
