mod prompt;
mod session;

use crate::error::Result as CliErrorResult;
use crate::prompt::Prompter;

use eco_core::{HashCost, Identity, PasswordHasher};
use eco_db::{ConnectionSettings, StoreConnector};
use eco_identity::IdentityManager;

use std::cell::RefCell;
use std::collections::VecDeque;

/// Answers prompts from a fixed script, in order.
pub(crate) struct ScriptedPrompter {
    answers: RefCell<VecDeque<String>>,
    confirm: bool,
}

impl ScriptedPrompter {
    pub(crate) fn new(answers: &[&str]) -> Self {
        Self {
            answers: RefCell::new(answers.iter().map(|a| a.to_string()).collect()),
            confirm: true,
        }
    }

    pub(crate) fn declining(answers: &[&str]) -> Self {
        Self {
            confirm: false,
            ..Self::new(answers)
        }
    }

    pub(crate) fn remaining(&self) -> usize {
        self.answers.borrow().len()
    }

    fn next(&self) -> CliErrorResult<String> {
        self.answers
            .borrow_mut()
            .pop_front()
            .ok_or_else(|| crate::CliError::prompt("script exhausted"))
    }
}

impl Prompter for ScriptedPrompter {
    fn input(&self, _label: &str) -> CliErrorResult<String> {
        self.next()
    }

    fn secret(&self, _label: &str) -> CliErrorResult<String> {
        self.next()
    }

    fn confirm(&self, _label: &str) -> CliErrorResult<bool> {
        Ok(self.confirm)
    }
}

pub(crate) fn create_test_manager() -> IdentityManager {
    let store = StoreConnector::new(ConnectionSettings::in_memory());
    let hasher = PasswordHasher::new(HashCost::minimal()).unwrap();
    IdentityManager::new(store, hasher)
}

pub(crate) async fn seed_identity(
    manager: &IdentityManager,
    username: &str,
    role: &str,
    password: &str,
) -> Identity {
    let mut identity = manager
        .build_identity(username, &format!("{}@x.com", username), Some(role), password)
        .await
        .unwrap();
    manager.create(&mut identity).await.unwrap();
    identity
}
