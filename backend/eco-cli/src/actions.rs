//! Command handlers. Each returns the JSON value printed on success.

use crate::error::{CliError, Result as CliErrorResult};
use crate::prompt::{Prompter, prompt_new_password};
use crate::user_commands::UserCommands;

use eco_config::SecurityConfig;
use eco_core::Identity;
use eco_identity::{IdentityChanges, IdentityManager};

use log::info;
use serde_json::{Value, json};

pub struct Actions<'a, P: ?Sized> {
    manager: &'a IdentityManager,
    prompter: &'a P,
    security: &'a SecurityConfig,
}

impl<'a, P: Prompter + ?Sized> Actions<'a, P> {
    pub fn new(manager: &'a IdentityManager, prompter: &'a P, security: &'a SecurityConfig) -> Self {
        Self {
            manager,
            prompter,
            security,
        }
    }

    /// Create the first identity without a login. Refused once any identity exists.
    pub async fn bootstrap(&self, username: &str, email: &str, role: &str) -> CliErrorResult<Value> {
        if self.manager.count().await? > 0 {
            return Err(CliError::access_denied(
                "bootstrap is only allowed while no identity exists",
            ));
        }

        let identity = self.create_identity(username, email, Some(role)).await?;
        info!("Bootstrapped first identity '{}'", identity.username);

        Ok(serde_json::to_value(&identity)?)
    }

    /// Run a user command on behalf of the logged-in `actor`.
    pub async fn run(&self, actor: &Identity, action: UserCommands) -> CliErrorResult<Value> {
        match action {
            UserCommands::List => Ok(serde_json::to_value(self.manager.list().await?)?),
            UserCommands::Get { username } => Ok(serde_json::to_value(
                self.manager.read_by_username(&username).await?,
            )?),
            UserCommands::GetId { id } => {
                Ok(serde_json::to_value(self.manager.read_by_id(id).await?)?)
            }
            UserCommands::Create {
                username,
                email,
                role,
            } => {
                let identity = self
                    .create_identity(&username, &email, role.as_deref())
                    .await?;
                Ok(serde_json::to_value(&identity)?)
            }
            UserCommands::Update {
                id,
                email,
                role,
                password,
            } => self.update(id, email, role, password).await,
            UserCommands::Delete { id, yes } => self.delete(actor, id, yes).await,
        }
    }

    async fn create_identity(
        &self,
        username: &str,
        email: &str,
        role: Option<&str>,
    ) -> CliErrorResult<Identity> {
        let password = prompt_new_password(self.prompter, self.security.min_password_length)?;
        let role = role
            .filter(|r| !r.trim().is_empty())
            .unwrap_or(&self.security.default_role);

        let mut identity = self
            .manager
            .build_identity(username, email, Some(role), &password)
            .await?;
        self.manager.create(&mut identity).await?;

        Ok(identity)
    }

    async fn update(
        &self,
        id: i64,
        email: Option<String>,
        role: Option<String>,
        password: bool,
    ) -> CliErrorResult<Value> {
        let mut changes = IdentityChanges {
            email,
            role,
            password: None,
        };

        if changes.is_empty() && !password {
            return Ok(json!({ "id": id, "updated": false, "message": "nothing changed" }));
        }

        if password {
            // Fail on unknown ids before asking for a password
            self.manager.read_by_id(id).await?;
            changes.password = Some(prompt_new_password(
                self.prompter,
                self.security.min_password_length,
            )?);
        }

        let updated = self.manager.update(id, &changes).await?;

        Ok(json!({ "id": id, "updated": updated }))
    }

    async fn delete(&self, actor: &Identity, id: i64, yes: bool) -> CliErrorResult<Value> {
        if actor.id == Some(id) {
            return Err(CliError::input("refusing to delete the logged-in identity"));
        }

        let target = self.manager.read_by_id(id).await?;

        if !yes
            && !self
                .prompter
                .confirm(&format!("Delete identity {} ({})?", id, target.username))?
        {
            return Ok(json!({ "id": id, "deleted": false, "message": "aborted" }));
        }

        let deleted = self.manager.delete(id).await?;

        Ok(json!({ "id": id, "deleted": deleted }))
    }
}
