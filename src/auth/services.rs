// src/auth/services.rs

use std::sync::Arc;

use campus_share_api::{
    AccountKind, AccountResponse, AuthResponse, LoginRequest, RegisterRequest,
    UpdateProfileRequest,
};
use uuid::Uuid;

use super::extractors::ClientContext;
use super::jwt::{Identity, JwtManager};
use super::password::PasswordManager;
use super::user_agent;
use crate::db::models::account::{Account, AccountChanges, NewAccount};
use crate::db::models::login_log::NewLoginLog;
use crate::db::store::Store;
use crate::error::AppError;
use crate::services::{EMAIL_MAX, NAME_MAX, check_length, non_blank};

const DUPLICATE_EMAIL: &str = "Email already registered";

/// Comptes, authentification et journal des connexions.
pub struct IdentityService {
    store: Arc<dyn Store>,
    jwt_manager: JwtManager,
}

/// Issue d'une tentative de connexion, telle qu'écrite dans le journal
enum Attempt<'a> {
    Succeeded(&'a Account),
    UnknownAccount,
    WrongPassword(&'a Account),
    ServerError(&'a AppError),
}

impl IdentityService {
    pub fn new(store: Arc<dyn Store>, jwt_manager: JwtManager) -> Self {
        Self { store, jwt_manager }
    }

    /// Inscription d'un nouveau compte
    pub fn create_account(&self, request: RegisterRequest) -> Result<AuthResponse, AppError> {
        let (Some(name), Some(email), Some(password)) = (
            non_blank(request.name),
            non_blank(request.email),
            non_blank(request.password),
        ) else {
            return Err(AppError::validation("All fields are required"));
        };

        check_length("name", Some(&name), NAME_MAX)?;
        check_length("email", Some(&email), EMAIL_MAX)?;
        if !Self::is_valid_email(&email) {
            return Err(AppError::validation("Invalid email format"));
        }

        let kind = request.kind.unwrap_or_default();
        if self.store.find_account_by_email(&email, kind)?.is_some() {
            return Err(AppError::duplicate_email(DUPLICATE_EMAIL));
        }

        let password_hash = PasswordManager::hash(&password)?;
        let account = self
            .store
            .insert_account(&NewAccount::new(name, email, password_hash, kind))
            .map_err(|e| {
                // Inscription concurrente sur le même email
                if e.is_unique_violation() {
                    AppError::duplicate_email(DUPLICATE_EMAIL)
                } else {
                    AppError::from(e)
                }
            })?;

        tracing::info!(account_id = %account.id, kind = %kind, "Account created");
        self.issue_token(account)
    }

    /// Connexion. Chaque tentative est journalisée, sans jamais bloquer la réponse.
    pub fn authenticate(
        &self,
        request: &LoginRequest,
        client: &ClientContext,
    ) -> Result<AuthResponse, AppError> {
        let (Some(email), Some(password), Some(kind)) = (
            non_blank(request.email.clone()),
            non_blank(request.password.clone()),
            request.kind,
        ) else {
            return Err(AppError::validation(
                "Email, password, and role are required",
            ));
        };

        let account = match self.store.find_account_by_email(&email, kind) {
            Ok(Some(account)) => account,
            Ok(None) => {
                self.record_attempt(&email, kind, client, &Attempt::UnknownAccount);
                return Err(AppError::InvalidCredentials);
            }
            Err(e) => {
                let err = AppError::from(e);
                self.record_attempt(&email, kind, client, &Attempt::ServerError(&err));
                return Err(err);
            }
        };

        match PasswordManager::verify(&password, &account.password_hash) {
            Ok(true) => {}
            Ok(false) => {
                self.record_attempt(&email, kind, client, &Attempt::WrongPassword(&account));
                return Err(AppError::InvalidCredentials);
            }
            Err(e) => {
                let err = AppError::from(e);
                self.record_attempt(&email, kind, client, &Attempt::ServerError(&err));
                return Err(err);
            }
        }

        self.record_attempt(&email, kind, client, &Attempt::Succeeded(&account));
        tracing::debug!(account_id = %account.id, "Login succeeded");
        self.issue_token(account)
    }

    /// Vérifie un bearer token et retourne l'identité qu'il porte
    pub fn resolve_token(&self, token: &str) -> Result<Identity, AppError> {
        self.jwt_manager
            .verify_token(token)
            .map(Identity::from)
            .map_err(AppError::from)
    }

    pub fn get_profile(&self, account_id: Uuid) -> Result<AccountResponse, AppError> {
        let account = self
            .store
            .find_account(account_id)?
            .ok_or_else(|| AppError::not_found("User not found"))?;
        Ok(AccountResponse::try_from(account)?)
    }

    /// Mise à jour du profil, réservée au titulaire du compte
    pub fn update_profile(
        &self,
        caller: Uuid,
        account_id: Uuid,
        request: UpdateProfileRequest,
    ) -> Result<AccountResponse, AppError> {
        if caller != account_id {
            return Err(AppError::forbidden("Unauthorized to update this profile"));
        }

        let account = self
            .store
            .find_account(account_id)?
            .ok_or_else(|| AppError::not_found("User not found"))?;

        let name = non_blank(request.name);
        check_length("name", name.as_deref(), NAME_MAX)?;
        let email = non_blank(request.email).filter(|email| *email != account.email);
        check_length("email", email.as_deref(), EMAIL_MAX)?;
        if let Some(email) = &email {
            if !Self::is_valid_email(email) {
                return Err(AppError::validation("Invalid email format"));
            }
            if self
                .store
                .find_account_by_email(email, account.kind()?)?
                .is_some()
            {
                return Err(AppError::duplicate_email(DUPLICATE_EMAIL));
            }
        }

        let changes = AccountChanges {
            name,
            email,
            password_hash: non_blank(request.password)
                .map(|password| PasswordManager::hash(&password))
                .transpose()?,
        };
        if changes.is_empty() {
            return Ok(AccountResponse::try_from(account)?);
        }

        let updated = self
            .store
            .update_account(account_id, &changes)
            .map_err(|e| {
                if e.is_unique_violation() {
                    AppError::duplicate_email(DUPLICATE_EMAIL)
                } else {
                    AppError::from(e)
                }
            })?;
        Ok(AccountResponse::try_from(updated)?)
    }

    fn issue_token(&self, account: Account) -> Result<AuthResponse, AppError> {
        let token = self.jwt_manager.generate_access_token(
            account.id,
            &account.email,
            account.kind()?,
        )?;

        Ok(AuthResponse {
            token,
            user: AccountResponse::try_from(account)?,
            expires_in: self.jwt_manager.expiration_hours() * 3600,
        })
    }

    /// Écrit une entrée de journal; un échec est tracé puis ignoré.
    fn record_attempt(
        &self,
        email: &str,
        kind: AccountKind,
        client: &ClientContext,
        attempt: &Attempt<'_>,
    ) {
        let profile = user_agent::classify(&client.user_agent);
        let (account_id, success, failure_reason) = match attempt {
            Attempt::Succeeded(account) => (Some(account.id), true, None),
            Attempt::UnknownAccount => (None, false, Some("Account not found".to_string())),
            Attempt::WrongPassword(account) => {
                (Some(account.id), false, Some("Invalid password".to_string()))
            }
            Attempt::ServerError(err) => (None, false, Some(format!("Server error: {err}"))),
        };

        let log = NewLoginLog {
            account_id,
            email: email.to_string(),
            role: kind.as_str().to_string(),
            ip_address: client.ip_address.clone(),
            user_agent: client.user_agent.clone(),
            browser: Some(profile.browser.to_string()),
            os: Some(profile.os.to_string()),
            device: Some(profile.device.to_string()),
            success,
            failure_reason,
            location: None,
        };

        if let Err(e) = self.store.insert_login_log(&log) {
            tracing::error!(email, error = %e, "Failed to log login attempt");
        }
    }

    // === Helpers de validation ===

    fn is_valid_email(email: &str) -> bool {
        email.contains('@') && email.contains('.') && email.len() > 5
    }
}
