use argon2::{
    password_hash::{rand_core::OsRng, PasswordHasher, PasswordVerifier, SaltString},
    Argon2, PasswordHash,
};
use base64::{engine::general_purpose, Engine as _};
use std::collections::HashMap;
use thiserror::Error;

use crate::config::{SecurityConfig, UserConfig};

/// The authenticated caller of a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Principal {
    name: String,
    roles: Vec<String>,
}

impl Principal {
    pub fn new(name: impl Into<String>, roles: Vec<String>) -> Self {
        Self {
            name: name.into(),
            roles,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.iter().any(|r| r == role)
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AuthError {
    #[error("Missing Authorization header")]
    MissingCredentials,

    #[error("Authorization header must use Basic credentials")]
    MalformedHeader,

    #[error("Bad credentials")]
    BadCredentials,

    #[error("User '{0}' is not allowed to access cash cards")]
    MissingRole(String),

    #[error("Failed to hash password: {0}")]
    PasswordHash(String),
}

/// Username and password decoded from a Basic Authorization header
#[derive(Debug, PartialEq, Eq)]
pub struct BasicCredentials {
    pub username: String,
    pub password: String,
}

impl BasicCredentials {
    /// Decode `Basic base64(username:password)`
    pub fn from_header(value: &str) -> Result<Self, AuthError> {
        let (scheme, encoded) = value.trim().split_once(' ').ok_or(AuthError::MalformedHeader)?;
        if !scheme.eq_ignore_ascii_case("basic") {
            return Err(AuthError::MalformedHeader);
        }

        let decoded = general_purpose::STANDARD
            .decode(encoded.trim())
            .map_err(|_| AuthError::MalformedHeader)?;
        let decoded = String::from_utf8(decoded).map_err(|_| AuthError::MalformedHeader)?;

        let (username, password) = decoded.split_once(':').ok_or(AuthError::MalformedHeader)?;
        Ok(Self {
            username: username.to_string(),
            password: password.to_string(),
        })
    }

    pub fn to_header(&self) -> String {
        let raw = format!("{}:{}", self.username, self.password);
        format!("Basic {}", general_purpose::STANDARD.encode(raw))
    }
}

struct StoredUser {
    password_hash: String,
    roles: Vec<String>,
}

/// Known logins. Passwords are kept only as salted Argon2id PHC strings.
pub struct UserDirectory {
    users: HashMap<String, StoredUser>,
    // Checked for unknown usernames so they cost as much as known ones
    dummy_hash: String,
}

impl UserDirectory {
    pub fn from_users(users: &[UserConfig]) -> Result<Self, AuthError> {
        let users = users
            .iter()
            .map(|u| {
                let stored = StoredUser {
                    password_hash: hash_password(&u.password)?,
                    roles: u.roles.clone(),
                };
                Ok((u.username.clone(), stored))
            })
            .collect::<Result<_, AuthError>>()?;

        Ok(Self {
            users,
            dummy_hash: hash_password("no-such-user")?,
        })
    }

    pub fn authenticate(&self, username: &str, password: &str) -> Option<Principal> {
        match self.users.get(username) {
            Some(user) if verify_password(password, &user.password_hash) => {
                Some(Principal::new(username, user.roles.clone()))
            }
            Some(_) => None,
            None => {
                verify_password(password, &self.dummy_hash);
                None
            }
        }
    }
}

fn hash_password(password: &str) -> Result<String, AuthError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|hash| hash.to_string())
        .map_err(|e| AuthError::PasswordHash(e.to_string()))
}

fn verify_password(password: &str, hash: &str) -> bool {
    match PasswordHash::new(hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            tracing::error!("Stored password hash is unreadable: {}", e);
            false
        }
    }
}

/// Authenticates a request's Authorization header and checks the role needed for /cashcards
pub struct CredentialGate {
    directory: UserDirectory,
    required_role: String,
}

impl CredentialGate {
    pub fn new(directory: UserDirectory, required_role: impl Into<String>) -> Self {
        Self {
            directory,
            required_role: required_role.into(),
        }
    }

    pub fn from_config(security: &SecurityConfig) -> Result<Self, AuthError> {
        Ok(Self::new(
            UserDirectory::from_users(&security.users)?,
            security.required_role.clone(),
        ))
    }

    pub fn admit(&self, authorization: Option<&str>) -> Result<Principal, AuthError> {
        let header = authorization.ok_or(AuthError::MissingCredentials)?;
        let credentials = BasicCredentials::from_header(header)?;

        let principal = self
            .directory
            .authenticate(&credentials.username, &credentials.password)
            .ok_or(AuthError::BadCredentials)?;

        if !principal.has_role(&self.required_role) {
            return Err(AuthError::MissingRole(credentials.username));
        }
        Ok(principal)
    }
}
