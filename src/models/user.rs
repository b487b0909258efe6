use serde::Deserialize;
use sqlx::FromRow;

use super::required;
use crate::errors::AppError;

/// Stored account. Never serialized back to clients.
#[derive(Debug, Clone, FromRow)]
pub struct User {
    pub id: i64,
    pub email: String,
    pub password_hash: String,
    pub name: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

pub struct NewUser {
    pub email: String,
    pub password: String,
    pub name: String,
}

pub struct Credentials {
    pub email: String,
    pub password: String,
}

impl RegisterRequest {
    pub fn validate(self) -> Result<NewUser, AppError> {
        match (
            required(self.email),
            required(self.password),
            required(self.name),
        ) {
            (Some(email), Some(password), Some(name)) => Ok(NewUser {
                email,
                password,
                name,
            }),
            _ => Err(AppError::Validation(
                "email, password and name are required".into(),
            )),
        }
    }
}

impl LoginRequest {
    pub fn validate(self) -> Result<Credentials, AppError> {
        match (required(self.email), required(self.password)) {
            (Some(email), Some(password)) => Ok(Credentials { email, password }),
            _ => Err(AppError::Validation("email and password are required".into())),
        }
    }
}
