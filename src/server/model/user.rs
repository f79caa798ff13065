//! User domain models and parameters.
//!
//! Provides the account model without its password hash, activity counts used
//! by the profile and admin listings, and the parameter types for registration
//! and profile updates.

use chrono::{DateTime, Utc};

use crate::{
    model::{
        admin::{AdminUserDto, UpdateUserDto},
        auth::RegisterDto,
        user::{ProfileDto, Role, UpdateProfileDto, UserDto},
    },
    server::{
        error::{internal::InternalError, validation::ValidationError},
        util::validate,
    },
};

/// Account without credentials.
#[derive(Debug, Clone, PartialEq)]
pub struct User {
    pub id: String,
    /// Lower-cased email address.
    pub email: String,
    pub name: Option<String>,
    pub role: Role,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl User {
    /// Converts an entity model to a user domain model at the repository boundary.
    ///
    /// # Returns
    /// - `Ok(User)` - The converted user
    /// - `Err(InternalError::InvalidEnumValue)` - The stored role is unknown
    pub fn from_entity(entity: entity::user::Model) -> Result<Self, InternalError> {
        let role = Role::parse(&entity.role).ok_or(InternalError::InvalidEnumValue {
            column: "users.role",
            value: entity.role.clone(),
        })?;

        Ok(Self {
            id: entity.id,
            email: entity.email,
            name: entity.name,
            role,
            is_active: entity.is_active,
            created_at: entity.created_at,
        })
    }

    pub fn into_dto(self) -> UserDto {
        UserDto {
            id: self.id,
            email: self.email,
            name: self.name,
            role: self.role,
            is_active: self.is_active,
            created_at: self.created_at,
        }
    }
}

/// User with the number of polls created and votes cast.
#[derive(Debug, Clone, PartialEq)]
pub struct UserWithCounts {
    pub user: User,
    pub polls_count: u64,
    pub votes_count: u64,
}

impl UserWithCounts {
    pub fn into_profile_dto(self) -> ProfileDto {
        ProfileDto {
            id: self.user.id,
            email: self.user.email,
            name: self.user.name,
            role: self.user.role,
            created_at: self.user.created_at,
            polls_count: self.polls_count,
            votes_count: self.votes_count,
        }
    }

    pub fn into_admin_dto(self) -> AdminUserDto {
        AdminUserDto {
            user: self.user.into_dto(),
            polls_count: self.polls_count,
            votes_count: self.votes_count,
        }
    }
}

/// Validated registration request.
#[derive(Debug, Clone)]
pub struct RegisterParams {
    /// Lower-cased email.
    pub email: String,
    pub password: String,
    pub name: Option<String>,
}

impl RegisterParams {
    pub fn from_dto(dto: RegisterDto) -> Result<Self, ValidationError> {
        let mut errors = ValidationError::default();

        validate::email(&mut errors, "email", &dto.email);
        validate::password(&mut errors, "password", &dto.password);
        if let Some(name) = &dto.name {
            validate::length(&mut errors, "name", name, 2, 100, None);
        }

        errors.into_result()?;

        Ok(Self {
            email: dto.email.to_lowercase(),
            password: dto.password,
            name: dto.name,
        })
    }
}

/// Validated profile update.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateProfileParams {
    pub name: Option<String>,
}

impl UpdateProfileParams {
    pub fn from_dto(dto: UpdateProfileDto) -> Result<Self, ValidationError> {
        let mut errors = ValidationError::default();
        if let Some(name) = &dto.name {
            validate::length(&mut errors, "name", name, 2, 100, None);
        }
        errors.into_result()?;

        Ok(Self { name: dto.name })
    }
}

/// Admin changes to another user's account.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateUserParams {
    pub role: Option<Role>,
    pub is_active: Option<bool>,
}

impl UpdateUserParams {
    pub fn from_dto(dto: UpdateUserDto) -> Self {
        Self {
            role: dto.role,
            is_active: dto.is_active,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lowercases_email_on_registration() {
        let params = RegisterParams::from_dto(RegisterDto {
            email: "Someone@Example.COM".to_string(),
            password: "correct horse".to_string(),
            name: None,
        })
        .unwrap();

        assert_eq!(params.email, "someone@example.com");
    }

    #[test]
    fn rejects_short_password_and_bad_email() {
        let err = RegisterParams::from_dto(RegisterDto {
            email: "nope".to_string(),
            password: "short".to_string(),
            name: Some("X".to_string()),
        })
        .unwrap_err();

        let fields: Vec<&str> = err.details.iter().map(|d| d.field.as_str()).collect();
        assert_eq!(fields, vec!["email", "password", "name"]);
    }
}
