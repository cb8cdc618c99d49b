use argon2::{
    Argon2,
    password_hash::{
        PasswordHash, PasswordHasher, PasswordVerifier, SaltString, rand_core::OsRng,
    },
};

use crate::{models::AppUser, repository::RepositoryState, session::SessionUser};

/// Role vocabulary stored on user records. Compared by exact string equality.
pub mod roles {
    pub const ADMIN: &str = "admin";
    pub const CATALOG_MANAGER: &str = "catalog-manager";

    pub const ALL: [&str; 2] = [ADMIN, CATALOG_MANAGER];

    pub fn is_known(role: &str) -> bool {
        ALL.contains(&role)
    }
}

/// Hashes a plaintext password into an argon2 PHC string.
pub fn hash_password(password: &str) -> Result<String, argon2::password_hash::Error> {
    let salt = SaltString::generate(&mut OsRng);
    Ok(Argon2::default()
        .hash_password(password.as_bytes(), &salt)?
        .to_string())
}

/// Checks a plaintext password against a stored PHC string. A malformed stored hash
/// never verifies.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    match PasswordHash::new(stored_hash) {
        Ok(parsed) => Argon2::default()
            .verify_password(password.as_bytes(), &parsed)
            .is_ok(),
        Err(e) => {
            tracing::error!("stored password hash is unreadable: {:?}", e);
            false
        }
    }
}

/// authenticate
///
/// Resolves a login attempt. Unknown emails and wrong passwords are indistinguishable
/// to the caller.
pub async fn authenticate(repo: &RepositoryState, email: &str, password: &str) -> Option<AppUser> {
    let user = repo.find_user_by_email(email).await?;
    if verify_password(password, &user.password) {
        Some(user)
    } else {
        None
    }
}

impl From<&AppUser> for SessionUser {
    fn from(user: &AppUser) -> Self {
        SessionUser {
            id: user.id,
            role: user.role.clone(),
            firstname: user.firstname.clone(),
        }
    }
}
