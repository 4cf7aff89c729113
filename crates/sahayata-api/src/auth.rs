use std::sync::Arc;

use argon2::{
    Argon2, PasswordHash, PasswordHasher, PasswordVerifier,
    password_hash::{SaltString, rand_core::OsRng},
};
use axum::{Extension, Json, extract::State, http::StatusCode, response::IntoResponse};
use jsonwebtoken::{EncodingKey, Header, encode};
use uuid::Uuid;

use sahayata_db::{Database, StoreError};
use sahayata_types::api::{
    Claims, LoginRequest, LoginResponse, RegisterRequest, RegisterResponse,
};
use sahayata_types::models::Profile;
use sahayata_types::validate::validate_register;

use crate::admin::profile_from_row;
use crate::error::ApiError;

pub type AppState = Arc<AppStateInner>;

pub struct AppStateInner {
    pub db: Database,
    pub jwt_secret: String,
}

pub async fn register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<impl IntoResponse, ApiError> {
    validate_register(&req).map_err(ApiError::Validation)?;

    // Check if the email is taken
    if state.db.get_profile_by_email(&req.email)?.is_some() {
        return Err(ApiError::Conflict("an account with this email"));
    }

    // Hash password with Argon2id
    let salt = SaltString::generate(&mut OsRng);
    let argon2 = Argon2::default();
    let password_hash = argon2
        .hash_password(req.password.as_bytes(), &salt)
        .map_err(|e| ApiError::Internal(e.to_string()))?
        .to_string();

    let user_id = Uuid::new_v4();

    state
        .db
        .create_profile(&user_id.to_string(), &req.email, &password_hash, &req.full_name)?;

    let token = create_token(&state.jwt_secret, user_id, &req.full_name)
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok((
        StatusCode::CREATED,
        Json(RegisterResponse { user_id, token }),
    ))
}

pub async fn login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<impl IntoResponse, ApiError> {
    let user = state
        .db
        .get_profile_by_email(&req.email)?
        .ok_or(ApiError::Unauthorized)?;

    // Verify password
    let parsed_hash =
        PasswordHash::new(&user.password).map_err(|e| ApiError::Internal(e.to_string()))?;

    Argon2::default()
        .verify_password(req.password.as_bytes(), &parsed_hash)
        .map_err(|_| ApiError::Unauthorized)?;

    let user_id: Uuid = user
        .id
        .parse()
        .map_err(|_| ApiError::Internal("corrupt user id".into()))?;

    let token = create_token(&state.jwt_secret, user_id, &user.full_name)
        .map_err(|e| ApiError::Internal(e.to_string()))?;

    Ok(Json(LoginResponse {
        user_id,
        full_name: user.full_name,
        token,
    }))
}

/// The caller's own profile.
pub async fn me(
    State(state): State<AppState>,
    Extension(claims): Extension<Claims>,
) -> Result<Json<Profile>, ApiError> {
    let row = state
        .db
        .get_profile_by_id(&claims.sub.to_string())?
        .ok_or(StoreError::NotFound("profile"))?;

    Ok(Json(profile_from_row(row)))
}

fn create_token(secret: &str, user_id: Uuid, full_name: &str) -> anyhow::Result<String> {
    let claims = Claims {
        sub: user_id,
        full_name: full_name.to_string(),
        exp: (chrono::Utc::now() + chrono::Duration::days(30)).timestamp() as usize,
    };

    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )?;

    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{DecodingKey, Validation, decode};

    #[test]
    fn token_roundtrip_preserves_identity() {
        let user_id = Uuid::new_v4();
        let token = create_token("test-secret", user_id, "Asha Tamang").unwrap();

        let data = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"test-secret"),
            &Validation::default(),
        )
        .unwrap();

        assert_eq!(data.claims.sub, user_id);
        assert_eq!(data.claims.full_name, "Asha Tamang");
    }

    #[test]
    fn token_rejected_with_wrong_secret() {
        let token = create_token("test-secret", Uuid::new_v4(), "Asha Tamang").unwrap();

        let result = decode::<Claims>(
            &token,
            &DecodingKey::from_secret(b"other-secret"),
            &Validation::default(),
        );
        assert!(result.is_err());
    }
}
