use crate::{AuthError, Claims, Result as AuthErrorResult};

use std::panic::Location;

use error_location::ErrorLocation;
use jsonwebtoken::{Algorithm, DecodingKey, EncodingKey, Header, Validation, decode, encode};
use uuid::Uuid;

/// Signs and verifies session tokens with a process-wide HS256 secret.
///
/// The secret is injected once at construction (from `AuthConfig`) and is
/// immutable afterwards; nothing here reads the environment.
pub struct TokenSigner {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
}

impl TokenSigner {
    pub fn new(secret: &[u8]) -> Self {
        let mut validation = Validation::new(Algorithm::HS256);
        // Tokens carry no exp claim; lifetime is bounded by revocation only.
        validation.validate_exp = false;
        validation.required_spec_claims.clear();

        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            validation,
        }
    }

    /// Sign a token encoding the user id as the subject claim.
    #[track_caller]
    pub fn sign(&self, user_id: Uuid) -> AuthErrorResult<String> {
        let claims = Claims {
            sub: user_id.to_string(),
            iat: chrono::Utc::now().timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key).map_err(|e| {
            AuthError::JwtEncode {
                source: e,
                location: ErrorLocation::from(Location::caller()),
            }
        })
    }

    /// Verify signature and shape, returning the user id from the subject
    /// claim. Malformed tokens and signature mismatches are indistinct to
    /// callers beyond the error message.
    #[track_caller]
    pub fn verify(&self, token: &str) -> AuthErrorResult<Uuid> {
        let token_data =
            decode::<Claims>(token, &self.decoding_key, &self.validation).map_err(|e| {
                AuthError::JwtDecode {
                    source: e,
                    location: ErrorLocation::from(Location::caller()),
                }
            })?;

        token_data.claims.validate()?;

        Uuid::parse_str(&token_data.claims.sub).map_err(|e| AuthError::InvalidClaim {
            claim: "sub",
            message: format!("sub is not a valid user id: {}", e),
            location: ErrorLocation::from(Location::caller()),
        })
    }
}
