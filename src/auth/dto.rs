use jsonwebtoken::{DecodingKey, EncodingKey};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// JWT payload carried by every bearer token.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Claims {
    pub email: String, // subject email
    pub id: i64,       // user ID
    pub iat: usize,    // issued at (unix timestamp)
    pub exp: usize,    // expires at (unix timestamp)
}

/// Holds JWT signing and verification keys plus the token lifetime.
#[derive(Clone)]
pub struct JwtKeys {
    pub encoding: EncodingKey,
    pub decoding: DecodingKey,
    pub ttl: Duration,
}

/// Request body for signup.
#[derive(Debug, Deserialize)]
pub struct SignupRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// Request body for login.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

fn require(missing: &mut Vec<String>, field: &str, value: &str) {
    if value.trim().is_empty() {
        missing.push(field.to_string());
    }
}

impl SignupRequest {
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut missing = Vec::new();
        require(&mut missing, "email", &self.email);
        require(&mut missing, "password", &self.password);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(missing)
        }
    }
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), Vec<String>> {
        let mut missing = Vec::new();
        require(&mut missing, "email", &self.email);
        require(&mut missing, "password", &self.password);
        if missing.is_empty() {
            Ok(())
        } else {
            Err(missing)
        }
    }
}

/// Response returned after a successful login.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signup_validate_lists_missing_fields() {
        let payload = SignupRequest {
            email: String::new(),
            password: "  ".into(),
        };
        let missing = payload.validate().unwrap_err();
        assert_eq!(missing, vec!["email".to_string(), "password".to_string()]);
    }

    #[test]
    fn signup_validate_accepts_complete_payload() {
        let payload = SignupRequest {
            email: "a@x.com".into(),
            password: "p1".into(),
        };
        assert!(payload.validate().is_ok());
    }

    #[test]
    fn login_request_defaults_missing_fields_to_empty() {
        let payload: LoginRequest = serde_json::from_str(r#"{"email":"a@x.com"}"#).unwrap();
        assert_eq!(payload.password, "");
        assert_eq!(payload.validate().unwrap_err(), vec!["password".to_string()]);
    }
}
