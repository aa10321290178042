use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct SignInForm {
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub password: String,
}

/// JWT payload carried by the bearer token of a signed-in dashboard user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SessionClaims {
    pub sub: String,
    pub email: String,
    pub name: String,
    pub iat: usize,
    pub exp: usize,
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct SignInDto {
    pub access_token: String,
    pub token_type: &'static str,
    pub expires_in: u64,
}
