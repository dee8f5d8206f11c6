use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::auth::models::TokenClaims;
use crate::error::{Result, ServerError};

/// JWT 签发和验证服务 (HS256 对称加密，固定密钥)
pub struct JwtService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    token_ttl: i64,
}

impl JwtService {
    pub fn new(secret: &str, token_ttl: i64) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            token_ttl,
        }
    }

    /// 签发 token
    pub fn issue_token(&self, user_id: u64, custom_ttl: Option<i64>) -> Result<String> {
        let now = Utc::now().timestamp();
        let ttl = custom_ttl.unwrap_or(self.token_ttl);

        let claims = TokenClaims {
            sub: user_id.to_string(),
            exp: now + ttl,
            iat: now,
            jti: Uuid::new_v4().to_string(),
        };

        let header = Header::new(Algorithm::HS256);
        let token = encode(&header, &claims, &self.encoding_key)
            .map_err(|e| ServerError::Internal(format!("JWT 签发失败: {}", e)))?;

        Ok(token)
    }

    /// 验证 token
    ///
    /// 签名错误、过期、claims 不符合 [`TokenClaims`] 结构均视为无效令牌。
    pub fn verify_token(&self, token: &str) -> Result<TokenClaims> {
        let validation = Validation::new(Algorithm::HS256);

        let token_data = decode::<TokenClaims>(token, &self.decoding_key, &validation)
            .map_err(|_e| ServerError::InvalidToken)?;

        Ok(token_data.claims)
    }

    /// 获取默认 TTL
    pub fn default_ttl(&self) -> i64 {
        self.token_ttl
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwt_issue_and_verify() {
        let jwt_service = JwtService::new("test-secret-key-at-least-32-chars", 3600);

        let token = jwt_service.issue_token(42, None).unwrap();
        assert!(!token.is_empty());

        let claims = jwt_service.verify_token(&token).unwrap();
        assert_eq!(claims.sub, "42");
        assert_eq!(claims.subject_id().unwrap(), 42);
    }

    #[test]
    fn test_jwt_verify_invalid_token() {
        let jwt_service = JwtService::new("test-secret-key-at-least-32-chars", 3600);

        let result = jwt_service.verify_token("invalid.token.here");
        assert!(matches!(result, Err(ServerError::InvalidToken)));
    }

    #[test]
    fn test_jwt_verify_wrong_secret() {
        let issuer = JwtService::new("secret-a-is-at-least-32-chars-long", 3600);
        let verifier = JwtService::new("secret-b-is-at-least-32-chars-long", 3600);

        let token = issuer.issue_token(7, None).unwrap();

        // 签名不匹配的 token 永远不能静默通过
        let result = verifier.verify_token(&token);
        assert!(matches!(result, Err(ServerError::InvalidToken)));
    }

    #[test]
    fn test_jwt_verify_expired_token() {
        let jwt_service = JwtService::new("test-secret-key-at-least-32-chars", 3600);

        // 已过期 TTL（leeway 默认 60s，取足够早的过期时间）
        let token = jwt_service.issue_token(7, Some(-3600)).unwrap();

        let result = jwt_service.verify_token(&token);
        assert!(matches!(result, Err(ServerError::InvalidToken)));
    }
}
