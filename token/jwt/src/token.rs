use std::time;

use anyhow::Result;
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use uuid::Uuid;

use crate::{claim::Claim, kind::JwtTokenKind};

pub struct JwtToken {
    header: Header,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    expiry_duration: u64,
}

impl JwtToken {
    pub fn new(secret: &str, expiry_duration: &u64) -> Self {
        ps_log::info(Some("⚡"), "JwtToken: Initializing component");

        let secret = secret.as_bytes();
        Self {
            header: Header::default(),
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            expiry_duration: *expiry_duration,
        }
    }

    pub fn encode(&self, id: &Uuid, kind: &JwtTokenKind) -> Result<String> {
        let expiration_time = usize::try_from(
            time::SystemTime::now()
                .duration_since(time::UNIX_EPOCH)?
                .as_secs()
                + self.expiry_duration,
        )?;

        Ok(encode(
            &self.header,
            &Claim::new(id, kind, &expiration_time),
            &self.encoding_key,
        )?)
    }

    pub fn decode(&self, token: &str) -> Result<Claim> {
        Ok(decode::<Claim>(token, &self.decoding_key, &Validation::default())?.claims)
    }

    pub fn need_renew(&self, claim: &Claim) -> Result<bool> {
        let expiry = u64::try_from(*claim.exp())?;
        Ok(expiry - (self.expiry_duration / 2)
            < time::SystemTime::now()
                .duration_since(time::UNIX_EPOCH)?
                .as_secs())
    }

    pub fn renew(&self, claim: &Claim) -> Result<String> {
        self.encode(claim.id(), claim.kind())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn encode_then_decode_preserves_claim() {
        let jwt = JwtToken::new("test-secret", &3600);
        let id = Uuid::now_v7();

        let token = jwt.encode(&id, &JwtTokenKind::Admin).unwrap();
        let claim = jwt.decode(&token).unwrap();

        assert_eq!(claim.id(), &id);
        assert_eq!(claim.kind(), &JwtTokenKind::Admin);
    }

    #[test]
    fn decode_rejects_wrong_secret() {
        let jwt = JwtToken::new("test-secret", &3600);
        let other = JwtToken::new("other-secret", &3600);

        let token = jwt.encode(&Uuid::now_v7(), &JwtTokenKind::User).unwrap();
        assert!(other.decode(&token).is_err());
    }

    #[test]
    fn fresh_token_does_not_need_renewal() {
        let jwt = JwtToken::new("test-secret", &3600);
        let token = jwt.encode(&Uuid::now_v7(), &JwtTokenKind::User).unwrap();
        let claim = jwt.decode(&token).unwrap();
        assert!(!jwt.need_renew(&claim).unwrap());
    }
}
