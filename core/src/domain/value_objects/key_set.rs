//! Publishable form of the active signing key (RFC 7517 JSON Web Key Set).

use serde::{Deserialize, Serialize};

/// A single RSA JSON Web Key
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Jwk {
    /// Key type, always `RSA`
    pub kty: String,

    /// Intended use, always `sig`
    #[serde(rename = "use")]
    pub key_use: String,

    /// Signing algorithm, always `RS256`
    pub alg: String,

    /// Key id, matches the `kid` header of tokens signed with this key
    pub kid: String,

    /// Modulus, base64url without padding
    pub n: String,

    /// Public exponent, base64url without padding
    pub e: String,
}

impl Jwk {
    /// Builds an RS256 signing key entry from encoded modulus and exponent
    pub fn rs256(kid: impl Into<String>, n: impl Into<String>, e: impl Into<String>) -> Self {
        Self {
            kty: "RSA".to_string(),
            key_use: "sig".to_string(),
            alg: "RS256".to_string(),
            kid: kid.into(),
            n: n.into(),
            e: e.into(),
        }
    }
}

/// Set of public keys verifiers accept
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct PublishedKeySet {
    pub keys: Vec<Jwk>,
}

impl PublishedKeySet {
    /// Finds a key by id
    pub fn find(&self, kid: &str) -> Option<&Jwk> {
        self.keys.iter().find(|k| k.kid == kid)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_jwk_serializes_use_field() {
        let set = PublishedKeySet {
            keys: vec![Jwk::rs256("abc123", "modulus", "AQAB")],
        };
        let json = serde_json::to_value(&set).unwrap();

        assert_eq!(json["keys"][0]["use"], "sig");
        assert_eq!(json["keys"][0]["kty"], "RSA");
        assert_eq!(json["keys"][0]["alg"], "RS256");
        assert_eq!(json["keys"][0]["e"], "AQAB");
    }

    #[test]
    fn test_find_by_kid() {
        let set = PublishedKeySet {
            keys: vec![Jwk::rs256("one", "n1", "AQAB"), Jwk::rs256("two", "n2", "AQAB")],
        };
        assert_eq!(set.find("two").map(|k| k.n.as_str()), Some("n2"));
        assert!(set.find("three").is_none());
    }
}
