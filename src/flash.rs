//! One-shot flash messages carried across a redirect in a signed cookie.
//!
//! Cookie value: `base64url(json(messages)) "." hex(hmac_sha256(key, payload))`.
//! A cookie that fails verification is treated as absent.

use anyhow::{Context, Result};
use base64::engine::general_purpose::URL_SAFE_NO_PAD as BASE64;
use base64::Engine;
use hmac::{Hmac, Mac};
use serde::{Deserialize, Serialize};
use sha2::Sha256;
use std::fmt;

type HmacSha256 = Hmac<Sha256>;

/// Name of the flash cookie.
pub const FLASH_COOKIE: &str = "intake_flash";

/// Severity of a flash message, used as the CSS class when rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FlashLevel {
    Success,
    Warning,
    Danger,
}

impl FlashLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlashLevel::Success => "success",
            FlashLevel::Warning => "warning",
            FlashLevel::Danger => "danger",
        }
    }
}

impl fmt::Display for FlashLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct FlashMessage {
    pub level: FlashLevel,
    pub message: String,
}

impl FlashMessage {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Success,
            message: message.into(),
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Warning,
            message: message.into(),
        }
    }

    pub fn danger(message: impl Into<String>) -> Self {
        Self {
            level: FlashLevel::Danger,
            message: message.into(),
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
pub enum FlashError {
    /// Value is not `payload.signature`, or either half fails to decode.
    Malformed,
    /// Signature does not match the payload under this key.
    BadSignature,
    /// Signature matched but the payload is not a message list.
    Payload(String),
}

impl fmt::Display for FlashError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FlashError::Malformed => write!(f, "Malformed flash cookie"),
            FlashError::BadSignature => write!(f, "Flash cookie signature mismatch"),
            FlashError::Payload(msg) => write!(f, "Invalid flash payload: {}", msg),
        }
    }
}

impl std::error::Error for FlashError {}

/// Signs and verifies flash cookies with a secret key.
#[derive(Clone)]
pub struct FlashCodec {
    mac: HmacSha256,
}

impl fmt::Debug for FlashCodec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FlashCodec").finish_non_exhaustive()
    }
}

impl FlashCodec {
    pub fn new(secret_key: &str) -> Result<Self> {
        if secret_key.is_empty() {
            anyhow::bail!("Flash signing key must not be empty");
        }
        let mac = HmacSha256::new_from_slice(secret_key.as_bytes())
            .map_err(|e| anyhow::anyhow!("Invalid flash signing key: {}", e))?;
        Ok(Self { mac })
    }

    /// Encode and sign `messages` as a cookie value.
    pub fn encode(&self, messages: &[FlashMessage]) -> Result<String> {
        let json = serde_json::to_vec(messages).context("Failed to serialize flash messages")?;
        let payload = BASE64.encode(json);

        let mut mac = self.mac.clone();
        mac.update(payload.as_bytes());
        let signature = hex::encode(mac.finalize().into_bytes());

        Ok(format!("{}.{}", payload, signature))
    }

    /// Verify and decode a cookie value.
    pub fn decode(&self, value: &str) -> Result<Vec<FlashMessage>, FlashError> {
        let (payload, signature) = value.split_once('.').ok_or(FlashError::Malformed)?;
        let signature = hex::decode(signature).map_err(|_| FlashError::Malformed)?;

        let mut mac = self.mac.clone();
        mac.update(payload.as_bytes());
        mac.verify_slice(&signature)
            .map_err(|_| FlashError::BadSignature)?;

        let json = BASE64.decode(payload).map_err(|_| FlashError::Malformed)?;
        serde_json::from_slice(&json).map_err(|e| FlashError::Payload(e.to_string()))
    }

    /// `Set-Cookie` value carrying `messages`.
    pub fn set_cookie(&self, messages: &[FlashMessage]) -> Result<String> {
        Ok(format!(
            "{}={}; Path=/; HttpOnly; SameSite=Lax",
            FLASH_COOKIE,
            self.encode(messages)?
        ))
    }

    /// Read flash messages from a `Cookie` request header. `None` when the
    /// flash cookie is absent.
    pub fn read_cookie_header(&self, header: &str) -> Option<Result<Vec<FlashMessage>, FlashError>> {
        cookie_value(header, FLASH_COOKIE).map(|value| self.decode(value))
    }
}

/// `Set-Cookie` value that deletes the flash cookie.
pub fn clear_cookie() -> String {
    format!("{}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0", FLASH_COOKIE)
}

/// Value of cookie `name` in a `Cookie` header.
pub fn cookie_value<'h>(header: &'h str, name: &str) -> Option<&'h str> {
    header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(k, _)| *k == name)
        .map(|(_, v)| v)
}
