//! PTV developer credentials.

use std::fmt;

use super::signer::SignError;

/// Developer identifier issued by PTV. Sent in cleartext with every request.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct DevId(String);

impl DevId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for DevId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for DevId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for DevId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl From<u32> for DevId {
    fn from(n: u32) -> Self {
        Self(n.to_string())
    }
}

impl From<u64> for DevId {
    fn from(n: u64) -> Self {
        Self(n.to_string())
    }
}

/// A developer id paired with the private key used to sign requests.
///
/// The key never appears in `Debug` output.
#[derive(Clone)]
pub struct Credentials {
    devid: DevId,
    private_key: String,
}

impl Credentials {
    /// Validate and bundle credentials.
    ///
    /// Both parts must be non-empty.
    pub fn new(devid: impl Into<DevId>, private_key: impl Into<String>) -> Result<Self, SignError> {
        let devid = devid.into();
        let private_key = private_key.into();

        if devid.as_str().trim().is_empty() {
            return Err(SignError::EmptyDevId);
        }
        if private_key.is_empty() {
            return Err(SignError::EmptyKey);
        }

        Ok(Self { devid, private_key })
    }

    pub fn devid(&self) -> &DevId {
        &self.devid
    }

    pub(crate) fn private_key(&self) -> &[u8] {
        self.private_key.as_bytes()
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("devid", &self.devid)
            .field("private_key", &"<redacted>")
            .finish()
    }
}
