//! Request signing.
//!
//! Every PTV request carries the developer id and an HMAC-SHA1 signature of
//! the request's path and query:
//!
//! 1. `devid=<id>` is appended after any existing query parameters.
//! 2. The MAC input is `path + "?" + query` (devid included).
//! 3. The MAC, keyed with the private key, is hex-encoded in uppercase and
//!    appended as `signature=<hex>`, always the last parameter.

use hmac::{Hmac, Mac};
use sha1::Sha1;
use url::Url;

use super::credentials::Credentials;

type HmacSha1 = Hmac<Sha1>;

/// Length of an encoded signature: two hex digits per SHA-1 output byte.
pub const SIGNATURE_LEN: usize = 40;

/// Errors from building credentials or signing a URL.
///
/// All of these indicate a deployment or programming defect, never a
/// transient fault.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SignError {
    #[error("developer id must not be empty")]
    EmptyDevId,

    #[error("private key must not be empty")]
    EmptyKey,

    /// The MAC could not be keyed
    #[error("private key rejected by HMAC-SHA1")]
    InvalidKey,

    /// The URL already carries a `devid` or `signature` parameter
    #[error("URL is already signed: {0}")]
    AlreadySigned(String),
}

/// Signs request URLs with a fixed set of credentials.
#[derive(Debug, Clone)]
pub struct Signer {
    credentials: Credentials,
}

impl Signer {
    pub fn new(credentials: Credentials) -> Self {
        Self { credentials }
    }

    pub fn credentials(&self) -> &Credentials {
        &self.credentials
    }

    /// Return a copy of `url` with `devid` and `signature` appended.
    ///
    /// # Examples
    ///
    /// ```
    /// use ptv_provider::ptv::{Credentials, Signer};
    /// use url::Url;
    ///
    /// let signer = Signer::new(Credentials::new(135u32, "abcdefg").unwrap());
    /// let url = Url::parse("https://test.example.com?queryParam=BLAH").unwrap();
    ///
    /// assert_eq!(
    ///     signer.sign(&url).unwrap().as_str(),
    ///     "https://test.example.com/?queryParam=BLAH&devid=135&signature=4B3722CFC48ADBB73774A60439602CD60D41D7B0"
    /// );
    /// ```
    pub fn sign(&self, url: &Url) -> Result<Url, SignError> {
        if url
            .query_pairs()
            .any(|(key, _)| key == "devid" || key == "signature")
        {
            return Err(SignError::AlreadySigned(url.to_string()));
        }

        let mut signed = url.clone();
        signed
            .query_pairs_mut()
            .append_pair("devid", self.credentials.devid().as_str());

        let signature = self.signature_for(&signing_input(&signed))?;
        signed.query_pairs_mut().append_pair("signature", &signature);

        Ok(signed)
    }

    /// Uppercase hex HMAC-SHA1 of `input`.
    fn signature_for(&self, input: &str) -> Result<String, SignError> {
        let mut mac = HmacSha1::new_from_slice(self.credentials.private_key())
            .map_err(|_| SignError::InvalidKey)?;
        mac.update(input.as_bytes());
        Ok(hex::encode_upper(mac.finalize().into_bytes()))
    }
}

/// The bytes covered by the signature: path, `?`, query.
fn signing_input(url: &Url) -> String {
    format!("{}?{}", url.path(), url.query().unwrap_or_default())
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Signing the same inputs twice yields the same URL, and the
        /// signature is always the final parameter
        #[test]
        fn stable_and_last(
            devid in 1u32..100_000,
            key in "[a-zA-Z0-9-]{1,40}",
            segment in "[a-zA-Z0-9 ]{1,20}",
        ) {
            let signer = Signer::new(Credentials::new(devid, key).unwrap());
            let mut u = Url::parse("https://h.example/v2/search").unwrap();
            u.path_segments_mut().unwrap().push(&segment);

            let first = signer.sign(&u).unwrap();
            let second = signer.sign(&u).unwrap();
            prop_assert_eq!(&first, &second);

            let pairs: Vec<(String, String)> = first
                .query_pairs()
                .map(|(k, v)| (k.into_owned(), v.into_owned()))
                .collect();
            prop_assert_eq!(pairs.len(), 2);
            prop_assert_eq!(&pairs[0], &("devid".to_string(), devid.to_string()));
            prop_assert_eq!(pairs[1].0.as_str(), "signature");
            prop_assert_eq!(pairs[1].1.len(), SIGNATURE_LEN);
        }
    }
}
