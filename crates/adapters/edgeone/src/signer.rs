//! TC3-HMAC-SHA256 request signing.

use hmac::{Hmac, Mac};
use sha2::{Digest, Sha256};

use purgehub_domain::time::Timestamp;

use crate::error::EdgeOneError;

type HmacSha256 = Hmac<Sha256>;

const ALGORITHM: &str = "TC3-HMAC-SHA256";
const SERVICE: &str = "teo";
const TERMINATOR: &str = "tc3_request";

/// Content type sent with, and signed into, every request.
pub(crate) const CONTENT_TYPE: &str = "application/json; charset=utf-8";
const SIGNED_HEADERS: &str = "content-type;host;x-tc-action";

/// What goes into one signature.
pub(crate) struct SigningInput<'a> {
    pub secret_id: &'a str,
    pub secret_key: &'a str,
    /// `Host` header value, including a non-default port.
    pub host: &'a str,
    pub action: &'a str,
    pub payload: &'a [u8],
    pub at: Timestamp,
}

fn sha256_hex(data: &[u8]) -> String {
    hex::encode(Sha256::digest(data))
}

fn hmac_sha256(key: &[u8], message: &str) -> Result<Vec<u8>, EdgeOneError> {
    let mut mac = HmacSha256::new_from_slice(key)?;
    mac.update(message.as_bytes());
    Ok(mac.finalize().into_bytes().to_vec())
}

/// Build the `Authorization` header value for a POST to `/`.
pub(crate) fn authorization(input: &SigningInput<'_>) -> Result<String, EdgeOneError> {
    let date = input.at.format("%Y-%m-%d").to_string();
    let timestamp = input.at.timestamp();

    let canonical_headers = format!(
        "content-type:{CONTENT_TYPE}\nhost:{}\nx-tc-action:{}\n",
        input.host,
        input.action.to_lowercase()
    );
    let canonical_request = format!(
        "POST\n/\n\n{canonical_headers}\n{SIGNED_HEADERS}\n{}",
        sha256_hex(input.payload)
    );

    let scope = format!("{date}/{SERVICE}/{TERMINATOR}");
    let string_to_sign = format!(
        "{ALGORITHM}\n{timestamp}\n{scope}\n{}",
        sha256_hex(canonical_request.as_bytes())
    );

    let secret_date = hmac_sha256(format!("TC3{}", input.secret_key).as_bytes(), &date)?;
    let secret_service = hmac_sha256(&secret_date, SERVICE)?;
    let secret_signing = hmac_sha256(&secret_service, TERMINATOR)?;
    let signature = hex::encode(hmac_sha256(&secret_signing, &string_to_sign)?);

    Ok(format!(
        "{ALGORITHM} Credential={}/{scope}, SignedHeaders={SIGNED_HEADERS}, Signature={signature}",
        input.secret_id
    ))
}
