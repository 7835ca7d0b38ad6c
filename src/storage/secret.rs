//! API credential storage
//!
//! The API key never touches the settings file; it lives in the platform
//! secret store under a fixed service/account pair.

use keyring::Entry;
use thiserror::Error;

const SERVICE: &str = "prompt-desk";
const ACCOUNT: &str = "openai_api_key";

/// Secret-store errors
#[derive(Debug, Error)]
pub enum SecretError {
    #[error("Secret store error: {0}")]
    Keyring(#[from] keyring::Error),
}

fn entry() -> Result<Entry, SecretError> {
    Ok(Entry::new(SERVICE, ACCOUNT)?)
}

/// Read the stored API key
///
/// An absent entry is not an error; it just means no key has been saved yet.
pub fn load_api_key() -> Result<Option<String>, SecretError> {
    match entry()?.get_password() {
        Ok(key) => Ok(Some(key)),
        Err(keyring::Error::NoEntry) => Ok(None),
        Err(e) => Err(e.into()),
    }
}

/// Store the API key, overwriting any previous value
pub fn save_api_key(key: &str) -> Result<(), SecretError> {
    entry()?.set_password(key)?;
    tracing::debug!("Saved API key to secret store");
    Ok(())
}
