//! PAT-based credential for the Azure DevOps work item tracking API.
//!
//! Azure DevOps accepts a Personal Access Token as the password of a Basic
//! credential with an empty username. The same credential feeds both the
//! generated SDK client and the raw attachment upload request.

use secrecy::{ExposeSecret, SecretString};

/// PAT-based credential for Azure DevOps authentication.
///
/// The PAT is stored using `SecretString` and never printed.
///
/// # Example
///
/// ```rust,no_run
/// use wit_gateway::api::PatCredential;
/// use secrecy::SecretString;
///
/// let credential = PatCredential::new(SecretString::from("your-pat-token".to_string()));
/// let sdk_credential = credential.to_sdk_credential();
/// ```
#[derive(Clone)]
pub struct PatCredential {
    pat: SecretString,
}

impl PatCredential {
    /// Creates a new PAT credential from a SecretString.
    pub fn new(pat: SecretString) -> Self {
        Self { pat }
    }

    /// Creates a new PAT credential from a plain string.
    pub fn from_string(pat: String) -> Self {
        Self {
            pat: SecretString::from(pat),
        }
    }

    /// Converts into the credential type used by `azure_devops_rust_api` clients.
    ///
    /// The SDK encodes the PAT as Basic auth with an empty username.
    pub fn to_sdk_credential(&self) -> azure_devops_rust_api::Credential {
        azure_devops_rust_api::Credential::from_pat(self.pat.expose_secret().to_string())
    }

    /// Applies the Basic credential to a raw `reqwest` request.
    pub fn apply(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        request.basic_auth("", Some(self.pat.expose_secret()))
    }
}

impl std::fmt::Debug for PatCredential {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PatCredential")
            .field("pat", &"[REDACTED]")
            .finish()
    }
}
