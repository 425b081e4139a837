//! Session id minting and token issuance.

use crate::errors::EncodeError;
use crate::token::{IssuedSession, SessionToken};
use crate::wire::encode;
use rand::Rng;
use rollcall_claims::{LocationClaim, SessionId, Timestamp};
use std::collections::HashSet;

/// The 36-symbol alphabet session ids are drawn from.
pub const SESSION_ID_ALPHABET: &[u8; 36] = b"0123456789abcdefghijklmnopqrstuvwxyz";

/// Options for token issuance.
#[derive(Debug, Clone)]
pub struct IssueOptions {
    /// Length of generated session ids (default: 8).
    pub session_id_length: usize,
}

impl Default for IssueOptions {
    fn default() -> Self {
        Self {
            session_id_length: 8,
        }
    }
}

/// Mints session tokens with process-unique session ids.
///
/// Ids are drawn from a non-cryptographic random source; collisions with
/// ids minted by other processes are possible and accepted as a protocol
/// limitation. Within one issuer, every id is unique: the issuer keeps
/// the set of ids it has handed out and redraws on collision.
#[derive(Debug, Default)]
pub struct TokenIssuer {
    options: IssueOptions,
    issued: HashSet<SessionId>,
}

impl TokenIssuer {
    /// Creates an issuer with default options.
    pub fn new() -> Self {
        Self::with_options(IssueOptions::default())
    }

    /// Creates an issuer with the given options.
    pub fn with_options(options: IssueOptions) -> Self {
        Self {
            options,
            issued: HashSet::new(),
        }
    }

    /// Issues a token for `claim`: mints a fresh session id, stamps the
    /// issuance time, and encodes the transport string.
    pub fn issue(&mut self, claim: LocationClaim) -> Result<IssuedSession, EncodeError> {
        let session_id = self.mint_session_id();
        let token = SessionToken::new(claim, Timestamp::now(), session_id);
        let transport = encode(&token)?;
        Ok(IssuedSession { token, transport })
    }

    /// Number of session ids handed out so far.
    pub fn issued_count(&self) -> usize {
        self.issued.len()
    }

    fn mint_session_id(&mut self) -> SessionId {
        let mut rng = rand::thread_rng();
        loop {
            let raw: String = (0..self.options.session_id_length.max(1))
                .map(|_| SESSION_ID_ALPHABET[rng.gen_range(0..SESSION_ID_ALPHABET.len())] as char)
                .collect();
            let id = SessionId::new(raw);
            if self.issued.insert(id.clone()) {
                return id;
            }
        }
    }
}
