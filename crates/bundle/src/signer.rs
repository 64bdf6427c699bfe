use crate::{BundleRequest, SigningError};
use alloy::{
    primitives::{keccak256, Address, Bytes, Signature, B256},
    signers::{local::PrivateKeySigner, Signer},
};
use tracing::{debug, instrument};

/// The header carrying the request signature.
pub const SIGNATURE_HEADER: &str = "x-auction-signature";

/// A bundle request together with the exact bytes that were signed.
///
/// # Signature
///
/// - The body is serialized once, to the bytes in [`Self::payload`].
/// - The digest is `keccak256(payload)`.
/// - The signer signs the EIP-191 personal message whose text is the
///   `0x`-prefixed lowercase hex of the digest.
///
/// The relay repeats these steps over the posted bytes, so the payload must be
/// sent unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SignedRequest {
    body: BundleRequest,
    payload: Bytes,
    digest: B256,
    signer: Address,
    signature: Signature,
}

impl SignedRequest {
    /// Get the request body.
    pub const fn body(&self) -> &BundleRequest {
        &self.body
    }

    /// Get the serialized body, exactly as signed.
    pub const fn payload(&self) -> &Bytes {
        &self.payload
    }

    /// Get the digest of the payload.
    pub const fn digest(&self) -> B256 {
        self.digest
    }

    /// Get the signer address.
    pub const fn signer(&self) -> Address {
        self.signer
    }

    /// Get the signature.
    pub const fn signature(&self) -> &Signature {
        &self.signature
    }

    /// The message text that was signed.
    pub fn signed_message(&self) -> String {
        digest_message(self.digest)
    }

    /// The value of the [`SIGNATURE_HEADER`] header:
    /// `<lowercase hex address>:<lowercase hex signature>`, without `0x`
    /// prefixes.
    pub fn header_value(&self) -> String {
        format!("{}:{}", hex::encode(self.signer), hex::encode(self.signature.as_bytes()))
    }

    /// Check that the payload hashes to the digest and that the signature
    /// recovers to the signer.
    pub fn verify(&self) -> bool {
        keccak256(&self.payload) == self.digest
            && self
                .signature
                .recover_address_from_msg(self.signed_message())
                .is_ok_and(|recovered| recovered == self.signer)
    }
}

fn digest_message(digest: B256) -> String {
    hex::encode_prefixed(digest)
}

/// Signs bundle requests with a single key.
#[derive(Debug, Clone)]
pub struct RequestSigner<S = PrivateKeySigner> {
    signer: S,
}

impl RequestSigner<PrivateKeySigner> {
    /// Create a signer from a hex private key, with or without `0x` prefix.
    pub fn from_private_key(key: &str) -> Result<Self, SigningError> {
        let key = key.trim();
        if key.is_empty() || key == "0x" {
            return Err(SigningError::MissingKey);
        }
        key.parse::<PrivateKeySigner>().map(Self::new).map_err(Into::into)
    }
}

impl<S> RequestSigner<S> {
    /// Create a new request signer.
    pub const fn new(signer: S) -> Self {
        Self { signer }
    }

    /// Get a reference to the signer.
    pub const fn signer(&self) -> &S {
        &self.signer
    }
}

impl<S> RequestSigner<S>
where
    S: Signer + Send + Sync,
{
    /// The address requests are signed by.
    pub fn address(&self) -> Address {
        self.signer.address()
    }

    /// Serialize, hash and sign a request body.
    #[instrument(skip_all, fields(method = %body.method(), block = body.block_number()))]
    pub async fn sign(&self, body: BundleRequest) -> Result<SignedRequest, SigningError> {
        let payload = Bytes::from(body.serialized()?);
        let digest = keccak256(&payload);
        let signature = self.signer.sign_message(digest_message(digest).as_bytes()).await?;

        debug!(%digest, txs = body.txs().len(), "signed bundle request");

        Ok(SignedRequest { body, payload, digest, signer: self.signer.address(), signature })
    }
}
