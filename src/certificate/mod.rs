//! TLS certificate validation for HTTPS targets.
//!
//! A validation opens a fresh TLS connection, lets rustls verify the chain
//! and the host name, then reads the leaf certificate's `notAfter` and
//! compares it against the required validity horizon. Nothing is cached.

mod error;

pub use error::*;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rustls::pki_types::ServerName;
use std::sync::Arc;
use std::time::Duration;
use tokio::io::AsyncWriteExt;
use tokio::net::TcpStream;
use tokio_rustls::TlsConnector;

/// What a successful handshake told us about the leaf certificate.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CertificateInfo {
    /// Subject distinguished name
    pub subject: String,
    /// Expiry of the leaf certificate
    pub not_after: DateTime<Utc>,
}

/// Checks the certificate presented by `host:port`.
#[async_trait]
pub trait CertificateValidator: Send + Sync {
    async fn validate(
        &self,
        host: &str,
        port: u16,
        min_validity: Duration,
    ) -> Result<CertificateInfo, CertificateError>;
}

/// Fail when the certificate expires before `now + min_validity`.
pub fn check_expiry(
    info: &CertificateInfo,
    now: DateTime<Utc>,
    min_validity: Duration,
) -> Result<(), CertificateError> {
    let required_until = chrono::Duration::from_std(min_validity)
        .ok()
        .and_then(|horizon| now.checked_add_signed(horizon))
        .unwrap_or(DateTime::<Utc>::MAX_UTC);

    if info.not_after < required_until {
        return Err(CertificateError::ExpiresTooSoon {
            not_after: info.not_after,
            required_until,
        });
    }

    Ok(())
}

/// rustls-backed validator. [`TlsCertificateValidator::new`] trusts the Mozilla root store.
pub struct TlsCertificateValidator {
    connector: TlsConnector,
    connect_timeout: Duration,
}

impl TlsCertificateValidator {
    /// Build a validator. `connect_timeout` bounds TCP connect plus handshake.
    pub fn new(connect_timeout: Duration) -> Result<Self, rustls::Error> {
        let mut roots = rustls::RootCertStore::empty();
        roots.extend(webpki_roots::TLS_SERVER_ROOTS.iter().cloned());

        Self::with_roots(roots, connect_timeout)
    }

    /// Build a validator trusting only `roots`.
    pub fn with_roots(
        roots: rustls::RootCertStore,
        connect_timeout: Duration,
    ) -> Result<Self, rustls::Error> {
        let config = rustls::ClientConfig::builder_with_provider(Arc::new(
            rustls::crypto::ring::default_provider(),
        ))
        .with_safe_default_protocol_versions()?
        .with_root_certificates(roots)
        .with_no_client_auth();

        Ok(Self {
            connector: TlsConnector::from(Arc::new(config)),
            connect_timeout,
        })
    }

    async fn fetch(&self, host: &str, port: u16) -> Result<CertificateInfo, CertificateError> {
        let server_name = ServerName::try_from(host.to_string()).map_err(|e| {
            CertificateError::Handshake(format!("invalid server name '{}': {}", host, e))
        })?;

        let tcp = TcpStream::connect((host, port))
            .await
            .map_err(|e| CertificateError::Handshake(e.to_string()))?;

        let mut stream = self
            .connector
            .connect(server_name, tcp)
            .await
            .map_err(classify_handshake_error)?;

        let info = {
            let (_, session) = stream.get_ref();
            session
                .peer_certificates()
                .and_then(|chain| chain.first())
                .ok_or_else(|| CertificateError::Unreadable("no certificate presented".to_string()))
                .and_then(|leaf| parse_leaf(leaf.as_ref()))
        };

        // close_notify; the stream itself is dropped on return
        if let Err(e) = stream.shutdown().await {
            tracing::trace!(host, error = %e, "TLS shutdown failed");
        }

        info
    }
}

#[async_trait]
impl CertificateValidator for TlsCertificateValidator {
    async fn validate(
        &self,
        host: &str,
        port: u16,
        min_validity: Duration,
    ) -> Result<CertificateInfo, CertificateError> {
        // IPv6 literals arrive bracketed from the URL
        let host = host.trim_start_matches('[').trim_end_matches(']');

        let info = tokio::time::timeout(self.connect_timeout, self.fetch(host, port))
            .await
            .map_err(|_| {
                CertificateError::Handshake(format!(
                    "timed out after {}s",
                    self.connect_timeout.as_secs()
                ))
            })??;

        check_expiry(&info, Utc::now(), min_validity)?;

        tracing::debug!(
            host,
            subject = %info.subject,
            not_after = %info.not_after,
            "Certificate valid"
        );

        Ok(info)
    }
}

fn parse_leaf(der: &[u8]) -> Result<CertificateInfo, CertificateError> {
    let (_, cert) = x509_parser::parse_x509_certificate(der)
        .map_err(|e| CertificateError::Unreadable(e.to_string()))?;

    let timestamp = cert.validity().not_after.timestamp();
    let not_after = DateTime::from_timestamp(timestamp, 0).ok_or_else(|| {
        CertificateError::Unreadable(format!("notAfter out of range: {}", timestamp))
    })?;

    Ok(CertificateInfo {
        subject: cert.subject().to_string(),
        not_after,
    })
}

fn classify_handshake_error(err: std::io::Error) -> CertificateError {
    let mismatch = err
        .get_ref()
        .and_then(|inner| inner.downcast_ref::<rustls::Error>())
        .is_some_and(|e| {
            matches!(
                e,
                rustls::Error::InvalidCertificate(
                    rustls::CertificateError::NotValidForName
                        | rustls::CertificateError::NotValidForNameContext { .. }
                )
            )
        });

    if mismatch {
        CertificateError::HostnameMismatch(err.to_string())
    } else {
        CertificateError::Handshake(err.to_string())
    }
}
