//! Derives the identifier a like is recorded under.
use std::net::IpAddr;

use axum::http::HeaderMap;
use sha2::{Digest, Sha256};

const FORWARDED_FOR: &str = "x-forwarded-for";

#[derive(Clone, Debug, Default)]
pub struct LikerPolicy {
    /// Take the client address from the first `X-Forwarded-For` hop.
    pub trust_proxy: bool,
    /// Store a SHA-256 digest instead of the raw address.
    pub anonymize: bool,
}

impl LikerPolicy {
    pub fn identify(&self, peer: IpAddr, headers: &HeaderMap) -> String {
        let ip = if self.trust_proxy {
            forwarded_client(headers).unwrap_or(peer)
        } else {
            peer
        };
        let ip = ip.to_canonical().to_string();

        if self.anonymize {
            hex::encode(Sha256::digest(ip.as_bytes()))
        } else {
            ip
        }
    }
}

fn forwarded_client(headers: &HeaderMap) -> Option<IpAddr> {
    headers
        .get(FORWARDED_FOR)?
        .to_str()
        .ok()?
        .split(',')
        .next()?
        .trim()
        .parse()
        .ok()
}
