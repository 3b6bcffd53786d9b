use std::net::{IpAddr, SocketAddr};

use anyhow::{Context, Result, anyhow};

use crate::liker::LikerPolicy;

#[derive(Clone, Debug)]
pub struct Config {
    pub db_url: String,
    pub key_prefix: String,
    pub bind_addr: SocketAddr,
    pub liker: LikerPolicy,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let db_url = var("DB").ok_or_else(|| anyhow!("DB not set"))?;

        let host: IpAddr = var("BIND_ADDR")
            .unwrap_or_else(|| "0.0.0.0".to_string())
            .parse()
            .context("BIND_ADDR is not an IP address")?;
        let port: u16 = var("PORT")
            .unwrap_or_else(|| "3000".to_string())
            .parse()
            .context("PORT is not a port number")?;

        Ok(Self {
            db_url,
            key_prefix: var("REDIS_KEY_PREFIX").unwrap_or_else(|| "stock-prices".to_string()),
            bind_addr: SocketAddr::new(host, port),
            liker: LikerPolicy {
                trust_proxy: flag(&var, "TRUST_PROXY", false)?,
                anonymize: flag(&var, "ANONYMIZE_IPS", true)?,
            },
        })
    }
}

fn flag(var: &impl Fn(&str) -> Option<String>, key: &str, default: bool) -> Result<bool> {
    match var(key) {
        None => Ok(default),
        Some(raw) => match raw.trim().to_ascii_lowercase().as_str() {
            "1" | "true" | "yes" | "on" => Ok(true),
            "0" | "false" | "no" | "off" => Ok(false),
            _ => Err(anyhow!("{key} must be a boolean, got {raw:?}")),
        },
    }
}
