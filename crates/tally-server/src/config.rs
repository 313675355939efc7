//! Environment-driven configuration

use anyhow::{Context, Result};

pub const DEFAULT_PORT: u16 = 3000;

/// Connection-string fragments of managed database hosts whose certificates
/// routinely fail CA validation. Matched case-insensitively.
const MANAGED_HOSTS: [&str; 9] = [
    "amazonaws",
    "render",
    "railway",
    "supabase",
    "azure",
    "gcp",
    "neon",
    "timescale",
    "heroku",
];

#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    /// `None` when `DATABASE_URL` is unset or empty; selects the in-memory
    /// store.
    pub database_url: Option<String>,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        let port = match std::env::var("PORT") {
            Ok(raw) => raw
                .parse()
                .with_context(|| format!("Invalid PORT value: {}", raw))?,
            Err(_) => DEFAULT_PORT,
        };

        let database_url = std::env::var("DATABASE_URL")
            .ok()
            .filter(|url| !url.is_empty());

        Ok(Self { port, database_url })
    }
}

/// Heuristic substring match, not protocol negotiation: known managed
/// hosting providers get relaxed certificate verification.
pub fn relaxed_tls(database_url: &str) -> bool {
    let url = database_url.to_ascii_lowercase();
    MANAGED_HOSTS.iter().any(|host| url.contains(host))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn managed_hosts_relax_tls() {
        assert!(relaxed_tls(
            "postgres://user:pw@db.abc123.us-east-1.rds.amazonaws.com/app"
        ));
        assert!(relaxed_tls("postgres://user:pw@ep-x.neon.tech/app"));
        assert!(relaxed_tls("postgres://user:pw@db.supabase.co/app"));
    }

    #[test]
    fn matching_is_case_insensitive() {
        assert!(relaxed_tls("postgres://user:pw@DB.AMAZONAWS.COM/app"));
        assert!(relaxed_tls("postgres://user:pw@My-Heroku-Db/app"));
    }

    #[test]
    fn unknown_hosts_keep_standard_verification() {
        assert!(!relaxed_tls("postgres://user:pw@localhost:5432/app"));
        assert!(!relaxed_tls("postgres://user:pw@db.internal.corp/app"));
    }
}
