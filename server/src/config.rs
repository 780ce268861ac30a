use std::str::FromStr;

use error_stack::{Report, ResultExt};
use kernel::KernelError;

const PORT: &str = "PORT";
const BOOK_STORE: &str = "BOOK_STORE";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BookStore {
    #[default]
    Postgres,
    Memory,
}

impl FromStr for BookStore {
    type Err = Report<KernelError>;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "postgres" => Ok(Self::Postgres),
            "memory" => Ok(Self::Memory),
            other => Err(Report::new(KernelError::Internal)
                .attach_printable(format!("Unknown {BOOK_STORE}: {other}"))),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ServerConfig {
    port: u16,
    store: BookStore,
}

impl ServerConfig {
    /// Reads the process environment, `.env` included.
    pub fn from_env() -> error_stack::Result<Self, KernelError> {
        Self::from_values(dotenvy::var(PORT).ok(), dotenvy::var(BOOK_STORE).ok())
    }

    fn from_values(
        port: Option<String>,
        store: Option<String>,
    ) -> error_stack::Result<Self, KernelError> {
        let port = port
            .ok_or_else(|| Report::new(KernelError::Internal))
            .attach_printable_lazy(|| format!("{PORT} is not set"))?;
        let port = port
            .trim()
            .parse::<u16>()
            .change_context_lazy(|| KernelError::Internal)
            .attach_printable_lazy(|| format!("{PORT} is not a port number: {port}"))?;
        let store = store
            .map(|store| store.parse::<BookStore>())
            .transpose()?
            .unwrap_or_default();
        Ok(Self { port, store })
    }

    pub fn port(&self) -> u16 {
        self.port
    }

    pub fn store(&self) -> BookStore {
        self.store
    }
}

#[cfg(test)]
mod test {
    use crate::config::{BookStore, ServerConfig};

    #[test]
    fn port_is_required() {
        assert!(ServerConfig::from_values(None, None).is_err());
        assert!(ServerConfig::from_values(Some("http".to_string()), None).is_err());
    }

    #[test]
    fn store_defaults_to_postgres() {
        let config = ServerConfig::from_values(Some("3000".to_string()), None).unwrap();
        assert_eq!(config.port(), 3000);
        assert_eq!(config.store(), BookStore::Postgres);
    }

    #[test]
    fn store_can_be_selected() {
        let config =
            ServerConfig::from_values(Some("3000".to_string()), Some("memory".to_string()))
                .unwrap();
        assert_eq!(config.store(), BookStore::Memory);
        assert!(
            ServerConfig::from_values(Some("3000".to_string()), Some("mongo".to_string())).is_err()
        );
    }
}
