/// Log tags for the Orbit modules
///
/// Each tag maps to a --debug-<key> flag via `to_debug_key`.

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum LogTag {
    System,
    Chat,
    Solver,
    Wallet,
    Session,
    Tx,
    Config,
    Test,
    Other(String),
}

impl LogTag {
    /// Display name used in log lines
    pub fn as_str(&self) -> &str {
        match self {
            LogTag::System => "SYSTEM",
            LogTag::Chat => "CHAT",
            LogTag::Solver => "SOLVER",
            LogTag::Wallet => "WALLET",
            LogTag::Session => "SESSION",
            LogTag::Tx => "TX",
            LogTag::Config => "CONFIG",
            LogTag::Test => "TEST",
            LogTag::Other(name) => name,
        }
    }

    /// Key matched against --debug-<key> / --verbose-<key> flags
    pub fn to_debug_key(&self) -> String {
        self.as_str().to_lowercase()
    }
}

impl std::fmt::Display for LogTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
