use thiserror::Error;

/// Failure talking to the analysis backend.
///
/// `Display` is the single-line message shown to the user; it never carries a
/// backtrace or anything beyond the underlying error's string form.
#[derive(Debug, Error)]
pub enum RequestFailure {
    #[error("Não foi possível conectar ao servidor. Verifique se o backend está rodando.")]
    Connection,

    #[error("O servidor não respondeu dentro de {seconds}s. Tente novamente mais tarde.")]
    Timeout { seconds: u64 },

    #[error("Erro inesperado na requisição: {0}")]
    Transport(String),

    #[error("Erro do servidor ({status}): {detail}")]
    Server { status: u16, detail: String },
}

impl RequestFailure {
    /// HTTP status code, present only when the server answered with a non-success status.
    pub fn status_code(&self) -> Option<u16> {
        match self {
            RequestFailure::Server { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Maps a transport error onto the failure taxonomy.
    /// A connect error wins over a timeout when reqwest reports both.
    pub fn from_transport(err: reqwest::Error, timeout_secs: u64) -> Self {
        if err.is_connect() {
            RequestFailure::Connection
        } else if err.is_timeout() {
            RequestFailure::Timeout {
                seconds: timeout_secs,
            }
        } else {
            RequestFailure::Transport(err.to_string())
        }
    }
}
