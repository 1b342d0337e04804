use core::fmt;

/// Errors returned by the exchange controller.
///
/// Underruns and overlapping completions are not errors: they are counted in
/// [`ExchangeStats`](crate::io::ExchangeStats) and the stream keeps running.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum StreamError<E> {
    /// `step`/`poll` called before the initial transfer was submitted.
    NotStarted,
    /// `submit_initial` called on a stream that is already running.
    AlreadyStarted,
    /// The transport rejected a transfer.
    Transport(E),
}

impl<E: fmt::Debug> fmt::Display for StreamError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StreamError::NotStarted => f.write_str("stream not started"),
            StreamError::AlreadyStarted => f.write_str("stream already started"),
            StreamError::Transport(e) => write!(f, "transport rejected transfer: {e:?}"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(StreamError::<()>::NotStarted.to_string(), "stream not started");
        assert_eq!(StreamError::<()>::AlreadyStarted.to_string(), "stream already started");
        assert_eq!(
            StreamError::Transport(5u8).to_string(),
            "transport rejected transfer: 5"
        );
    }
}
