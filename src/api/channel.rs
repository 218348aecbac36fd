//! Connection lifecycle shared by the data and streaming clients
//!
//! A channel is `Open` until a call fails at the transport level (it becomes
//! `Faulted`) or until it is shut down (`Closed`). [`shutdown`] is total over
//! those states and never returns an error.

use crate::error::ApiError;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelState {
    Open,
    Faulted,
    Closed,
}

impl fmt::Display for ChannelState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            ChannelState::Open => "open",
            ChannelState::Faulted => "faulted",
            ChannelState::Closed => "closed",
        };
        f.write_str(label)
    }
}

pub trait Channel {
    fn state(&self) -> ChannelState;

    /// Graceful close. Only meaningful on an `Open` channel.
    fn close(&mut self) -> Result<(), ApiError>;

    /// Hard teardown, always succeeds
    fn abort(&mut self);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShutdownOutcome {
    AlreadyClosed,
    Closed,
    Aborted,
}

pub fn shutdown<C: Channel + ?Sized>(channel: &mut C) -> ShutdownOutcome {
    match channel.state() {
        ChannelState::Closed => ShutdownOutcome::AlreadyClosed,
        ChannelState::Faulted => {
            channel.abort();
            ShutdownOutcome::Aborted
        }
        ChannelState::Open => match channel.close() {
            Ok(()) => ShutdownOutcome::Closed,
            Err(e) => {
                log::debug!("Graceful close failed, aborting channel: {}", e);
                channel.abort();
                ShutdownOutcome::Aborted
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct RecordingChannel {
        state: ChannelState,
        fail_close: bool,
        close_calls: u32,
        abort_calls: u32,
    }

    impl RecordingChannel {
        fn new(state: ChannelState) -> Self {
            Self {
                state,
                fail_close: false,
                close_calls: 0,
                abort_calls: 0,
            }
        }
    }

    impl Channel for RecordingChannel {
        fn state(&self) -> ChannelState {
            self.state
        }

        fn close(&mut self) -> Result<(), ApiError> {
            self.close_calls += 1;
            if self.fail_close {
                return Err(ApiError::Transport {
                    endpoint: "test".to_string(),
                    message: "close failed".to_string(),
                });
            }
            self.state = ChannelState::Closed;
            Ok(())
        }

        fn abort(&mut self) {
            self.abort_calls += 1;
            self.state = ChannelState::Closed;
        }
    }

    #[test]
    fn test_open_channel_closes_gracefully() {
        let mut channel = RecordingChannel::new(ChannelState::Open);
        assert_eq!(shutdown(&mut channel), ShutdownOutcome::Closed);
        assert_eq!(channel.close_calls, 1);
        assert_eq!(channel.abort_calls, 0);
        assert_eq!(channel.state, ChannelState::Closed);
    }

    #[test]
    fn test_faulted_channel_is_aborted_without_close() {
        let mut channel = RecordingChannel::new(ChannelState::Faulted);
        assert_eq!(shutdown(&mut channel), ShutdownOutcome::Aborted);
        assert_eq!(channel.close_calls, 0);
        assert_eq!(channel.abort_calls, 1);
    }

    #[test]
    fn test_failed_close_falls_back_to_abort() {
        let mut channel = RecordingChannel::new(ChannelState::Open);
        channel.fail_close = true;
        assert_eq!(shutdown(&mut channel), ShutdownOutcome::Aborted);
        assert_eq!(channel.close_calls, 1);
        assert_eq!(channel.abort_calls, 1);
        assert_eq!(channel.state, ChannelState::Closed);
    }

    #[test]
    fn test_closed_channel_is_left_alone() {
        let mut channel = RecordingChannel::new(ChannelState::Closed);
        assert_eq!(shutdown(&mut channel), ShutdownOutcome::AlreadyClosed);
        assert_eq!(channel.close_calls + channel.abort_calls, 0);
    }

    #[test]
    fn test_shutdown_through_trait_object() {
        let mut boxed: Box<dyn Channel> = Box::new(RecordingChannel::new(ChannelState::Faulted));
        assert_eq!(shutdown(boxed.as_mut()), ShutdownOutcome::Aborted);
        assert_eq!(boxed.state(), ChannelState::Closed);
    }
}
