//! Password entry as an explicit state machine.
//!
//! The host asks `prompt()` what to show, collects the user's answer, and
//! feeds it back through `handle()`. The flow owns the pending password
//! until it reaches `Ready`, where `take_password()` hands it over.
//!
//! ```text
//! AwaitPassword --Submit--> (validate) --invalid--> WarnWeak
//!                                      --valid----> AwaitConfirmation | Ready
//! WarnWeak --UseAnyway--> AwaitConfirmation | Ready
//! WarnWeak --ChangePassword--> AwaitPassword
//! AwaitConfirmation --Submit(same)--> Ready
//! AwaitConfirmation --Submit(other)--> AwaitPassword (mismatch notice)
//! any --Cancel--> Cancelled
//! ```

use zeroize::Zeroizing;

use super::policy::{PasswordPolicy, PasswordVerdict};

/// What the password is going to be used for.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlowMode {
    /// New password: validated, optionally confirmed.
    Encrypt,
    /// Existing password: accepted as typed.
    Decrypt,
}

/// Input fed into the flow by the host.
pub enum FlowEvent {
    Submit(Zeroizing<String>),
    /// Accept a password the policy rejected.
    UseAnyway,
    /// Go back and type a different password.
    ChangePassword,
    Cancel,
}

/// What the host should ask the user next.
#[derive(Debug, Clone, PartialEq)]
pub enum Prompt {
    EnterPassword { notice: Option<String> },
    ConfirmPassword,
    WeakPassword(PasswordVerdict),
    Ready,
    Cancelled,
}

enum State {
    AwaitPassword { notice: Option<String> },
    AwaitConfirmation { password: Zeroizing<String> },
    WarnWeak {
        password: Zeroizing<String>,
        verdict: PasswordVerdict,
    },
    Ready { password: Zeroizing<String> },
    Cancelled,
}

pub struct PasswordFlow {
    mode: FlowMode,
    policy: PasswordPolicy,
    confirm: bool,
    state: State,
}

impl PasswordFlow {
    /// Start a flow. `confirm` only applies to `FlowMode::Encrypt`.
    pub fn new(mode: FlowMode, policy: PasswordPolicy, confirm: bool) -> Self {
        Self {
            mode,
            policy,
            confirm,
            state: State::AwaitPassword { notice: None },
        }
    }

    pub fn prompt(&self) -> Prompt {
        match &self.state {
            State::AwaitPassword { notice } => Prompt::EnterPassword {
                notice: notice.clone(),
            },
            State::AwaitConfirmation { .. } => Prompt::ConfirmPassword,
            State::WarnWeak { verdict, .. } => Prompt::WeakPassword(verdict.clone()),
            State::Ready { .. } => Prompt::Ready,
            State::Cancelled => Prompt::Cancelled,
        }
    }

    pub fn is_finished(&self) -> bool {
        matches!(self.state, State::Ready { .. } | State::Cancelled)
    }

    /// Advance the flow. Events that make no sense in the current state
    /// are ignored; terminal states ignore everything.
    pub fn handle(&mut self, event: FlowEvent) {
        let state = std::mem::replace(&mut self.state, State::Cancelled);
        self.state = match (state, event) {
            (State::Ready { password }, _) => State::Ready { password },
            (State::Cancelled, _) => State::Cancelled,
            (_, FlowEvent::Cancel) => State::Cancelled,

            (State::AwaitPassword { .. }, FlowEvent::Submit(password)) => self.submitted(password),

            (State::WarnWeak { password, .. }, FlowEvent::UseAnyway) => self.accepted(password),
            (State::WarnWeak { .. }, FlowEvent::ChangePassword) => {
                State::AwaitPassword { notice: None }
            }

            (State::AwaitConfirmation { password }, FlowEvent::Submit(confirmation)) => {
                if *password == *confirmation {
                    State::Ready { password }
                } else {
                    State::AwaitPassword {
                        notice: Some("Passwords do not match".into()),
                    }
                }
            }

            (state, _) => state,
        };
    }

    /// Hand over the accepted password, leaving the flow cancelled.
    ///
    /// Returns `None` unless the flow is `Ready`.
    pub fn take_password(&mut self) -> Option<Zeroizing<String>> {
        match std::mem::replace(&mut self.state, State::Cancelled) {
            State::Ready { password } => Some(password),
            other => {
                self.state = other;
                None
            }
        }
    }

    fn submitted(&self, password: Zeroizing<String>) -> State {
        if self.mode == FlowMode::Decrypt {
            return State::Ready { password };
        }
        let verdict = self.policy.validate(&password);
        if verdict.valid {
            self.accepted(password)
        } else {
            State::WarnWeak { password, verdict }
        }
    }

    fn accepted(&self, password: Zeroizing<String>) -> State {
        if self.mode == FlowMode::Encrypt && self.confirm {
            State::AwaitConfirmation { password }
        } else {
            State::Ready { password }
        }
    }
}
