use chatview_core::push::PushNotice;

/// Push channel state as seen by the view.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum ConnectionState {
    #[default]
    Connecting,
    Live,
    /// Lost the channel; the listener retries on its own.
    Reconnecting { reason: String },
}

impl ConnectionState {
    /// Follows a listener notice. Refresh notices leave the state alone.
    pub fn on_notice(&mut self, notice: &PushNotice) {
        match notice {
            PushNotice::Connected => *self = ConnectionState::Live,
            PushNotice::Disconnected { reason } => {
                *self = ConnectionState::Reconnecting {
                    reason: reason.clone(),
                };
            }
            PushNotice::Refresh(_) => {}
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            ConnectionState::Connecting => "connecting",
            ConnectionState::Live => "live",
            ConnectionState::Reconnecting { .. } => "reconnecting",
        }
    }
}
