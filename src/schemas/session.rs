use serde::{Deserialize, Serialize};

use crate::services::random_play::RandomPlay;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub(crate) enum FlashKind {
    Success,
    Error,
}

/// One-shot notice shown on the next rendered view.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct Flash {
    pub(crate) kind: FlashKind,
    pub(crate) message: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub(crate) struct SessionData {
    #[serde(default, rename = "randomplay")]
    pub(crate) random_play: RandomPlay,
    #[serde(default)]
    pub(crate) flash: Vec<Flash>,
}

impl SessionData {
    pub(crate) fn push_flash(&mut self, kind: FlashKind, message: impl Into<String>) {
        self.flash.push(Flash { kind, message: message.into() });
    }

    pub(crate) fn take_flash(&mut self) -> Vec<Flash> {
        std::mem::take(&mut self.flash)
    }
}
