//! Promotional offer button and modal state

use serde::{Deserialize, Serialize};
use tracing::debug;

/// Offer widget: a button that opens a modal with an accept action.
///
/// Once accepted, the button is replaced by a confirmation and the modal can
/// no longer be opened.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfferState {
    pub modal_open: bool,
    pub accepted: bool,
}

impl OfferState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Open the modal
    pub fn open(&mut self) {
        if self.accepted {
            debug!("Offer already accepted, modal stays closed");
            return;
        }
        self.modal_open = true;
    }

    /// Close the modal (close button or overlay click)
    pub fn close(&mut self) {
        self.modal_open = false;
    }

    /// Accept the offer from inside the open modal
    pub fn accept(&mut self) {
        if !self.modal_open {
            debug!("Accept ignored, offer modal is not open");
            return;
        }
        self.accepted = true;
        self.modal_open = false;
    }

    /// Text shown in place of the button once accepted
    pub fn label(&self) -> &'static str {
        if self.accepted {
            "Offer accepted"
        } else {
            "Show offer"
        }
    }
}
