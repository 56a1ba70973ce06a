//! Payment gateway contract and in-memory implementation.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use common::Money;
use tokio::sync::RwLock;

use crate::error::{Result, ServiceError};

/// Status reported by the payment gateway for a payment.
///
/// `Other` carries any status string outside the known set; callers must
/// treat it as a fatal, unexpected outcome rather than ignore it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentStatus {
    /// The charge went through.
    Success,

    /// The gateway accepted the charge but has not settled it yet.
    Pending,

    /// The charge was declined.
    Failed,

    /// A status this core does not recognize.
    Other(String),
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PaymentStatus::Success => write!(f, "Success"),
            PaymentStatus::Pending => write!(f, "Pending"),
            PaymentStatus::Failed => write!(f, "Failed"),
            PaymentStatus::Other(s) => write!(f, "Other({s})"),
        }
    }
}

/// Card details presented at checkout.
#[derive(Debug, Clone)]
pub struct PaymentInstrument {
    /// Card number, digits only.
    pub card_number: String,

    /// Expiry in `MM/YY` form.
    pub expiry: String,

    /// Card verification value, 3 or 4 digits.
    pub cvv: String,
}

impl PaymentInstrument {
    /// Creates a payment instrument.
    pub fn new(
        card_number: impl Into<String>,
        expiry: impl Into<String>,
        cvv: impl Into<String>,
    ) -> Self {
        Self {
            card_number: card_number.into(),
            expiry: expiry.into(),
            cvv: cvv.into(),
        }
    }

    /// Checks the field formats.
    ///
    /// Format checks only; whether the card is real or funded is the
    /// gateway's business.
    pub fn validate(&self) -> Result<()> {
        let digits = |s: &str| !s.is_empty() && s.chars().all(|c| c.is_ascii_digit());

        if !digits(&self.card_number)
            || self.card_number.len() < 13
            || self.card_number.len() > 19
        {
            return Err(ServiceError::Validation(
                "card number must be 13-19 digits".to_string(),
            ));
        }

        let expiry = self.expiry.as_bytes();
        let valid_expiry = expiry.len() == 5
            && expiry[2] == b'/'
            && expiry[..2].iter().all(u8::is_ascii_digit)
            && expiry[3..].iter().all(u8::is_ascii_digit)
            && (1..=12).contains(&((expiry[0] - b'0') * 10 + (expiry[1] - b'0')));
        if !valid_expiry {
            return Err(ServiceError::Validation(
                "expiry must be MM/YY".to_string(),
            ));
        }

        if !digits(&self.cvv) || self.cvv.len() < 3 || self.cvv.len() > 4 {
            return Err(ServiceError::Validation(
                "CVV must be 3 or 4 digits".to_string(),
            ));
        }

        Ok(())
    }
}

/// The gateway's answer to a processed payment.
#[derive(Debug, Clone)]
pub struct PaymentReceipt {
    /// The payment ID assigned by the gateway.
    pub payment_id: String,

    /// The reported status.
    pub status: PaymentStatus,
}

/// Contract for the external payment network.
///
/// One logical call per checkout; retry and timeout policy belong to the
/// hosting infrastructure, not to this core.
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Charges the given amount against the instrument.
    async fn process_payment(
        &self,
        amount: Money,
        instrument: &PaymentInstrument,
    ) -> Result<PaymentReceipt>;

    /// Looks up the current status of a previously processed payment.
    async fn get_payment_status(&self, payment_id: &str) -> Result<PaymentStatus>;
}

#[derive(Debug, Default)]
struct InMemoryGatewayState {
    payments: HashMap<String, (Money, PaymentStatus)>,
    next_id: u32,
    next_status: Option<PaymentStatus>,
    fail_on_process: bool,
}

/// In-memory payment gateway for testing.
#[derive(Clone, Default)]
pub struct InMemoryPaymentGateway {
    state: Arc<RwLock<InMemoryGatewayState>>,
}

impl InMemoryPaymentGateway {
    /// Creates a new in-memory gateway. Charges succeed unless configured
    /// otherwise.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the status the gateway will report for subsequent charges.
    pub async fn set_next_status(&self, status: PaymentStatus) {
        self.state.write().await.next_status = Some(status);
    }

    /// Configures the gateway call itself to fail (network-level error).
    pub async fn set_fail_on_process(&self, fail: bool) {
        self.state.write().await.fail_on_process = fail;
    }

    /// Returns the number of processed payments.
    pub async fn payment_count(&self) -> usize {
        self.state.read().await.payments.len()
    }
}

#[async_trait]
impl PaymentGateway for InMemoryPaymentGateway {
    async fn process_payment(
        &self,
        amount: Money,
        _instrument: &PaymentInstrument,
    ) -> Result<PaymentReceipt> {
        let mut state = self.state.write().await;

        if state.fail_on_process {
            return Err(ServiceError::PaymentGateway(
                "gateway unreachable".to_string(),
            ));
        }

        let status = state
            .next_status
            .clone()
            .unwrap_or(PaymentStatus::Success);
        state.next_id += 1;
        let payment_id = format!("PAY-{:04}", state.next_id);
        state
            .payments
            .insert(payment_id.clone(), (amount, status.clone()));

        Ok(PaymentReceipt { payment_id, status })
    }

    async fn get_payment_status(&self, payment_id: &str) -> Result<PaymentStatus> {
        let state = self.state.read().await;
        state
            .payments
            .get(payment_id)
            .map(|(_, status)| status.clone())
            .ok_or_else(|| {
                ServiceError::PaymentGateway(format!("unknown payment id: {payment_id}"))
            })
    }
}
