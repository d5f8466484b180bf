//! Recording host shared by the integration tests

#![allow(dead_code)]

use std::cell::RefCell;
use std::time::Duration;

use chrono::{NaiveDate, NaiveDateTime};
use hoadon_engine::{EngineConfig, Host};
use hoadon_printer::{ChannelError, ChannelResult};
use shared::{AppSettings, Invoice, InvoiceInfo, OrderItem};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Call {
    Open(String),
    Present(String),
    Print,
}

/// Host that records every call and refuses the ones it is told to
#[derive(Default)]
pub struct MockHost {
    pub handoff: bool,
    /// `open_uri` fails for URIs starting with any of these
    pub refuse_prefixes: Vec<&'static str>,
    pub refuse_present: bool,
    pub calls: RefCell<Vec<Call>>,
}

impl MockHost {
    pub fn android() -> Self {
        Self {
            handoff: true,
            ..Default::default()
        }
    }

    pub fn desktop() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<Call> {
        self.calls.borrow().clone()
    }

    pub fn opened_with(&self, prefix: &str) -> usize {
        self.calls
            .borrow()
            .iter()
            .filter(|c| matches!(c, Call::Open(uri) if uri.starts_with(prefix)))
            .count()
    }

    pub fn presented(&self) -> Vec<String> {
        self.calls
            .borrow()
            .iter()
            .filter_map(|c| match c {
                Call::Present(doc) => Some(doc.clone()),
                _ => None,
            })
            .collect()
    }
}

impl Host for MockHost {
    fn supports_handoff(&self) -> bool {
        self.handoff
    }

    fn open_uri(&self, uri: &str) -> ChannelResult<()> {
        self.calls.borrow_mut().push(Call::Open(uri.to_string()));
        if self.refuse_prefixes.iter().any(|p| uri.starts_with(p)) {
            return Err(ChannelError::Refused("activity not found".to_string()));
        }
        Ok(())
    }

    fn present(&self, document: &str) -> ChannelResult<()> {
        self.calls
            .borrow_mut()
            .push(Call::Present(document.to_string()));
        if self.refuse_present {
            return Err(ChannelError::Refused("popup blocked".to_string()));
        }
        Ok(())
    }

    fn print_presented(&self) -> ChannelResult<()> {
        self.calls.borrow_mut().push(Call::Print);
        Ok(())
    }
}

pub fn config() -> EngineConfig {
    EngineConfig {
        settle: Duration::ZERO,
        ..EngineConfig::default()
    }
}

pub fn at(hour: u32, minute: u32) -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 10, 16)
        .unwrap()
        .and_hms_opt(hour, minute, 0)
        .unwrap()
}

pub fn info() -> InvoiceInfo {
    InvoiceInfo {
        invoice_number: "#K7Q2M".to_string(),
        cashier: "Lan".to_string(),
        table: "Bàn 3".to_string(),
        check_in_time: "18:30".to_string(),
        check_out_time: "18:30".to_string(),
        date: "16/10/2026".to_string(),
    }
}

pub fn invoice(items: Vec<OrderItem>) -> Invoice {
    Invoice::assemble(&AppSettings::default(), info(), items)
}

pub fn coffee() -> Invoice {
    invoice(vec![OrderItem::new("1", "Cà phê", 2, 20000)])
}
