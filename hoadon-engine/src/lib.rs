//! # hoadon-engine
//!
//! Receipt formatting and print dispatch - WHAT to print and where to
//! send it.
//!
//! ## Scope
//!
//! - Payment payload (bank id lookup, QR image URL, raw descriptor)
//! - ESC/POS, plain-text and HTML renderers sharing one content order
//! - Fallback chain: print handler (ESC/POS, then text), then print surface
//! - Settings file, engine config, logging setup, order draft
//!
//! Printer primitives live in `hoadon-printer`.
//!
//! ## Example
//!
//! ```ignore
//! use hoadon_engine::{EngineConfig, ReceiptEngine};
//!
//! let config = EngineConfig::from_env();
//! hoadon_engine::logger::init_from_config(&config)?;
//! let engine = ReceiptEngine::from_config(config)?;
//!
//! let now = chrono::Local::now().naive_local();
//! let info = engine.new_invoice_info(now);
//! let invoice = draft.to_invoice(engine.settings(), info);
//! let delivery = engine.print(&host, &invoice, now)?;
//! ```

pub mod config;
pub mod dispatcher;
pub mod error;
pub mod logger;
pub mod order;
pub mod payment;
pub mod renderer;
pub mod settings;

pub use config::{EngineConfig, PAPER_WIDTH};
pub use dispatcher::{
    Attempt, AttemptOutcome, ChainStep, Delivery, DispatchState, PrintChain, PrintDispatcher,
};
pub use error::{ConfigError, ConfigResult, OrderError, OrderResult, PrintError, PrintResult};
pub use order::OrderDraft;
pub use payment::{DEFAULT_BANK_ID, PaymentPayload, QrImageEndpoint, resolve_bank_id};
pub use renderer::{EscPosRenderer, MarkupRenderer, Renderer, TextRenderer};

pub use hoadon_printer::{Host, OutputFormat, RenderOutput};

use chrono::NaiveDateTime;
use shared::{AppSettings, Invoice, InvoiceInfo};
use tracing::{info, instrument, warn};

/// Composition root: immutable config and settings, passed to every call
#[derive(Debug, Clone)]
pub struct ReceiptEngine {
    config: EngineConfig,
    settings: AppSettings,
}

impl ReceiptEngine {
    pub fn new(config: EngineConfig, settings: AppSettings) -> Self {
        Self { config, settings }
    }

    /// Load settings from `config.settings_path`, defaults when unset
    pub fn from_config(config: EngineConfig) -> ConfigResult<Self> {
        let settings = match &config.settings_path {
            Some(path) => settings::load(path)?,
            None => AppSettings::default(),
        };
        Ok(Self::new(config, settings))
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    pub fn settings(&self) -> &AppSettings {
        &self.settings
    }

    /// Header for a new order: fresh number, default cashier, times set to `now`
    pub fn new_invoice_info(&self, now: NaiveDateTime) -> InvoiceInfo {
        InvoiceInfo::fresh(&self.settings, now)
    }

    /// Renderer for one output format
    pub fn renderer(&self, format: OutputFormat) -> Box<dyn Renderer> {
        match format {
            OutputFormat::Escpos => Box::new(EscPosRenderer::new(&self.config)),
            OutputFormat::Text => Box::new(TextRenderer::new()),
            OutputFormat::Markup => Box::new(MarkupRenderer::new(&self.config)),
        }
    }

    /// Render an invoice without sending it anywhere
    pub fn render(&self, format: OutputFormat, invoice: &Invoice) -> PrintResult<RenderOutput> {
        Ok(self.renderer(format).render(invoice, &self.settings)?)
    }

    /// Stamp the check-out time and walk the standard fallback chain
    #[instrument(skip_all, fields(invoice = %invoice.info.invoice_number))]
    pub fn print(
        &self,
        host: &dyn Host,
        invoice: &Invoice,
        now: NaiveDateTime,
    ) -> PrintResult<Delivery> {
        self.print_with(PrintChain::standard(&self.config), host, invoice, now)
    }

    /// Same as [`print`](Self::print) but straight to the print surface
    #[instrument(skip_all, fields(invoice = %invoice.info.invoice_number))]
    pub fn print_via_surface(
        &self,
        host: &dyn Host,
        invoice: &Invoice,
        now: NaiveDateTime,
    ) -> PrintResult<Delivery> {
        self.print_with(PrintChain::surface_only(&self.config), host, invoice, now)
    }

    /// Print through a caller-built chain
    pub fn print_with(
        &self,
        chain: PrintChain,
        host: &dyn Host,
        invoice: &Invoice,
        now: NaiveDateTime,
    ) -> PrintResult<Delivery> {
        if invoice.is_empty() {
            warn!("refusing to print an empty order");
            return Err(PrintError::EmptyOrder);
        }

        let mut invoice = invoice.clone();
        invoice.info.check_out_at(now);

        let mut dispatcher = PrintDispatcher::new(chain);
        let delivery = dispatcher.dispatch(host, &invoice, &self.settings)?;
        info!(
            channel = delivery.channel,
            fell_back = delivery.fell_back(),
            "print complete"
        );
        Ok(delivery)
    }
}
